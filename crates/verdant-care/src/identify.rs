//! Plant identification service.

use crate::error::Result;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use verdant_core::{ImageData, InitError, InitGuard};
use verdant_remote::{check_success, CareBackend, WireIdentification};

const SERVICE_NAME: &str = "plant identification service";

/// One ranked species match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentificationMatch {
    /// Common name
    pub name: String,
    /// Scientific name
    pub scientific_name: String,
    /// Identifier confidence in [0, 1]
    pub confidence: f64,
}

impl From<WireIdentification> for IdentificationMatch {
    fn from(wire: WireIdentification) -> Self {
        Self {
            name: wire.name,
            scientific_name: wire.scientific_name,
            confidence: wire.confidence,
        }
    }
}

/// Full result of an identification pass over one image.
#[derive(Debug, Clone, Serialize)]
pub struct IdentificationOutcome {
    /// Matches ordered by descending confidence
    pub matches: Vec<IdentificationMatch>,
    /// Free-form notes about image quality
    pub analysis: Option<String>,
    /// Care tips keyed by topic, when the identifier knows the species
    pub care_tips: Option<BTreeMap<String, String>>,
}

impl IdentificationOutcome {
    /// The highest-confidence match, when any match exists.
    #[must_use]
    pub fn top_match(&self) -> Option<&IdentificationMatch> {
        self.matches.first()
    }
}

/// Image → ranked species matches + analysis + optional care tips.
pub struct PlantIdentificationService {
    backend: Arc<dyn CareBackend>,
    guard: InitGuard,
}

impl PlantIdentificationService {
    /// Create the service over the given backend.
    #[must_use]
    pub fn new(backend: Arc<dyn CareBackend>) -> Self {
        Self {
            backend,
            guard: InitGuard::new(SERVICE_NAME),
        }
    }

    /// Warm up the remote identification model.
    pub async fn initialize(&self) -> Result<()> {
        let backend = Arc::clone(&self.backend);
        self.guard
            .ensure(move || async move {
                let ack = backend
                    .initialize_identification_model()
                    .await
                    .map_err(|e| InitError::Failed {
                        service: SERVICE_NAME,
                        message: e.to_string(),
                    })?;
                if ack.success {
                    Ok(())
                } else {
                    Err(InitError::Failed {
                        service: SERVICE_NAME,
                        message: ack
                            .message
                            .unwrap_or_else(|| "initialization rejected".to_string()),
                    })
                }
            })
            .await?;
        Ok(())
    }

    /// Whether initialization has completed successfully.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.guard.is_ready()
    }

    /// Identify the species shown in an image.
    ///
    /// Requires prior successful initialization; same failure contract
    /// as disease detection. Matches come back ordered by descending
    /// confidence regardless of wire order.
    pub async fn identify_plant(&self, image: &ImageData) -> Result<IdentificationOutcome> {
        self.guard.require_ready()?;

        let response = self.backend.identify_plant(image).await?;
        check_success("identifyPlant", response.success, response.message.clone())?;

        let mut matches: Vec<IdentificationMatch> = response
            .identifications
            .into_iter()
            .map(IdentificationMatch::from)
            .collect();
        matches.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });

        tracing::debug!(matches = matches.len(), "plant identification complete");
        Ok(IdentificationOutcome {
            matches,
            analysis: response.analysis,
            care_tips: response.care_tips,
        })
    }
}
