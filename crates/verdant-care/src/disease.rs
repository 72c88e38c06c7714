//! Disease detection service.

use crate::error::Result;
use crate::remedies;
use serde::Serialize;
use std::sync::Arc;
use verdant_core::{DiseaseKind, ImageData, InitError, InitGuard, Severity};
use verdant_remote::{check_success, CareBackend, WireDetection};

const SERVICE_NAME: &str = "disease detection service";

/// One ranked disease detection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiseaseDetection {
    /// Disease class
    pub kind: DiseaseKind,
    /// Reported severity
    pub severity: Severity,
    /// Classifier confidence in [0, 1]
    pub confidence: f64,
}

impl From<WireDetection> for DiseaseDetection {
    fn from(wire: WireDetection) -> Self {
        Self {
            kind: wire.disease_kind,
            severity: wire.severity,
            confidence: wire.confidence,
        }
    }
}

/// Full result of a disease detection pass over one image.
#[derive(Debug, Clone, Serialize)]
pub struct DiseaseAnalysis {
    /// Detections in the classifier's ranking order
    pub detections: Vec<DiseaseDetection>,
    /// Plant type the classifier settled on
    pub plant_type: Option<String>,
    /// Free-form notes about the image
    pub analysis: Option<String>,
}

/// A detection paired with its remedy guidance.
///
/// Derived 1:1 from a [`DiseaseDetection`] via the static remedy tables;
/// unrecognized classes carry the generic isolate-and-monitor guidance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiseaseRecommendation {
    /// Disease class
    pub kind: DiseaseKind,
    /// Reported severity
    pub severity: Severity,
    /// Classifier confidence in [0, 1]
    pub confidence: f64,
    /// Treatment actions
    pub actions: Vec<String>,
    /// Prevention guidance
    pub prevention: Vec<String>,
}

impl DiseaseRecommendation {
    /// Build the remedy recommendation for one detection.
    #[must_use]
    pub fn for_detection(detection: &DiseaseDetection) -> Self {
        Self {
            kind: detection.kind.clone(),
            severity: detection.severity,
            confidence: detection.confidence,
            actions: remedies::actions(&detection.kind)
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            prevention: remedies::prevention(&detection.kind)
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

/// Image (+ optional plant-type hint) → ranked disease detections.
pub struct DiseaseDetectionService {
    backend: Arc<dyn CareBackend>,
    guard: InitGuard,
}

impl DiseaseDetectionService {
    /// Create the service over the given backend.
    #[must_use]
    pub fn new(backend: Arc<dyn CareBackend>) -> Self {
        Self {
            backend,
            guard: InitGuard::new(SERVICE_NAME),
        }
    }

    /// Warm up the remote classification model.
    ///
    /// Lazy and memoized: concurrent callers attach to one attempt, a
    /// failed attempt may be retried later.
    pub async fn initialize(&self) -> Result<()> {
        let backend = Arc::clone(&self.backend);
        self.guard
            .ensure(move || async move {
                let ack = backend
                    .initialize_disease_model()
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

    /// Classify diseases visible in an image.
    ///
    /// Requires prior successful initialization. Returns detections in
    /// the classifier's ranking order; a backend rejection surfaces the
    /// server-supplied message.
    pub async fn detect_disease(
        &self,
        image: &ImageData,
        plant_type_hint: Option<&str>,
    ) -> Result<DiseaseAnalysis> {
        self.guard.require_ready()?;

        let response = self.backend.detect_disease(image, plant_type_hint).await?;
        check_success("detectDisease", response.success, response.message.clone())?;

        tracing::debug!(
            detections = response.detections.len(),
            "disease detection complete"
        );
        Ok(DiseaseAnalysis {
            detections: response
                .detections
                .into_iter()
                .map(DiseaseDetection::from)
                .collect(),
            plant_type: response.plant_type,
            analysis: response.analysis,
        })
    }

    /// Pair each detection with its remedy guidance.
    ///
    /// Pure, no I/O; order- and length-preserving relative to the input.
    #[must_use]
    pub fn generate_recommendations(
        &self,
        detections: &[DiseaseDetection],
    ) -> Vec<DiseaseRecommendation> {
        detections
            .iter()
            .map(DiseaseRecommendation::for_detection)
            .collect()
    }
}
