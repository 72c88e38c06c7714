//! Plant-care AI facade.
//!
//! Composes the four capability services, initializes them concurrently,
//! and derives aggregate health reports. The facade is explicitly
//! constructed and dependency-injected; its lifecycle belongs to the
//! calling context, never to a module-level global.

use crate::assistant::CareAssistantService;
use crate::disease::DiseaseDetectionService;
use crate::error::Result;
use crate::identify::PlantIdentificationService;
use crate::report::{compute_health_score, merge_recommendations, HealthReport};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use verdant_core::{AppConfig, ImageData, Timestamp};
use verdant_remote::CareBackend;
use verdant_voice::{SpeechPlatform, VoiceCommandService};

/// Facade coordinating the four AI capability services.
pub struct PlantCareAi {
    disease: Arc<DiseaseDetectionService>,
    assistant: Arc<CareAssistantService>,
    voice: Arc<VoiceCommandService>,
    identification: Arc<PlantIdentificationService>,
    bonus_threshold: f64,
    ready: AtomicBool,
}

impl PlantCareAi {
    /// Compose the facade over an injected backend and speech platform.
    #[must_use]
    pub fn new(
        backend: Arc<dyn CareBackend>,
        speech: Arc<dyn SpeechPlatform>,
        config: &AppConfig,
    ) -> Self {
        Self {
            disease: Arc::new(DiseaseDetectionService::new(Arc::clone(&backend))),
            assistant: Arc::new(CareAssistantService::new(Arc::clone(&backend))),
            voice: Arc::new(VoiceCommandService::new(
                Arc::clone(&backend),
                speech,
                &config.voice,
            )),
            identification: Arc::new(PlantIdentificationService::new(backend)),
            bonus_threshold: config.analysis.identification_bonus_threshold,
            ready: AtomicBool::new(false),
        }
    }

    /// Fan out initialization to all four services and fan in.
    ///
    /// The aggregate call fails when any sub-initialization fails, and
    /// the facade is not marked ready. Sub-services that already
    /// succeeded stay initialized (no rollback); retry the full call
    /// rather than assuming partial readiness — their guards short-
    /// circuit and only the failed ones re-run.
    pub async fn initialize(&self, preferences: HashMap<String, String>) -> Result<()> {
        let (disease, assistant, voice, identification) = tokio::join!(
            self.disease.initialize(),
            self.assistant.initialize(preferences),
            self.voice.initialize(),
            self.identification.initialize(),
        );
        disease?;
        assistant?;
        voice?;
        identification?;

        self.ready.store(true, Ordering::SeqCst);
        tracing::info!("plant care AI ready");
        Ok(())
    }

    /// Whether every capability service initialized successfully.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Run disease detection and identification concurrently and derive
    /// the aggregate health report.
    ///
    /// Both branches run to completion; if either fails the whole
    /// operation fails and no partial report is produced.
    pub async fn analyze_plant_health(
        &self,
        image: &ImageData,
        plant_type_hint: Option<&str>,
    ) -> Result<HealthReport> {
        let (disease, identification) = tokio::join!(
            self.disease.detect_disease(image, plant_type_hint),
            self.identification.identify_plant(image),
        );
        let disease = disease?;
        let identification = identification?;

        let score = compute_health_score(&disease, &identification, self.bonus_threshold);
        let recommendations = merge_recommendations(&disease, &identification);

        tracing::debug!(score, "health analysis complete");
        Ok(HealthReport {
            score,
            disease,
            identification,
            recommendations,
            generated_at: Timestamp::now(),
        })
    }

    /// Disease detection service.
    #[must_use]
    pub fn disease(&self) -> &Arc<DiseaseDetectionService> {
        &self.disease
    }

    /// Conversational care assistant.
    #[must_use]
    pub fn assistant(&self) -> &Arc<CareAssistantService> {
        &self.assistant
    }

    /// Voice command service.
    #[must_use]
    pub fn voice(&self) -> &Arc<VoiceCommandService> {
        &self.voice
    }

    /// Plant identification service.
    #[must_use]
    pub fn identification(&self) -> &Arc<PlantIdentificationService> {
        &self.identification
    }
}

impl std::fmt::Debug for PlantCareAi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlantCareAi")
            .field("ready", &self.is_ready())
            .finish()
    }
}
