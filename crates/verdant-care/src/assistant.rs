//! Conversational care assistant service.

use crate::error::Result;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use verdant_core::{InitError, InitGuard, PlantId};
use verdant_remote::{check_success, CareBackend};

const SERVICE_NAME: &str = "care assistant service";

/// Output of one conversational turn.
#[derive(Debug, Clone, Serialize)]
pub struct CareTurn {
    /// Advice text
    pub response_text: String,
    /// Actionable recommendations extracted from the advice
    pub recommendations: Vec<String>,
    /// Follow-up prompts the caller may offer the user
    pub follow_up_questions: Vec<String>,
    /// Assistant confidence in [0, 1]
    pub confidence: Option<f64>,
}

/// A personalized care plan for one plant.
#[derive(Debug, Clone, Serialize)]
pub struct CarePlan {
    /// Free-form plan text
    pub plan: String,
    /// Task name to cadence description
    pub schedule: BTreeMap<String, String>,
    /// Reminder lines
    pub reminders: Vec<String>,
    /// Supplementary tips
    pub tips: Vec<String>,
}

/// Conversational turn → advice text + recommendations + follow-ups.
///
/// Retains user preferences across turns; each turn's context is merged
/// over the stored preferences before the remote call, with the per-turn
/// context winning on key collisions.
pub struct CareAssistantService {
    backend: Arc<dyn CareBackend>,
    guard: InitGuard,
    preferences: Mutex<HashMap<String, String>>,
}

impl CareAssistantService {
    /// Create the service over the given backend.
    #[must_use]
    pub fn new(backend: Arc<dyn CareBackend>) -> Self {
        Self {
            backend,
            guard: InitGuard::new(SERVICE_NAME),
            preferences: Mutex::new(HashMap::new()),
        }
    }

    /// Store preferences and prime the remote assistant.
    ///
    /// Preferences overwrite on every call (no merge); the remote
    /// handshake itself runs at most once and memoizes.
    pub async fn initialize(&self, preferences: HashMap<String, String>) -> Result<()> {
        *self
            .preferences
            .lock()
            .expect("preferences lock poisoned") = preferences.clone();

        let backend = Arc::clone(&self.backend);
        self.guard
            .ensure(move || async move {
                let ack = backend
                    .initialize_care_assistant(&preferences)
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

    /// Currently stored preferences.
    #[must_use]
    pub fn preferences(&self) -> HashMap<String, String> {
        self.preferences
            .lock()
            .expect("preferences lock poisoned")
            .clone()
    }

    /// Ask the assistant for advice on one conversational turn.
    ///
    /// Message validation is the caller's responsibility; an empty
    /// message is submitted as-is.
    pub async fn care_advice(
        &self,
        message: &str,
        context: &HashMap<String, String>,
    ) -> Result<CareTurn> {
        self.guard.require_ready()?;

        let mut merged = self.preferences();
        merged.extend(context.iter().map(|(k, v)| (k.clone(), v.clone())));

        let response = self.backend.care_advice(message, &merged).await?;
        check_success("careAdvice", response.success, response.message.clone())?;

        Ok(CareTurn {
            response_text: response.response.unwrap_or_default(),
            recommendations: response.recommendations,
            follow_up_questions: response.follow_up_questions,
            confidence: response.confidence,
        })
    }

    /// Request a personalized care plan for one plant.
    pub async fn personalized_care_plan(
        &self,
        plant_id: &PlantId,
        environment: &HashMap<String, String>,
    ) -> Result<CarePlan> {
        self.guard.require_ready()?;

        let preferences = self.preferences();
        let response = self
            .backend
            .care_plan(plant_id, environment, &preferences)
            .await?;
        check_success("carePlan", response.success, response.message.clone())?;

        Ok(CarePlan {
            plan: response.care_plan.unwrap_or_default(),
            schedule: response.schedule,
            reminders: response.reminders,
            tips: response.tips,
        })
    }
}
