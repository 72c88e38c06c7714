//! Abstract remote AI capability and its response types.
//!
//! The orchestration layer never speaks a wire format directly; it
//! consumes this trait. The shipped implementation is
//! [`HttpCareBackend`](crate::http::HttpCareBackend); tests substitute
//! hand-written fakes.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use verdant_core::{DiseaseKind, ImageData, PlantId, Severity};

/// The remote AI capability consumed by every Verdant service.
///
/// Implementations must be thread-safe (`Send + Sync`) for use behind
/// `Arc` in async contexts. Errors cover the transport only; an
/// operation-level failure travels in each response's `success`/`message`
/// pair so callers can surface the server's own words.
#[async_trait]
pub trait CareBackend: Send + Sync {
    /// Warm up the disease classification model.
    async fn initialize_disease_model(&self) -> Result<InitAck>;

    /// Classify diseases visible in an image, optionally hinted with a plant type.
    async fn detect_disease(
        &self,
        image: &ImageData,
        plant_type: Option<&str>,
    ) -> Result<DetectDiseaseResponse>;

    /// Prime the conversational assistant with user preferences.
    async fn initialize_care_assistant(
        &self,
        preferences: &HashMap<String, String>,
    ) -> Result<InitAck>;

    /// Ask the assistant for advice on a single conversational turn.
    async fn care_advice(
        &self,
        message: &str,
        context: &HashMap<String, String>,
    ) -> Result<CareAdviceResponse>;

    /// Request a personalized care plan for one plant.
    async fn care_plan(
        &self,
        plant_id: &PlantId,
        environment: &HashMap<String, String>,
        preferences: &HashMap<String, String>,
    ) -> Result<CarePlanResponse>;

    /// Fetch the command vocabulary used to bias voice interpretation.
    async fn load_vocabulary(&self) -> Result<Vocabulary>;

    /// Interpret a voice transcript into an intent with entities.
    async fn interpret_voice(
        &self,
        transcript: &str,
        vocabulary: &[String],
        context_tag: &str,
    ) -> Result<InterpretResponse>;

    /// Warm up the species identification model.
    async fn initialize_identification_model(&self) -> Result<InitAck>;

    /// Identify the species shown in an image.
    async fn identify_plant(&self, image: &ImageData) -> Result<IdentifyResponse>;
}

/// Acknowledgement for a model initialization request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitAck {
    /// Whether the backend accepted the initialization
    pub success: bool,
    /// Server-supplied message, present on failure
    #[serde(default)]
    pub message: Option<String>,
}

/// One disease detection as reported by the classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDetection {
    /// Disease class
    pub disease_kind: DiseaseKind,
    /// Reported severity
    pub severity: Severity,
    /// Classifier confidence in [0, 1]
    pub confidence: f64,
}

/// Response to a disease detection request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectDiseaseResponse {
    /// Whether classification succeeded
    pub success: bool,
    /// Detections ranked by the classifier
    #[serde(default)]
    pub detections: Vec<WireDetection>,
    /// Plant type the classifier settled on
    #[serde(default)]
    pub plant_type: Option<String>,
    /// Free-form notes about the image
    #[serde(default)]
    pub analysis: Option<String>,
    /// Server-supplied message, present on failure
    #[serde(default)]
    pub message: Option<String>,
}

/// Response to a care advice turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareAdviceResponse {
    /// Whether the assistant produced advice
    pub success: bool,
    /// Advice text
    #[serde(default)]
    pub response: Option<String>,
    /// Actionable recommendations extracted from the advice
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Assistant confidence in [0, 1]
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Follow-up prompts the caller may offer the user
    #[serde(default)]
    pub follow_up_questions: Vec<String>,
    /// Server-supplied message, present on failure
    #[serde(default)]
    pub message: Option<String>,
}

/// Response to a personalized care plan request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarePlanResponse {
    /// Whether the planner produced a plan
    pub success: bool,
    /// Free-form plan text
    #[serde(default)]
    pub care_plan: Option<String>,
    /// Task name to cadence description
    #[serde(default)]
    pub schedule: BTreeMap<String, String>,
    /// Reminder lines
    #[serde(default)]
    pub reminders: Vec<String>,
    /// Supplementary tips
    #[serde(default)]
    pub tips: Vec<String>,
    /// Server-supplied message, present on failure
    #[serde(default)]
    pub message: Option<String>,
}

/// Command vocabulary for voice interpretation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vocabulary {
    /// Words and short phrases the interpreter is biased toward
    #[serde(default)]
    pub words: Vec<String>,
}

/// Response to a voice interpretation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretResponse {
    /// Whether the transcript was interpreted
    pub success: bool,
    /// Normalized form of the command
    #[serde(default)]
    pub processed_command: Option<String>,
    /// Interpreted intent name
    #[serde(default)]
    pub intent: Option<String>,
    /// Extracted parameters keyed by entity name
    #[serde(default)]
    pub entities: HashMap<String, serde_json::Value>,
    /// Interpreter confidence in [0, 1]
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Server-supplied message, present on failure
    #[serde(default)]
    pub message: Option<String>,
}

/// One species match as reported by the identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireIdentification {
    /// Common name
    pub name: String,
    /// Scientific name
    pub scientific_name: String,
    /// Identifier confidence in [0, 1]
    pub confidence: f64,
}

/// Response to a plant identification request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyResponse {
    /// Whether identification succeeded
    pub success: bool,
    /// Species matches, ranked by descending confidence
    #[serde(default)]
    pub identifications: Vec<WireIdentification>,
    /// Free-form notes about image quality
    #[serde(default)]
    pub analysis: Option<String>,
    /// Care tips keyed by topic, when the identifier knows the species
    #[serde(default)]
    pub care_tips: Option<BTreeMap<String, String>>,
    /// Server-supplied message, present on failure
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_response_deserializes_camel_case() {
        let json = r#"{
            "success": true,
            "detections": [
                {"diseaseKind": "leaf_spot", "severity": "moderate", "confidence": 0.82}
            ],
            "plantType": "monstera",
            "analysis": "sharp focus, good lighting"
        }"#;

        let response: DetectDiseaseResponse = serde_json::from_str(json).expect("deserialize");
        assert!(response.success);
        assert_eq!(response.detections.len(), 1);
        assert_eq!(response.detections[0].disease_kind, DiseaseKind::LeafSpot);
        assert_eq!(response.detections[0].severity, Severity::Moderate);
        assert_eq!(response.plant_type.as_deref(), Some("monstera"));
        assert!(response.message.is_none());
    }

    #[test]
    fn test_detect_response_failure_has_no_detections() {
        let json = r#"{"success": false, "message": "image too small"}"#;
        let response: DetectDiseaseResponse = serde_json::from_str(json).expect("deserialize");
        assert!(!response.success);
        assert!(response.detections.is_empty());
        assert_eq!(response.message.as_deref(), Some("image too small"));
    }

    #[test]
    fn test_interpret_response_entities() {
        let json = r#"{
            "success": true,
            "processedCommand": "water the monstera",
            "intent": "schedule_watering",
            "entities": {"plant": "monstera", "amount": 250},
            "confidence": 0.91
        }"#;

        let response: InterpretResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.intent.as_deref(), Some("schedule_watering"));
        assert_eq!(
            response.entities.get("plant"),
            Some(&serde_json::Value::String("monstera".to_string()))
        );
        assert_eq!(response.entities.get("amount"), Some(&serde_json::json!(250)));
    }

    #[test]
    fn test_identify_response_optional_care_tips() {
        let json = r#"{
            "success": true,
            "identifications": [
                {"name": "Monstera", "scientificName": "Monstera deliciosa", "confidence": 0.95}
            ]
        }"#;

        let response: IdentifyResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.identifications.len(), 1);
        assert!(response.care_tips.is_none());
    }
}
