//! Shared test double for the remote AI backend.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;
use verdant_core::{ImageData, PlantId};
use verdant_remote::{
    CareAdviceResponse, CareBackend, CarePlanResponse, DetectDiseaseResponse, IdentifyResponse,
    InitAck, InterpretResponse, Vocabulary,
};

/// Scriptable in-memory backend recording every call.
#[derive(Default)]
pub struct MockBackend {
    pub fail_disease_init: AtomicBool,
    pub fail_assistant_init: AtomicBool,
    pub fail_identify_init: AtomicBool,
    pub fail_detect: AtomicBool,
    pub fail_identify: AtomicBool,

    pub detections: Mutex<Vec<verdant_remote::WireDetection>>,
    pub identifications: Mutex<Vec<verdant_remote::WireIdentification>>,
    pub care_tips: Mutex<Option<BTreeMap<String, String>>>,

    pub disease_init_calls: AtomicU32,
    pub assistant_init_calls: AtomicU32,
    pub identify_init_calls: AtomicU32,
    pub vocabulary_calls: AtomicU32,
    pub detect_calls: AtomicU32,
    pub identify_calls: AtomicU32,

    pub last_assistant_preferences: Mutex<Option<HashMap<String, String>>>,
    pub last_advice_context: Mutex<Option<HashMap<String, String>>>,
    pub last_plan_preferences: Mutex<Option<HashMap<String, String>>>,
}

impl MockBackend {
    fn ack(failed: bool, message: &str) -> InitAck {
        InitAck {
            success: !failed,
            message: failed.then(|| message.to_string()),
        }
    }
}

#[async_trait]
impl CareBackend for MockBackend {
    async fn initialize_disease_model(&self) -> verdant_remote::Result<InitAck> {
        self.disease_init_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::ack(
            self.fail_disease_init.load(Ordering::SeqCst),
            "disease model unavailable",
        ))
    }

    async fn detect_disease(
        &self,
        _image: &ImageData,
        plant_type: Option<&str>,
    ) -> verdant_remote::Result<DetectDiseaseResponse> {
        self.detect_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_detect.load(Ordering::SeqCst) {
            return Ok(DetectDiseaseResponse {
                success: false,
                detections: Vec::new(),
                plant_type: None,
                analysis: None,
                message: Some("detector offline".to_string()),
            });
        }

        Ok(DetectDiseaseResponse {
            success: true,
            detections: self.detections.lock().expect("detections lock").clone(),
            plant_type: plant_type.map(str::to_string),
            analysis: Some("clear image, full foliage visible".to_string()),
            message: None,
        })
    }

    async fn initialize_care_assistant(
        &self,
        preferences: &HashMap<String, String>,
    ) -> verdant_remote::Result<InitAck> {
        self.assistant_init_calls.fetch_add(1, Ordering::SeqCst);
        *self
            .last_assistant_preferences
            .lock()
            .expect("preferences lock") = Some(preferences.clone());
        Ok(Self::ack(
            self.fail_assistant_init.load(Ordering::SeqCst),
            "assistant model unavailable",
        ))
    }

    async fn care_advice(
        &self,
        message: &str,
        context: &HashMap<String, String>,
    ) -> verdant_remote::Result<CareAdviceResponse> {
        *self.last_advice_context.lock().expect("context lock") = Some(context.clone());
        Ok(CareAdviceResponse {
            success: true,
            response: Some(format!("advice for: {message}")),
            recommendations: vec!["check soil moisture".to_string()],
            confidence: Some(0.8),
            follow_up_questions: vec!["how much light does it get?".to_string()],
            message: None,
        })
    }

    async fn care_plan(
        &self,
        plant_id: &PlantId,
        _environment: &HashMap<String, String>,
        preferences: &HashMap<String, String>,
    ) -> verdant_remote::Result<CarePlanResponse> {
        *self.last_plan_preferences.lock().expect("preferences lock") = Some(preferences.clone());
        Ok(CarePlanResponse {
            success: true,
            care_plan: Some(format!("weekly plan for {plant_id}")),
            schedule: BTreeMap::from([("watering".to_string(), "every 7 days".to_string())]),
            reminders: vec!["rotate the pot monthly".to_string()],
            tips: vec!["wipe dust from leaves".to_string()],
            message: None,
        })
    }

    async fn load_vocabulary(&self) -> verdant_remote::Result<Vocabulary> {
        self.vocabulary_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vocabulary {
            words: vec!["water".to_string(), "fertilize".to_string()],
        })
    }

    async fn interpret_voice(
        &self,
        transcript: &str,
        _vocabulary: &[String],
        _context_tag: &str,
    ) -> verdant_remote::Result<InterpretResponse> {
        Ok(InterpretResponse {
            success: true,
            processed_command: Some(transcript.to_lowercase()),
            intent: Some("general_query".to_string()),
            entities: HashMap::new(),
            confidence: Some(0.7),
            message: None,
        })
    }

    async fn initialize_identification_model(&self) -> verdant_remote::Result<InitAck> {
        self.identify_init_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::ack(
            self.fail_identify_init.load(Ordering::SeqCst),
            "identification model unavailable",
        ))
    }

    async fn identify_plant(&self, _image: &ImageData) -> verdant_remote::Result<IdentifyResponse> {
        self.identify_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_identify.load(Ordering::SeqCst) {
            return Ok(IdentifyResponse {
                success: false,
                identifications: Vec::new(),
                analysis: None,
                care_tips: None,
                message: Some("identifier offline".to_string()),
            });
        }

        Ok(IdentifyResponse {
            success: true,
            identifications: self
                .identifications
                .lock()
                .expect("identifications lock")
                .clone(),
            analysis: Some("sharp focus".to_string()),
            care_tips: self.care_tips.lock().expect("care tips lock").clone(),
            message: None,
        })
    }
}
