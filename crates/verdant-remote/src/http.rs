//! HTTP implementation of the remote AI capability.
//!
//! Talks JSON to the Verdant backend. Images travel base64-encoded
//! inside request bodies; every request carries the caller-supplied
//! bearer credential and a fresh correlation id.

use crate::backend::{
    CareAdviceResponse, CareBackend, CarePlanResponse, DetectDiseaseResponse, IdentifyResponse,
    InitAck, InterpretResponse, Vocabulary,
};
use crate::error::{RemoteError, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use verdant_core::{AuthToken, BackendConfig, ImageData, PlantId};

/// Reqwest-backed [`CareBackend`].
pub struct HttpCareBackend {
    client: Client,
    base_url: String,
    token: AuthToken,
}

impl HttpCareBackend {
    /// Create a backend client from configuration and an injected credential.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: &BackendConfig, token: AuthToken) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn post<B, T>(&self, endpoint: &'static str, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(endpoint, "submitting request");
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(self.token.expose())
            .header("x-request-id", uuid::Uuid::new_v4().to_string())
            .json(body)
            .send()
            .await?;

        Self::decode(endpoint, response).await
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &'static str, path: &str) -> Result<T> {
        tracing::debug!(endpoint, "submitting request");
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(self.token.expose())
            .header("x-request-id", uuid::Uuid::new_v4().to_string())
            .send()
            .await?;

        Self::decode(endpoint, response).await
    }

    async fn decode<T: DeserializeOwned>(
        endpoint: &'static str,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(RemoteError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(|e| RemoteError::Parse {
            endpoint,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl CareBackend for HttpCareBackend {
    async fn initialize_disease_model(&self) -> Result<InitAck> {
        self.post(
            "initializeDiseaseModel",
            "ai/disease/initialize",
            &serde_json::json!({}),
        )
        .await
    }

    async fn detect_disease(
        &self,
        image: &ImageData,
        plant_type: Option<&str>,
    ) -> Result<DetectDiseaseResponse> {
        let body = DetectBody {
            image: ImageBody::from_image(image),
            plant_type: plant_type.map(str::to_string),
        };
        self.post("detectDisease", "ai/disease/detect", &body).await
    }

    async fn initialize_care_assistant(
        &self,
        preferences: &HashMap<String, String>,
    ) -> Result<InitAck> {
        let body = PreferencesBody { preferences };
        self.post(
            "initializeCareAssistant",
            "ai/assistant/initialize",
            &body,
        )
        .await
    }

    async fn care_advice(
        &self,
        message: &str,
        context: &HashMap<String, String>,
    ) -> Result<CareAdviceResponse> {
        let body = AdviceBody { message, context };
        self.post("careAdvice", "ai/assistant/advice", &body).await
    }

    async fn care_plan(
        &self,
        plant_id: &PlantId,
        environment: &HashMap<String, String>,
        preferences: &HashMap<String, String>,
    ) -> Result<CarePlanResponse> {
        let body = PlanBody {
            plant_id: plant_id.as_str(),
            environment,
            preferences,
        };
        self.post("carePlan", "ai/assistant/plan", &body).await
    }

    async fn load_vocabulary(&self) -> Result<Vocabulary> {
        self.get("loadVocabulary", "ai/voice/vocabulary").await
    }

    async fn interpret_voice(
        &self,
        transcript: &str,
        vocabulary: &[String],
        context_tag: &str,
    ) -> Result<InterpretResponse> {
        let body = InterpretBody {
            transcript,
            vocabulary,
            context_tag,
        };
        self.post("interpretVoice", "ai/voice/interpret", &body).await
    }

    async fn initialize_identification_model(&self) -> Result<InitAck> {
        self.post(
            "initializePlantIdModel",
            "ai/identify/initialize",
            &serde_json::json!({}),
        )
        .await
    }

    async fn identify_plant(&self, image: &ImageData) -> Result<IdentifyResponse> {
        let body = IdentifyBody {
            image: ImageBody::from_image(image),
        };
        self.post("identifyPlant", "ai/identify/match", &body).await
    }
}

// Request body types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageBody {
    data: String,
    mime_type: String,
}

impl ImageBody {
    fn from_image(image: &ImageData) -> Self {
        Self {
            data: BASE64.encode(image.bytes()),
            mime_type: image.mime_type().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectBody {
    image: ImageBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    plant_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PreferencesBody<'a> {
    preferences: &'a HashMap<String, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AdviceBody<'a> {
    message: &'a str,
    context: &'a HashMap<String, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanBody<'a> {
    plant_id: &'a str,
    environment: &'a HashMap<String, String>,
    preferences: &'a HashMap<String, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InterpretBody<'a> {
    transcript: &'a str,
    vocabulary: &'a [String],
    context_tag: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IdentifyBody {
    image: ImageBody,
}
