//! Verdant Care - AI capability orchestration for plant care.
//!
//! This crate composes four independently-initializing capability
//! services — disease detection, a conversational care assistant, voice
//! commands, and plant identification — behind the [`PlantCareAi`]
//! facade, and derives a unified health report from detection and
//! identification results.
//!
//! Every service initializes lazily and at most once; concurrent
//! initialization attempts attach to the in-flight one. The remote
//! backend and the speech platform are injected, so the whole layer runs
//! against fakes in tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use verdant_care::PlantCareAi;
//! use verdant_core::{AppConfig, AuthToken, ImageData};
//! use verdant_remote::HttpCareBackend;
//! use verdant_voice::NullSpeech;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load_with_env()?;
//! let backend = Arc::new(HttpCareBackend::new(&config.backend, AuthToken::new("token"))?);
//! let ai = PlantCareAi::new(backend, Arc::new(NullSpeech), &config);
//!
//! ai.initialize(HashMap::new()).await?;
//!
//! let image = ImageData::new(std::fs::read("fern.jpg")?, "image/jpeg");
//! let report = ai.analyze_plant_health(&image, Some("fern")).await?;
//! println!("health score: {}", report.score);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod assistant;
pub mod disease;
pub mod error;
pub mod facade;
pub mod identify;
pub mod remedies;
pub mod report;

// Re-export commonly used types
pub use assistant::{CareAssistantService, CarePlan, CareTurn};
pub use disease::{
    DiseaseAnalysis, DiseaseDetection, DiseaseDetectionService, DiseaseRecommendation,
};
pub use error::{CareError, Result};
pub use facade::PlantCareAi;
pub use identify::{IdentificationMatch, IdentificationOutcome, PlantIdentificationService};
pub use report::{
    compute_health_score, merge_recommendations, HealthReport, Priority, Recommendation,
};
