//! Verdant Remote - abstract remote AI capability for the plant-care layer.
//!
//! This crate defines the request/response contracts the orchestration
//! layer consumes and ships the HTTP implementation of them. Transport
//! details stay here; the services in `verdant-care` and `verdant-voice`
//! only see the [`CareBackend`] trait.
//!
//! # Example
//!
//! ```rust,no_run
//! use verdant_core::{AuthToken, BackendConfig, ImageData};
//! use verdant_remote::{CareBackend, HttpCareBackend};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = HttpCareBackend::new(&BackendConfig::default(), AuthToken::new("token"))?;
//!
//! let image = ImageData::new(std::fs::read("fern.jpg")?, "image/jpeg");
//! let response = backend.detect_disease(&image, Some("fern")).await?;
//! println!("{} detections", response.detections.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod backend;
pub mod error;
pub mod http;

// Re-export commonly used types
pub use backend::{
    CareAdviceResponse, CareBackend, CarePlanResponse, DetectDiseaseResponse, IdentifyResponse,
    InitAck, InterpretResponse, Vocabulary, WireDetection, WireIdentification,
};
pub use error::{check_success, RemoteError, Result};
pub use http::HttpCareBackend;
