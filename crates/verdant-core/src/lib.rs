//! Verdant Core - Foundation crate for the Verdant plant-care AI layer.
//!
//! This crate provides shared types, error handling, configuration
//! management, and the one-time initialization guard that all other
//! Verdant crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Configuration error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared newtypes and enums (`PlantId`, `Severity`, `DiseaseKind`, `Timestamp`)
//! - [`guard`] - Memoized one-time async initialization shared by every capability service
//! - [`telemetry`] - Opt-in tracing subscriber bootstrap
//!
//! # Example
//!
//! ```rust
//! use verdant_core::{AppConfig, DiseaseKind, Severity};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration (falls back to defaults when no file exists)
//! let config = AppConfig::default();
//! assert!(config.voice.enabled);
//!
//! // Domain enums round-trip their wire spelling
//! let kind = DiseaseKind::from("leaf_spot".to_string());
//! assert_eq!(kind, DiseaseKind::LeafSpot);
//! assert_eq!(Severity::High.penalty(), 30);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod guard;
pub mod telemetry;
pub mod types;

// Re-export commonly used types
pub use config::{AnalysisConfig, AppConfig, BackendConfig, VoiceConfig};
pub use error::{ConfigError, ConfigResult};
pub use guard::{InitError, InitGuard};
pub use types::{AuthToken, DiseaseKind, ImageData, PlantId, Severity, Timestamp, ValidationError};
