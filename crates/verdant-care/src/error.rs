//! Error types for the plant-care orchestration layer.

use thiserror::Error;
use verdant_core::InitError;
use verdant_remote::RemoteError;

/// Errors surfaced by the capability services and the facade.
///
/// Initialization errors signal a caller sequencing problem (a
/// capability used before setup, or setup itself failing); remote errors
/// carry the server- or transport-supplied message for a single failed
/// operation. No failure here is fatal to the process.
#[derive(Error, Debug)]
pub enum CareError {
    /// Capability used before successful initialization, or initialization failed
    #[error(transparent)]
    Init(#[from] InitError),

    /// A remote call failed or was rejected by the backend
    #[error("remote service error: {0}")]
    Remote(#[from] RemoteError),
}

/// Result type alias for plant-care operations.
pub type Result<T> = std::result::Result<T, CareError>;
