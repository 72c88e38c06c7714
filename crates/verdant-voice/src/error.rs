//! Error types for the voice subsystem.

use thiserror::Error;

/// Errors produced by a speech platform.
///
/// These never escape as hard failures from the session flow: a missing
/// platform degrades voice to unavailable at initialization, and capture
/// or synthesis failures are reported through the session callback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VoiceError {
    /// No compatible capture/synthesis capability exists on this platform
    #[error("no speech capability available on this platform")]
    Unavailable,

    /// Audio capture failed mid-session
    #[error("voice capture failed: {0}")]
    Capture(String),

    /// Speech synthesis failed
    #[error("speech synthesis failed: {0}")]
    Synthesis(String),
}
