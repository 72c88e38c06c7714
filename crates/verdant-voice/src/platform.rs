//! Injected speech platform interface.
//!
//! The session state machine never binds to a concrete speech stack;
//! whatever the host environment provides (native TTS, a desktop
//! microphone API, a test fake) is injected through [`SpeechPlatform`].

use crate::error::VoiceError;
use async_trait::async_trait;

/// Platform capture/synthesis capability.
///
/// `capture` resolves with the final transcript of a single utterance;
/// cancelling a capture is dropping its future. Implementations must be
/// thread-safe (`Send + Sync`) for use behind `Arc`.
#[async_trait]
pub trait SpeechPlatform: Send + Sync {
    /// Whether a compatible capture/synthesis capability exists.
    fn is_available(&self) -> bool;

    /// Listen for one utterance and return its transcript.
    async fn capture(&self) -> Result<String, VoiceError>;

    /// Play back the given text as speech.
    async fn speak(&self, text: &str) -> Result<(), VoiceError>;
}

/// Always-unavailable platform for environments without speech support.
///
/// Initializing against this platform succeeds with voice degraded to
/// unavailable, matching the graceful-degradation contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSpeech;

#[async_trait]
impl SpeechPlatform for NullSpeech {
    fn is_available(&self) -> bool {
        false
    }

    async fn capture(&self) -> Result<String, VoiceError> {
        Err(VoiceError::Unavailable)
    }

    async fn speak(&self, _text: &str) -> Result<(), VoiceError> {
        Err(VoiceError::Unavailable)
    }
}
