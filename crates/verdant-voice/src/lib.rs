//! Verdant Voice - voice command capture for the plant-care AI layer.
//!
//! This crate owns the single exclusive capture session and its state
//! machine. The platform speech stack is injected through
//! [`SpeechPlatform`] so the session logic stays platform-independent
//! and testable with a fake implementation; environments without speech
//! support degrade to unavailable instead of failing initialization.
//!
//! # Session flow
//!
//! ```text
//! Idle → Listening → Processing → Idle
//!          │              │
//!          └── stop / error paths return directly to Idle
//! ```
//!
//! One utterance is captured at a time; the transcript and command
//! vocabulary are submitted to the remote intent interpreter and the
//! outcome is delivered through the callback passed to
//! [`VoiceCommandService::start_listening`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod platform;
pub mod service;

// Re-export commonly used types
pub use error::VoiceError;
pub use platform::{NullSpeech, SpeechPlatform};
pub use service::{RecognizedCommand, VoiceCommandOutcome, VoiceCommandService};
