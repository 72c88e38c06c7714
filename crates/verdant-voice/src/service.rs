//! Voice command capture and interpretation.
//!
//! Voice interaction is single-shot and exclusive: one utterance is
//! captured at a time, interpreted remotely, and reported through a
//! caller-supplied callback. The session state machine is deliberately
//! minimal: Idle → Listening → Processing → Idle, with every error path
//! returning directly to Idle.

use crate::error::VoiceError;
use crate::platform::SpeechPlatform;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use verdant_core::{InitError, InitGuard, VoiceConfig};
use verdant_remote::CareBackend;

const SERVICE_NAME: &str = "voice command service";

/// A successfully interpreted utterance.
#[derive(Debug, Clone)]
pub struct RecognizedCommand {
    /// Raw transcript as captured
    pub transcript: String,
    /// Normalized form of the command
    pub processed_command: String,
    /// Interpreted intent name
    pub intent: String,
    /// Extracted parameters keyed by entity name
    pub entities: HashMap<String, serde_json::Value>,
    /// Interpreter confidence in [0, 1]
    pub confidence: f64,
}

/// Terminal outcome of one capture session, delivered via the
/// `start_listening` callback.
#[derive(Debug, Clone)]
pub enum VoiceCommandOutcome {
    /// The utterance was captured and interpreted
    Recognized(RecognizedCommand),
    /// Capture or interpretation failed
    Failed {
        /// Transcript, when capture itself succeeded
        transcript: Option<String>,
        /// Failure description
        error: String,
    },
}

enum Phase {
    Idle,
    Listening { cancel: CancellationToken },
    Processing,
}

/// State shared with the spawned session task.
struct SessionCore {
    backend: Arc<dyn CareBackend>,
    platform: Arc<dyn SpeechPlatform>,
    vocabulary: RwLock<Vec<String>>,
    available: AtomicBool,
    phase: Mutex<Phase>,
    context_tag: String,
}

impl SessionCore {
    fn set_phase(&self, next: Phase) {
        *self.phase.lock().expect("voice phase lock poisoned") = next;
    }

    async fn run_session<F>(&self, cancel: CancellationToken, on_result: F)
    where
        F: FnOnce(VoiceCommandOutcome) + Send + 'static,
    {
        let captured: Result<String, VoiceError> = tokio::select! {
            () = cancel.cancelled() => return,
            result = self.platform.capture() => result,
        };

        // stop_listening may race the capture resolving; honor the stop
        if cancel.is_cancelled() {
            return;
        }

        let transcript = match captured {
            Ok(transcript) => transcript,
            Err(e) => {
                tracing::warn!("voice capture failed: {e}");
                self.set_phase(Phase::Idle);
                on_result(VoiceCommandOutcome::Failed {
                    transcript: None,
                    error: e.to_string(),
                });
                return;
            }
        };

        self.set_phase(Phase::Processing);
        let vocabulary = self
            .vocabulary
            .read()
            .expect("vocabulary lock poisoned")
            .clone();
        let interpreted = self
            .backend
            .interpret_voice(&transcript, &vocabulary, &self.context_tag)
            .await;
        self.set_phase(Phase::Idle);

        let outcome = match interpreted {
            Ok(response) if response.success => {
                VoiceCommandOutcome::Recognized(RecognizedCommand {
                    processed_command: response
                        .processed_command
                        .unwrap_or_else(|| transcript.clone()),
                    intent: response.intent.unwrap_or_default(),
                    entities: response.entities,
                    confidence: response.confidence.unwrap_or(0.0),
                    transcript,
                })
            }
            Ok(response) => VoiceCommandOutcome::Failed {
                error: response
                    .message
                    .unwrap_or_else(|| "voice interpretation rejected".to_string()),
                transcript: Some(transcript),
            },
            Err(e) => VoiceCommandOutcome::Failed {
                error: e.to_string(),
                transcript: Some(transcript),
            },
        };
        on_result(outcome);
    }
}

/// Manages the single exclusive voice capture session and fire-and-forget
/// speech playback.
pub struct VoiceCommandService {
    core: Arc<SessionCore>,
    guard: InitGuard,
    enabled: bool,
}

impl VoiceCommandService {
    /// Create a voice service over the given backend and speech platform.
    #[must_use]
    pub fn new(
        backend: Arc<dyn CareBackend>,
        platform: Arc<dyn SpeechPlatform>,
        config: &VoiceConfig,
    ) -> Self {
        Self {
            core: Arc::new(SessionCore {
                backend,
                platform,
                vocabulary: RwLock::new(Vec::new()),
                available: AtomicBool::new(false),
                phase: Mutex::new(Phase::Idle),
                context_tag: config.context_tag.clone(),
            }),
            guard: InitGuard::new(SERVICE_NAME),
            enabled: config.enabled,
        }
    }

    /// Load the command vocabulary and probe the speech platform.
    ///
    /// A missing capture/synthesis capability degrades voice to
    /// unavailable without failing initialization; only a vocabulary
    /// fetch failure fails the call.
    pub async fn initialize(&self) -> Result<(), InitError> {
        let core = Arc::clone(&self.core);
        let enabled = self.enabled;
        self.guard
            .ensure(move || async move {
                let vocabulary =
                    core.backend
                        .load_vocabulary()
                        .await
                        .map_err(|e| InitError::Failed {
                            service: SERVICE_NAME,
                            message: e.to_string(),
                        })?;
                *core.vocabulary.write().expect("vocabulary lock poisoned") = vocabulary.words;

                let available = enabled && core.platform.is_available();
                core.available.store(available, Ordering::SeqCst);
                if available {
                    tracing::debug!("voice commands ready");
                } else {
                    tracing::info!("speech platform unavailable; voice commands degraded");
                }
                Ok(())
            })
            .await
    }

    /// Whether initialization has completed successfully.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.guard.is_ready()
    }

    /// Whether voice capture is usable on this platform.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.core.available.load(Ordering::SeqCst)
    }

    /// Whether a capture session is currently listening.
    #[must_use]
    pub fn is_listening(&self) -> bool {
        matches!(
            *self.core.phase.lock().expect("voice phase lock poisoned"),
            Phase::Listening { .. }
        )
    }

    /// Begin a single exclusive capture session.
    ///
    /// Returns `false` — and never invokes `on_result` — when the service
    /// is uninitialized, voice is unavailable, or a session is already
    /// listening. Otherwise the session captures one utterance, submits
    /// it with the vocabulary for intent interpretation, returns the
    /// machine to idle, and then invokes `on_result` with the outcome.
    pub fn start_listening<F>(&self, on_result: F) -> bool
    where
        F: FnOnce(VoiceCommandOutcome) + Send + 'static,
    {
        if !self.guard.is_ready() || !self.core.available.load(Ordering::SeqCst) {
            return false;
        }

        let cancel = CancellationToken::new();
        {
            let mut phase = self.core.phase.lock().expect("voice phase lock poisoned");
            if !matches!(*phase, Phase::Idle) {
                tracing::debug!("capture session already active; rejecting");
                return false;
            }
            *phase = Phase::Listening {
                cancel: cancel.clone(),
            };
        }

        let core = Arc::clone(&self.core);
        tokio::spawn(async move {
            core.run_session(cancel, on_result).await;
        });
        true
    }

    /// Cancel the pending capture.
    ///
    /// Effectual only while listening: the machine returns to idle and
    /// the session callback is never invoked. A no-op in any other phase.
    pub fn stop_listening(&self) {
        let mut phase = self.core.phase.lock().expect("voice phase lock poisoned");
        if let Phase::Listening { cancel } = &*phase {
            cancel.cancel();
            *phase = Phase::Idle;
            tracing::debug!("voice capture cancelled");
        }
    }

    /// Fire-and-forget speech playback.
    ///
    /// A no-op when voice is unavailable; never blocks and never touches
    /// session state.
    pub fn speak(&self, text: &str) {
        if !self.core.available.load(Ordering::SeqCst) {
            return;
        }

        let platform = Arc::clone(&self.core.platform);
        let text = text.to_string();
        tokio::spawn(async move {
            if let Err(e) = platform.speak(&text).await {
                tracing::warn!("speech synthesis failed: {e}");
            }
        });
    }
}

impl std::fmt::Debug for VoiceCommandService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let phase = match *self.core.phase.lock().expect("voice phase lock poisoned") {
            Phase::Idle => "idle",
            Phase::Listening { .. } => "listening",
            Phase::Processing => "processing",
        };
        f.debug_struct("VoiceCommandService")
            .field("initialized", &self.guard.is_ready())
            .field("available", &self.core.available.load(Ordering::SeqCst))
            .field("phase", &phase)
            .finish()
    }
}
