//! Memoized one-time async initialization.
//!
//! Every Verdant capability service performs remote setup exactly once,
//! lazily, on first use. [`InitGuard`] provides that contract through
//! composition: callers that arrive while setup is in flight attach to
//! the pending attempt and observe its outcome, a failed attempt clears
//! so a later call may retry, and a successful attempt latches for the
//! lifetime of the guard.

use futures::future::{BoxFuture, FutureExt, Shared};
use std::future::Future;
use std::sync::Mutex;
use thiserror::Error;

/// Errors surfaced by the initialization contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    /// A capability was used before its initialization completed successfully.
    #[error("{service} used before successful initialization")]
    NotInitialized {
        /// Name of the capability service
        service: &'static str,
    },

    /// Initialization itself failed (remote rejection or missing platform capability).
    #[error("initialization of {service} failed: {message}")]
    Failed {
        /// Name of the capability service
        service: &'static str,
        /// Underlying failure description
        message: String,
    },
}

type SharedInit = Shared<BoxFuture<'static, Result<(), InitError>>>;

enum GuardState {
    Uninit,
    InFlight { epoch: u64, attempt: SharedInit },
    Ready,
}

struct Inner {
    next_epoch: u64,
    state: GuardState,
}

/// Lazy, memoized, concurrency-safe one-time async setup.
///
/// Held by each capability service through composition. The only state
/// needing mutual exclusion is the in-flight marker; the lock is never
/// held across an await point.
pub struct InitGuard {
    service: &'static str,
    inner: Mutex<Inner>,
}

impl InitGuard {
    /// Create a guard for the named capability service.
    #[must_use]
    pub fn new(service: &'static str) -> Self {
        Self {
            service,
            inner: Mutex::new(Inner {
                next_epoch: 0,
                state: GuardState::Uninit,
            }),
        }
    }

    /// Name of the capability service this guard protects.
    #[must_use]
    pub fn service(&self) -> &'static str {
        self.service
    }

    /// Whether initialization has completed successfully.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(
            self.inner.lock().expect("init guard lock poisoned").state,
            GuardState::Ready
        )
    }

    /// Fail fast when a capability is used before successful initialization.
    pub fn require_ready(&self) -> Result<(), InitError> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(InitError::NotInitialized {
                service: self.service,
            })
        }
    }

    /// Run `init` at most once, attaching concurrent callers to the
    /// in-flight attempt.
    ///
    /// Returns immediately when already initialized. All callers awaiting
    /// one attempt observe its outcome; on failure the in-flight marker
    /// clears so a later call starts a fresh attempt.
    pub async fn ensure<F, Fut>(&self, init: F) -> Result<(), InitError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), InitError>> + Send + 'static,
    {
        let (epoch, attempt) = {
            let mut inner = self.inner.lock().expect("init guard lock poisoned");
            match &inner.state {
                GuardState::Ready => return Ok(()),
                GuardState::InFlight { epoch, attempt } => (*epoch, attempt.clone()),
                GuardState::Uninit => {
                    tracing::debug!(service = self.service, "starting initialization");
                    let attempt = init().boxed().shared();
                    let epoch = inner.next_epoch;
                    inner.next_epoch += 1;
                    inner.state = GuardState::InFlight {
                        epoch,
                        attempt: attempt.clone(),
                    };
                    (epoch, attempt)
                }
            }
        };

        let result = attempt.await;

        // Settle the attempt we awaited. A concurrent settler may already
        // have done this, or a newer attempt may have started after a
        // failure; the epoch check keeps us from clobbering either.
        let mut inner = self.inner.lock().expect("init guard lock poisoned");
        let ours = matches!(
            &inner.state,
            GuardState::InFlight { epoch: current, .. } if *current == epoch
        );
        if ours {
            inner.state = if result.is_ok() {
                tracing::debug!(service = self.service, "initialization complete");
                GuardState::Ready
            } else {
                tracing::warn!(service = self.service, "initialization failed");
                GuardState::Uninit
            };
        }

        result
    }
}

impl std::fmt::Debug for InitGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.inner.lock().expect("init guard lock poisoned").state {
            GuardState::Uninit => "uninitialized",
            GuardState::InFlight { .. } => "in-flight",
            GuardState::Ready => "ready",
        };
        f.debug_struct("InitGuard")
            .field("service", &self.service)
            .field("state", &state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_ensure_runs_setup_once() {
        let guard = Arc::new(InitGuard::new("test capability"));
        let attempts = Arc::new(AtomicU32::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let guard = Arc::clone(&guard);
            let attempts = Arc::clone(&attempts);
            handles.push(tokio::spawn(async move {
                guard
                    .ensure(move || async move {
                        attempts.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Ok(())
                    })
                    .await
            }));
        }

        for handle in handles {
            assert!(handle.await.expect("join").is_ok());
        }
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert!(guard.is_ready());
    }

    #[tokio::test(start_paused = true)]
    async fn test_attached_callers_observe_same_failure() {
        let guard = Arc::new(InitGuard::new("test capability"));
        let attempts = Arc::new(AtomicU32::new(0));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let guard = Arc::clone(&guard);
            let attempts = Arc::clone(&attempts);
            handles.push(tokio::spawn(async move {
                guard
                    .ensure(move || async move {
                        attempts.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Err(InitError::Failed {
                            service: "test capability",
                            message: "model load refused".to_string(),
                        })
                    })
                    .await
            }));
        }

        for handle in handles {
            let err = handle.await.expect("join").expect_err("should fail");
            assert_eq!(
                err,
                InitError::Failed {
                    service: "test capability",
                    message: "model load refused".to_string(),
                }
            );
        }
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert!(!guard.is_ready());
    }

    #[tokio::test]
    async fn test_failure_clears_in_flight_and_allows_retry() {
        let guard = InitGuard::new("test capability");

        let result = guard
            .ensure(|| async {
                Err(InitError::Failed {
                    service: "test capability",
                    message: "transient".to_string(),
                })
            })
            .await;
        assert!(result.is_err());
        assert!(!guard.is_ready());

        let result = guard.ensure(|| async { Ok(()) }).await;
        assert!(result.is_ok());
        assert!(guard.is_ready());
    }

    #[tokio::test]
    async fn test_ensure_is_idempotent_after_success() {
        let guard = InitGuard::new("test capability");
        let attempts = Arc::new(AtomicU32::new(0));

        for _ in 0..3 {
            let attempts = Arc::clone(&attempts);
            guard
                .ensure(move || async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
                .await
                .expect("init");
        }

        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_require_ready() {
        let guard = InitGuard::new("test capability");
        assert_eq!(
            guard.require_ready(),
            Err(InitError::NotInitialized {
                service: "test capability"
            })
        );

        guard.ensure(|| async { Ok(()) }).await.expect("init");
        assert!(guard.require_ready().is_ok());
    }
}
