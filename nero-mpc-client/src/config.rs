//! Session configuration and cooperative cancellation.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;

use crate::error::{ClientResult, Error};

/// Configuration shared by every session type. Passed explicitly by the
/// host application rather than read from ambient global state.
#[derive(Clone, Copy, Debug)]
pub struct SessionConfig {
    /// Wall-clock budget for a single protocol round. Expiry
    /// aborts the session with [`crate::Error::Timeout`].
    pub round_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            round_timeout: Duration::from_secs(30),
        }
    }
}

struct CancelState {
    cancelled: AtomicBool,
    notify: Notify,
}

/// A cooperative cancellation signal shared across every round of a running
/// session. Clones refer to the same underlying signal; call `cancel()` to
/// abort the in-flight round (and every subsequent one) across all clones.
#[derive(Clone)]
pub struct CancelToken(Arc<CancelState>);

impl CancelToken {
    /// Builds a fresh, uncancelled token.
    pub fn new() -> Self {
        Self(Arc::new(CancelState {
            cancelled: AtomicBool::new(false),
            notify: Notify::new(),
        }))
    }

    /// Marks this token (and every clone of it) cancelled, waking any round
    /// currently waiting on [`CancelToken::cancelled`].
    pub fn cancel(&self) {
        self.0.cancelled.store(true, Ordering::SeqCst);
        self.0.notify.notify_waiters();
    }

    /// Whether `cancel()` has been called on this token or a clone of it.
    pub fn is_cancelled(&self) -> bool {
        self.0.cancelled.load(Ordering::SeqCst)
    }

    async fn cancelled(&self) {
        if self.is_cancelled() {
            return;
        }
        self.0.notify.notified().await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Races `fut` against `config.round_timeout` and, if given, `cancel`.
/// Every session driver wraps each `Transport` round-trip in this so a
/// wedged backend can't hang a session past its configured budget.
pub(crate) async fn guarded_round<F, T>(
    config: &SessionConfig,
    cancel: Option<&CancelToken>,
    fut: F,
) -> ClientResult<T>
where
    F: Future<Output = Result<T, String>>,
{
    let timed = tokio::time::timeout(config.round_timeout, fut);
    match cancel {
        Some(cancel) => {
            tokio::select! {
                res = timed => res.map_err(|_| Error::Timeout)?.map_err(Error::Transport),
                () = cancel.cancelled() => Err(Error::Cancelled),
            }
        }
        None => timed
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(Error::Transport),
    }
}
