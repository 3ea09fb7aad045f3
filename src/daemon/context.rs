//! Wait Context
//!
//! Cancellation and deadline primitive handed to blocking host operations.
//!
//! A `WaitContext` is cheap to clone; every clone observes the same
//! `CancelHandle`. Dropping the handle without calling `cancel()` never
//! cancels the context: it stays live until its deadline, if any.

use std::fmt;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

/// Why a wait ended early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// `CancelHandle::cancel` was called
    Cancelled,
    /// The context deadline passed
    DeadlineExceeded,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => write!(f, "context cancelled"),
            Self::DeadlineExceeded => write!(f, "context deadline exceeded"),
        }
    }
}

/// Cancels every clone of the `WaitContext` it was created with.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Cancel the context. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Cancellation signal plus optional deadline
#[derive(Debug, Clone)]
pub struct WaitContext {
    cancelled: watch::Receiver<bool>,
    deadline: Option<Instant>,
}

impl WaitContext {
    /// Create a cancellable context with no deadline.
    pub fn new() -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        (
            Self {
                cancelled: rx,
                deadline: None,
            },
            CancelHandle { tx },
        )
    }

    /// Create a context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        let (ctx, _handle) = Self::new();
        ctx
    }

    /// Derive a context that also expires after `timeout`.
    ///
    /// An earlier existing deadline is kept. A timeout too large to
    /// represent as an instant adds no deadline.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// Derive a context that also expires at `deadline`.
    ///
    /// An earlier existing deadline is kept.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// The deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Check without waiting whether the context has ended.
    pub fn is_done(&self) -> bool {
        self.done_reason().is_some()
    }

    /// Reason the context has ended, if it has.
    pub fn done_reason(&self) -> Option<CancelReason> {
        if *self.cancelled.borrow() {
            return Some(CancelReason::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(CancelReason::DeadlineExceeded),
            _ => None,
        }
    }

    /// Wait until the context is cancelled or its deadline passes.
    pub async fn cancelled(&self) -> CancelReason {
        let mut rx = self.cancelled.clone();
        let signal = async move {
            loop {
                let fired = *rx.borrow_and_update();
                if fired {
                    return;
                }
                if rx.changed().await.is_err() {
                    // Handle dropped. Only a cancel sent before the drop counts.
                    let fired = *rx.borrow();
                    if fired {
                        return;
                    }
                    std::future::pending::<()>().await;
                }
            }
        };

        match self.deadline {
            Some(deadline) => tokio::select! {
                _ = signal => CancelReason::Cancelled,
                _ = tokio::time::sleep_until(deadline) => CancelReason::DeadlineExceeded,
            },
            None => {
                signal.await;
                CancelReason::Cancelled
            }
        }
    }
}
