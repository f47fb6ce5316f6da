//
//  travis-client
//  api/context.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cancellation contexts for API calls.
//!
//! Every call takes a [`Context`]. A context can be cancelled explicitly
//! through a [`CancelHandle`], expire at a deadline, or never finish
//! ([`Context::background`]). Cancelling stops waiting for the network but
//! cannot undo work the server already started.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use travis_client::api::Context;
//!
//! let (ctx, handle) = Context::with_cancel();
//! assert!(!ctx.is_done());
//! handle.cancel();
//! assert!(ctx.is_done());
//!
//! let bounded = Context::background().with_timeout(Duration::from_secs(30));
//! assert!(!bounded.is_done());
//! ```

use std::fmt;
use std::future::pending;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

/// Why a context finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// [`CancelHandle::cancel`] was called.
    Canceled,
    /// The context deadline passed.
    DeadlineExceeded,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canceled => f.write_str("context canceled"),
            Self::DeadlineExceeded => f.write_str("context deadline exceeded"),
        }
    }
}

/// Carries cancellation and deadline information into a call.
///
/// Cheap to clone; clones observe the same cancellation signal.
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancel: Option<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

/// Cancels the [`Context`] it was created with.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Marks the paired context (and all of its clones) as cancelled.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl Context {
    /// A context that is never done.
    pub fn background() -> Self {
        Self::default()
    }

    /// A new cancellable context and the handle that cancels it.
    ///
    /// Dropping the handle without calling [`CancelHandle::cancel`] leaves
    /// the context running.
    pub fn with_cancel() -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let ctx = Self {
            cancel: Some(rx),
            deadline: None,
        };
        (ctx, CancelHandle { tx })
    }

    /// Derives a context that also expires after `timeout`.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Derives a context that also expires at `deadline`.
    ///
    /// An earlier existing deadline is kept.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        });
        self
    }

    /// The deadline of this context, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns why the context is done, or `None` while it is still live.
    pub fn reason(&self) -> Option<CancelReason> {
        if let Some(rx) = &self.cancel {
            if *rx.borrow() {
                return Some(CancelReason::Canceled);
            }
        }
        match self.deadline {
            Some(deadline) if deadline <= Instant::now() => Some(CancelReason::DeadlineExceeded),
            _ => None,
        }
    }

    /// Whether the context has been cancelled or has expired.
    pub fn is_done(&self) -> bool {
        self.reason().is_some()
    }

    /// Completes once the context is done and yields the reason.
    ///
    /// Never completes for a background context.
    pub async fn done(&self) -> CancelReason {
        let cancelled = async {
            match &self.cancel {
                Some(rx) => {
                    let mut rx = rx.clone();
                    let outcome = rx.wait_for(|cancelled| *cancelled).await.map(|_| ());
                    if outcome.is_err() {
                        // handle dropped without cancelling
                        pending::<()>().await;
                    }
                }
                None => pending::<()>().await,
            }
        };
        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => pending::<()>().await,
            }
        };

        tokio::select! {
            _ = cancelled => CancelReason::Canceled,
            _ = expired => CancelReason::DeadlineExceeded,
        }
    }
}
