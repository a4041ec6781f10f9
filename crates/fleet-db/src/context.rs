//! # Request Context
//!
//! Cancellation and deadline carried by every store call.
//!
//! ```text
//! caller ── RequestContext { deadline, cancel } ──► store op
//!                                                     │
//!            select! ┌────────────────────────────────┤
//!                    │ op future       → Ok / Err     │
//!                    │ cancel fired    → Cancelled    │
//!                    │ deadline passed → Timeout      │
//!                    └────────────────────────────────┘
//! ```
//!
//! When the cancel or deadline branch wins, the operation future is dropped.
//! Any transaction it held is dropped uncommitted and sqlx rolls it back when
//! the connection returns to the pool.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::error::{DbError, DbResult};

/// Request-scoped execution context.
///
/// Cheap to clone; clones share the same cancellation signal.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancel: Option<watch::Receiver<bool>>,
}

/// Fires the cancellation signal of the context it was created with.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Cancels every context sharing this signal.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl RequestContext {
    /// A context that never times out and cannot be cancelled.
    pub fn background() -> Self {
        RequestContext::default()
    }

    /// A context whose deadline is `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        RequestContext::background().deadline(Instant::now() + timeout)
    }

    /// Sets an absolute deadline, keeping the earlier one if already set.
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        });
        self
    }

    /// Attaches a fresh cancellation signal.
    pub fn cancellable(mut self) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        self.cancel = Some(rx);
        (self, CancelHandle { tx })
    }

    /// Returns the deadline, if any.
    pub fn expires_at(&self) -> Option<Instant> {
        self.deadline
    }

    /// True once the cancel handle has fired.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// True once the deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Fails fast if the context is already done.
    pub fn check(&self) -> DbResult<()> {
        if self.is_cancelled() {
            return Err(DbError::Cancelled);
        }
        if self.is_expired() {
            return Err(DbError::Timeout);
        }
        Ok(())
    }

    /// Drives `op` to completion unless the context is cancelled or expires
    /// first.
    pub async fn run<T, F>(&self, op: F) -> DbResult<T>
    where
        F: Future<Output = DbResult<T>>,
    {
        self.check()?;

        tokio::select! {
            biased;
            _ = cancelled(self.cancel.clone()) => Err(DbError::Cancelled),
            _ = expired(self.deadline) => Err(DbError::Timeout),
            result = op => result,
        }
    }
}

async fn cancelled(cancel: Option<watch::Receiver<bool>>) {
    if let Some(mut rx) = cancel {
        // A dropped handle can never cancel, so fall through to pending.
        if rx.wait_for(|cancelled| *cancelled).await.is_ok() {
            return;
        }
    }
    std::future::pending::<()>().await
}

async fn expired(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
