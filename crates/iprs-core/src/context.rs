//! Cancellation and deadlines for store and chain operations.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::CoreError;

/// Carries a cancellation signal and an optional deadline through async
/// operations.
///
/// Contexts form a tree: cancelling a parent cancels every child, and a child
/// deadline never extends past its parent's.
#[derive(Debug, Clone)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}

impl Context {
    /// A root context with no deadline that is never cancelled on its own.
    pub fn background() -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: None,
        }
    }

    /// A child context that also expires after `timeout`.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// A child context that also expires at `deadline`.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(parent) => parent.min(deadline),
            None => deadline,
        };
        Self {
            token: self.token.child_token(),
            deadline: Some(deadline),
        }
    }

    /// A child context sharing this context's deadline.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Cancel this context and all of its children.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether the deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Why this context is done, if it is.
    pub fn err(&self) -> Option<CoreError> {
        if self.is_cancelled() {
            Some(CoreError::Cancelled)
        } else if self.is_expired() {
            Some(CoreError::Timeout)
        } else {
            None
        }
    }

    /// Resolves once the context is cancelled or its deadline passes.
    pub async fn done(&self) -> CoreError {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => CoreError::Cancelled,
            _ = sleep_until(self.deadline) => CoreError::Timeout,
        }
    }

    /// Drive `fut` to completion unless the context finishes first.
    ///
    /// Cancellation maps to [`CoreError::Cancelled`] and an expired deadline
    /// to [`CoreError::Timeout`], converted into the caller's error type.
    pub async fn run<F, T, E>(&self, fut: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: From<CoreError>,
    {
        if let Some(err) = self.err() {
            return Err(err.into());
        }

        tokio::select! {
            biased;
            err = self.done() => Err(err.into()),
            out = fut => out,
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
