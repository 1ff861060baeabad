//! Session lifecycle tracking.
//!
//! A small state holder embedded by session implementations instead of
//! each backend re-deriving its own "started" bookkeeping.

use crate::error::{SessionError, SessionResult};

/// Lifecycle of a request-scoped session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionLifecycle {
    /// `start()` has not run yet; accessors fail.
    #[default]
    NotStarted,
    /// `start()` has run; the record is loaded and mutable.
    Started,
    /// `destroy()` has run; the record reads as empty until a new `start()`.
    Destroyed,
}

/// Embeddable lifecycle holder shared by session implementations.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    lifecycle: SessionLifecycle,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lifecycle(&self) -> SessionLifecycle {
        self.lifecycle
    }

    pub fn is_started(&self) -> bool {
        self.lifecycle == SessionLifecycle::Started
    }

    pub fn mark_started(&mut self) {
        self.lifecycle = SessionLifecycle::Started;
    }

    pub fn mark_destroyed(&mut self) {
        self.lifecycle = SessionLifecycle::Destroyed;
    }

    /// Fail unless `start()` has run at least once in this lifecycle.
    ///
    /// A destroyed session stays accessible (its record reads as empty);
    /// only a session that was never started is a caller error.
    pub fn ensure_accessible(&self) -> SessionResult<()> {
        match self.lifecycle {
            SessionLifecycle::NotStarted => Err(SessionError::NotStarted),
            SessionLifecycle::Started | SessionLifecycle::Destroyed => Ok(()),
        }
    }
}
