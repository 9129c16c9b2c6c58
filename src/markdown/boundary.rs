//! Failure isolation for preview rendering
//!
//! `RenderBoundary` runs a render step and stores either its output or the
//! failure. Both `Err` results and panics count as failures. Once failed,
//! the boundary stays failed until `retry` resets it to the not-attempted
//! state; the next `render` call then tries again.

use crate::error::{Error, Result};
use log::{debug, error};
use std::panic::{self, AssertUnwindSafe};

/// State of the preview render.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderState<T> {
    /// Nothing rendered yet, or reset by retry
    NotAttempted,
    /// Output for the given document revision
    Rendered { revision: u64, output: T },
    /// Rendering failed; shown as a static panel until retried
    Failed { message: String },
}

/// Catch-and-recover wrapper around a render step.
#[derive(Debug)]
pub struct RenderBoundary<T> {
    state: RenderState<T>,
}

impl<T> Default for RenderBoundary<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RenderBoundary<T> {
    pub fn new() -> Self {
        Self {
            state: RenderState::NotAttempted,
        }
    }

    /// Whether `render` would run for `revision`.
    pub fn needs_render(&self, revision: u64) -> bool {
        match &self.state {
            RenderState::NotAttempted => true,
            RenderState::Rendered { revision: last, .. } => *last != revision,
            RenderState::Failed { .. } => false,
        }
    }

    /// Render `revision` with `render` unless it is already current or the
    /// boundary is in the failed state.
    pub fn render<F>(&mut self, revision: u64, render: F) -> &RenderState<T>
    where
        F: FnOnce() -> Result<T>,
    {
        if !self.needs_render(revision) {
            return &self.state;
        }

        self.state = match catch_render(render) {
            Ok(output) => {
                debug!("Rendered preview for revision {}", revision);
                RenderState::Rendered { revision, output }
            }
            Err(err) => {
                error!("Preview render failed at revision {}: {}", revision, err);
                RenderState::Failed {
                    message: err.to_string(),
                }
            }
        };

        &self.state
    }

    /// Clear the failure; the next `render` call re-attempts.
    pub fn retry(&mut self) {
        debug!("Resetting preview render state");
        self.state = RenderState::NotAttempted;
    }
}

/// Run a render step, converting a panic into `Error::Render`.
pub(crate) fn catch_render<T, F>(render: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    match panic::catch_unwind(AssertUnwindSafe(render)) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "renderer panicked".to_string());
            Err(Error::Render(message))
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
