//! Session controller: owns the application state and drives the extraction and
//! generation pipelines in demo or live mode.
//!
//! There is one flow of control. Each pipeline suspends only while waiting on
//! the demo delay or the AI collaborator, and all state changes happen before
//! or after that wait. Mode toggles and type switches never cancel an
//! operation in flight; its result lands on whatever type is active when it
//! completes.

pub mod error;
pub mod extraction;
pub mod generation;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use redacta_ai::DocumentAi;

pub use error::PipelineError;
pub use extraction::{ExtractionTicket, run_extraction};
pub use generation::{GenerationTicket, run_generation};
pub use state::ApplicationState;

/// Simulated latency for demo-mode operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoTiming {
    pub extraction: Duration,
    pub generation: Duration,
}

impl DemoTiming {
    pub const INSTANT: Self = Self {
        extraction: Duration::ZERO,
        generation: Duration::ZERO,
    };
}

impl Default for DemoTiming {
    fn default() -> Self {
        Self {
            extraction: Duration::from_millis(800),
            generation: Duration::from_millis(1200),
        }
    }
}

/// Owns the [`ApplicationState`] and the live-mode collaborator.
pub struct Session {
    state: ApplicationState,
    ai: Arc<dyn DocumentAi>,
    timing: DemoTiming,
}

impl Session {
    pub fn new(ai: Arc<dyn DocumentAi>, api_credential: String) -> Self {
        Self {
            state: ApplicationState::new(api_credential),
            ai,
            timing: DemoTiming::default(),
        }
    }

    pub fn with_timing(mut self, timing: DemoTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn state(&self) -> &ApplicationState {
        &self.state
    }

    /// Synchronous transitions (mode, credential, type, file, field edits).
    pub fn state_mut(&mut self) -> &mut ApplicationState {
        &mut self.state
    }

    /// Run one extraction to completion.
    ///
    /// Returns `Err` only when the request is refused (no file, busy). A
    /// failed extraction is recorded in [`ApplicationState::last_error`].
    pub async fn extract(&mut self) -> Result<(), PipelineError> {
        let ticket = self.state.begin_extraction()?;
        let outcome = run_extraction(&ticket, self.ai.as_ref(), self.timing.extraction).await;
        self.state.finish_extraction(&ticket, outcome);
        Ok(())
    }

    /// Run one generation to completion.
    ///
    /// Returns `Err` only when the request is refused (busy). The document or
    /// the failure message ends up in the state.
    pub async fn generate(&mut self) -> Result<(), PipelineError> {
        let ticket = self.state.begin_generation()?;
        let outcome = run_generation(&ticket, self.ai.as_ref(), self.timing.generation).await;
        self.state.finish_generation(&ticket, outcome);
        Ok(())
    }
}
