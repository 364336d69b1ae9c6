//! Generation pipeline: turn the active form into a document body.
//!
//! Same begin/run/finish split as extraction. A result is all-or-nothing:
//! after `finish_generation` exactly one of the last document or the last
//! error is set.

use std::time::Duration;

use redacta_ai::DocumentAi;
use redacta_core::{DocumentType, FormData};
use tracing::{info, warn};

use crate::error::PipelineError;
use crate::state::ApplicationState;

/// Form snapshot and mode captured when a generation starts.
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    pub document_type: DocumentType,
    pub demo: bool,
    credential: String,
    form: FormData,
}

impl ApplicationState {
    /// Start a generation for the active type.
    ///
    /// Only the in-flight check happens here. Field completeness and the
    /// live-mode credential are gated by [`ApplicationState::can_generate`].
    pub fn begin_generation(&mut self) -> Result<GenerationTicket, PipelineError> {
        if self.is_busy() {
            return Err(PipelineError::Busy);
        }

        self.is_generating = true;
        self.reset_status();
        info!(
            document_type = self.active.as_str(),
            demo = self.is_demo_mode,
            "generation started"
        );

        Ok(GenerationTicket {
            document_type: self.active,
            demo: self.is_demo_mode,
            credential: self.api_credential.clone(),
            form: self.active_form().clone(),
        })
    }

    pub fn finish_generation(
        &mut self,
        ticket: &GenerationTicket,
        outcome: Result<String, PipelineError>,
    ) {
        self.is_generating = false;

        match outcome {
            Ok(document) => {
                if self.changed_since(ticket.document_type, ticket.demo) {
                    warn!(
                        issued_for = ticket.document_type.as_str(),
                        active = self.active.as_str(),
                        demo = self.is_demo_mode,
                        "generation finished after the session changed"
                    );
                }
                info!(chars = document.chars().count(), "document generated");
                self.last_error = None;
                self.last_document = Some(document);
            }
            Err(err) => {
                warn!(error = ?err, "generation failed");
                self.last_document = None;
                self.last_error = Some(err.to_string());
            }
        }
    }
}

/// Produce the document body for a ticket.
///
/// Demo mode sleeps for `demo_delay` and returns the type's canned document,
/// ignoring the form. Live mode builds the type's prompt from the snapshot and
/// returns the collaborator's text as-is.
pub async fn run_generation(
    ticket: &GenerationTicket,
    ai: &dyn DocumentAi,
    demo_delay: Duration,
) -> Result<String, PipelineError> {
    let profile = ticket.document_type.profile();

    if ticket.demo {
        tokio::time::sleep(demo_delay).await;
        return Ok(profile.demo_document.to_string());
    }

    if ticket.credential.is_empty() {
        return Err(PipelineError::MissingCredential);
    }

    let prompt = profile.build_prompt(&ticket.form);
    ai.generate_text(&ticket.credential, &prompt)
        .await
        .map_err(PipelineError::generation)
}
