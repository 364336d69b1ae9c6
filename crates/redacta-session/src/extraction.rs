//! Extraction pipeline: fill the active form from an uploaded image.
//!
//! Split in three so the session state is never held across the suspension
//! point: [`ApplicationState::begin_extraction`] captures a ticket,
//! [`run_extraction`] waits on the fixture delay or the collaborator, and
//! [`ApplicationState::finish_extraction`] applies the outcome.

use std::time::Duration;

use redacta_ai::{DocumentAi, UploadedFile};
use redacta_core::{DocumentType, FormData, merge_extraction, normalize_extraction};
use tracing::{info, warn};

use crate::error::PipelineError;
use crate::state::ApplicationState;

/// Everything an extraction needs, captured when it starts.
#[derive(Debug, Clone)]
pub struct ExtractionTicket {
    pub document_type: DocumentType,
    pub demo: bool,
    credential: String,
    file: UploadedFile,
}

impl ApplicationState {
    /// Start an extraction for the active type.
    ///
    /// Refused without touching the state when no file is selected or another
    /// operation is in flight.
    pub fn begin_extraction(&mut self) -> Result<ExtractionTicket, PipelineError> {
        let Some(file) = self.uploaded_file.clone() else {
            return Err(PipelineError::NoFile);
        };
        if self.is_busy() {
            return Err(PipelineError::Busy);
        }

        self.is_extracting = true;
        self.reset_status();
        info!(
            document_type = self.active.as_str(),
            demo = self.is_demo_mode,
            file = %file.name,
            "extraction started"
        );

        Ok(ExtractionTicket {
            document_type: self.active,
            demo: self.is_demo_mode,
            credential: self.api_credential.clone(),
            file,
        })
    }

    /// Apply an extraction outcome.
    ///
    /// Success merges into the form of the type active *now*, which may differ
    /// from the ticket's when the user switched type mid-flight. Failure leaves
    /// every form untouched.
    pub fn finish_extraction(
        &mut self,
        ticket: &ExtractionTicket,
        outcome: Result<FormData, PipelineError>,
    ) {
        self.is_extracting = false;

        match outcome {
            Ok(extracted) => {
                if self.changed_since(ticket.document_type, ticket.demo) {
                    warn!(
                        issued_for = ticket.document_type.as_str(),
                        active = self.active.as_str(),
                        "extraction finished after the session changed; merging into active form"
                    );
                }
                let schema = self.active.profile().schema;
                let merged = merge_extraction(&schema, self.active_form(), &extracted);
                *self.active_form_mut() = merged;
                self.extractor_panel_visible = false;
                info!(fields = extracted.len(), "extraction merged");
            }
            Err(err) => {
                warn!(error = ?err, "extraction failed");
                self.last_error = Some(err.to_string());
            }
        }
    }
}

/// Produce the extracted fields for a ticket.
///
/// Demo mode sleeps for `demo_delay` and returns the type's fixture. Live mode
/// sends the file to `ai` and fills absent schema fields with `""`.
pub async fn run_extraction(
    ticket: &ExtractionTicket,
    ai: &dyn DocumentAi,
    demo_delay: Duration,
) -> Result<FormData, PipelineError> {
    let profile = ticket.document_type.profile();

    if ticket.demo {
        tokio::time::sleep(demo_delay).await;
        return Ok(profile.demo_extraction());
    }

    if ticket.credential.is_empty() {
        return Err(PipelineError::MissingCredential);
    }

    let inline = ticket.file.to_inline();
    let raw = ai
        .extract(
            &ticket.credential,
            &inline,
            &profile.schema,
            ticket.document_type.type_hint(),
        )
        .await
        .map_err(PipelineError::extraction)?;
    Ok(normalize_extraction(&profile.schema, &raw))
}
