//! The single mutable session state and its synchronous transitions.
//!
//! Extraction and generation transitions live in [`crate::extraction`] and
//! [`crate::generation`]; everything here completes immediately.

use std::collections::HashMap;

use redacta_ai::UploadedFile;
use redacta_core::{DocumentType, FormData, blank_fields};
use tracing::info;

use crate::error::PipelineError;

/// Session state.
///
/// Created once with seeded form data per type and demo mode on. Fields are
/// private so the transitions below are the only mutators.
#[derive(Debug, Clone)]
pub struct ApplicationState {
    pub(crate) active: DocumentType,
    pub(crate) forms: HashMap<DocumentType, FormData>,
    pub(crate) is_extracting: bool,
    pub(crate) is_generating: bool,
    pub(crate) is_demo_mode: bool,
    pub(crate) api_credential: String,
    pub(crate) last_error: Option<String>,
    pub(crate) last_document: Option<String>,
    pub(crate) extractor_panel_visible: bool,
    pub(crate) uploaded_file: Option<UploadedFile>,
}

impl Default for ApplicationState {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl ApplicationState {
    /// Fresh session in demo mode, starting on the power-of-attorney form.
    ///
    /// `api_credential` is whatever the credential store held at startup.
    pub fn new(api_credential: String) -> Self {
        let forms = DocumentType::ALL
            .into_iter()
            .map(|ty| (ty, ty.profile().default_form_data()))
            .collect();
        Self {
            active: DocumentType::PowerOfAttorney,
            forms,
            is_extracting: false,
            is_generating: false,
            is_demo_mode: true,
            api_credential,
            last_error: None,
            last_document: None,
            extractor_panel_visible: true,
            uploaded_file: None,
        }
    }

    // ── Queries ──

    pub fn active_type(&self) -> DocumentType {
        self.active
    }

    pub fn form_data(&self, document_type: DocumentType) -> &FormData {
        // Every type is seeded in `new` and entries are never removed.
        &self.forms[&document_type]
    }

    pub fn active_form(&self) -> &FormData {
        self.form_data(self.active)
    }

    pub fn is_extracting(&self) -> bool {
        self.is_extracting
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    pub fn is_busy(&self) -> bool {
        self.is_extracting || self.is_generating
    }

    pub fn is_demo_mode(&self) -> bool {
        self.is_demo_mode
    }

    pub fn api_credential(&self) -> &str {
        &self.api_credential
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_document(&self) -> Option<&str> {
        self.last_document.as_deref()
    }

    pub fn extractor_panel_visible(&self) -> bool {
        self.extractor_panel_visible
    }

    pub fn uploaded_file(&self) -> Option<&UploadedFile> {
        self.uploaded_file.as_ref()
    }

    /// Required fields of the active form that are blank after trimming.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields(&self.active.profile().schema, self.active_form())
    }

    /// Whether the generate action may be offered.
    ///
    /// Pure function of the state: false while either pipeline is in flight,
    /// in live mode without a credential, or with any required field blank.
    pub fn can_generate(&self) -> bool {
        if self.is_busy() {
            return false;
        }
        if !self.is_demo_mode && self.api_credential.is_empty() {
            return false;
        }
        self.missing_fields().is_empty()
    }

    /// Whether the extract action may be offered.
    pub fn can_extract(&self) -> bool {
        self.uploaded_file.is_some() && !self.is_busy()
    }

    // ── Transitions ──

    /// Flip demo/live. Clears the output panel; form data, the uploaded file,
    /// and in-flight operations are left alone.
    pub fn toggle_mode(&mut self) {
        self.is_demo_mode = !self.is_demo_mode;
        self.reset_status();
        info!(demo = self.is_demo_mode, "mode toggled");
    }

    /// Replace the credential. Empty is accepted; it is checked at call time.
    pub fn set_credential(&mut self, value: impl Into<String>) {
        self.api_credential = value.into();
    }

    /// Switch document type. Clears the output panel and the uploaded file and
    /// re-opens the extractor panel. Both types' form data are kept.
    pub fn select_type(&mut self, document_type: DocumentType) {
        self.active = document_type;
        self.reset_status();
        self.uploaded_file = None;
        self.extractor_panel_visible = true;
        info!(document_type = document_type.as_str(), "document type selected");
    }

    pub fn select_file(&mut self, file: Option<UploadedFile>) {
        self.uploaded_file = file;
    }

    pub fn toggle_extractor_panel(&mut self) {
        self.extractor_panel_visible = !self.extractor_panel_visible;
    }

    /// Edit one field of the active form.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> Result<(), PipelineError> {
        if self.active.profile().schema.field(field).is_none() {
            return Err(PipelineError::UnknownField(field.to_string()));
        }
        self.active_form_mut().set(field, value);
        Ok(())
    }

    pub(crate) fn active_form_mut(&mut self) -> &mut FormData {
        self.forms.entry(self.active).or_default()
    }

    /// True when the active type or mode differs from the one an operation
    /// was started under.
    pub(crate) fn changed_since(&self, document_type: DocumentType, demo: bool) -> bool {
        document_type != self.active || demo != self.is_demo_mode
    }

    pub(crate) fn reset_status(&mut self) {
        self.last_error = None;
        self.last_document = None;
    }
}
