//! Core types for Redacta: document types, field schemas, the per-type registry,
//! and the extraction merge policy.

pub mod document;
pub mod merge;
pub mod prompt;
pub mod registry;
pub mod schema;

pub use document::{DocumentType, FormData, UnknownDocumentType};
pub use merge::{blank_fields, merge_extraction, normalize_extraction};
pub use registry::{DocumentProfile, PromptBuilder, lookup};
pub use schema::{FieldSchema, FieldSpec};
