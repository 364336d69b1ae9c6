//! AI layer: the collaborator seam used in live mode and its Gemini implementation.

mod error;
pub mod file;
pub mod gemini;
mod service;

pub use error::{AiError, FileError};
pub use file::{InlineFile, UploadedFile, strip_data_url_prefix};
pub use gemini::GeminiClient;
pub use service::DocumentAi;
