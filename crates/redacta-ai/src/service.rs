use async_trait::async_trait;
use redacta_core::{FieldSchema, FormData};

use crate::error::AiError;
use crate::file::InlineFile;

/// The generative-AI service used in live mode.
///
/// Implementations must fail with [`AiError::MissingCredential`] before making
/// any request when `credential` is empty.
#[async_trait]
pub trait DocumentAi: Send + Sync {
    /// Read the fields described by `schema` out of an image.
    ///
    /// The result may contain any subset of the schema's field names.
    async fn extract(
        &self,
        credential: &str,
        file: &InlineFile,
        schema: &FieldSchema,
        type_hint: &str,
    ) -> Result<FormData, AiError>;

    /// Generate a document body from a prompt.
    async fn generate_text(&self, credential: &str, prompt: &str) -> Result<String, AiError>;
}
