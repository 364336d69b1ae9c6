use redacta_ai::AiError;
use thiserror::Error;

/// A pipeline outcome the user has to see.
///
/// `Display` is the user-facing sentence. Wrapped collaborator errors are kept
/// as the `source` for logging and never appear in the message.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(
        "La clave API de Gemini no ha sido proporcionada. Por favor, ingrésela para continuar."
    )]
    MissingCredential,

    #[error(
        "Error al extraer datos del documento. Verifique su clave API, que el archivo sea claro \
         y corresponda al tipo de documento seleccionado."
    )]
    Extraction(#[source] AiError),

    #[error(
        "Ocurrió un error al comunicarse con la IA. Verifique su clave API o intente de nuevo \
         más tarde."
    )]
    Generation(#[source] AiError),

    #[error("Hay una operación en curso. Espere a que termine.")]
    Busy,

    #[error("Seleccione un archivo antes de extraer datos.")]
    NoFile,

    #[error("El campo '{0}' no existe en este documento.")]
    UnknownField(String),
}

impl PipelineError {
    pub(crate) fn extraction(err: AiError) -> Self {
        match err {
            AiError::MissingCredential => Self::MissingCredential,
            other => Self::Extraction(other),
        }
    }

    pub(crate) fn generation(err: AiError) -> Self {
        match err {
            AiError::MissingCredential => Self::MissingCredential,
            other => Self::Generation(other),
        }
    }

    /// True when the request was refused without touching the session state.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Busy | Self::NoFile | Self::UnknownField(_))
    }
}
