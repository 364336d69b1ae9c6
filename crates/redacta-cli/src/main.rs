mod credentials;
mod display;
mod draft;
mod repl;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use redacta_ai::GeminiClient;
use redacta_ai::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use redacta_core::DocumentType;
use redacta_session::Session;
use tracing_subscriber::EnvFilter;

use crate::credentials::FileCredentialStore;

/// Draft a power of attorney or a lawsuit response from a form or a scanned document.
#[derive(Parser)]
#[command(name = "redacta", version)]
struct Cli {
    /// Start in live mode (Gemini API) instead of demo mode
    #[arg(long, global = true)]
    live: bool,

    /// Gemini API key; overrides the stored one
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Gemini model used for extraction and generation
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL, global = true)]
    model: String,

    /// Gemini API base URL
    #[arg(long, env = "GEMINI_API_BASE", default_value = DEFAULT_BASE_URL, global = true)]
    api_base: String,

    /// File where the API key is stored between sessions
    #[arg(long, env = "REDACTA_CREDENTIAL_FILE", global = true)]
    credential_file: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive session (default)
    Session,

    /// Produce one document and exit
    Draft {
        /// Document type: poder | demanda
        #[arg(long = "type", value_name = "TIPO")]
        document_type: DocumentType,

        /// Image to extract fields from (path or data: URL)
        #[arg(long)]
        file: Option<String>,

        /// JSON object of field values
        #[arg(long)]
        data: Option<PathBuf>,

        /// Set a field, e.g. --set grantorName="ANA ROJAS" (repeatable)
        #[arg(long = "set", value_name = "CAMPO=VALOR", value_parser = draft::parse_assignment)]
        overrides: Vec<(String, String)>,

        /// Write the document here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::info!("redacta v{}", env!("CARGO_PKG_VERSION"));

    let store_path = cli
        .credential_file
        .clone()
        .or_else(FileCredentialStore::default_path)
        .unwrap_or_else(|| PathBuf::from(".redacta-gemini-api-key"));
    let store = FileCredentialStore::new(store_path);
    tracing::debug!(path = %store.path().display(), "credential store");
    let credential = credentials::resolve_credential(cli.api_key.clone(), &store);

    let ai = Arc::new(GeminiClient::new(cli.api_base.clone(), cli.model.clone()));
    tracing::debug!(model = ai.model(), "gemini client ready");
    let mut session = Session::new(ai, credential);
    if cli.live {
        session.state_mut().toggle_mode();
    }

    match cli.command.unwrap_or(Command::Session) {
        Command::Session => repl::run(&mut session, &store).await,
        Command::Draft {
            document_type,
            file,
            data,
            overrides,
            out,
        } => {
            let request = draft::DraftRequest {
                document_type,
                file,
                data,
                overrides,
                out,
            };
            draft::run(&mut session, request).await
        }
    }
}
