//! Interactive session over stdin: one command per line.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use redacta_ai::UploadedFile;
use redacta_core::DocumentType;
use redacta_session::{PipelineError, Session};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::credentials::CredentialStore;
use crate::display;

const HELP: &str = "\
Comandos:
  tipo poder|demanda       cambiar el tipo de documento
  modo                     alternar entre modo demo y modo real (API)
  clave <valor>            establecer la clave API de Gemini (vacío para borrarla)
  archivo <ruta|data:URL>  seleccionar el archivo del que extraer datos
  extraer                  extraer datos del archivo seleccionado
  campo <nombre> <valor>   editar un campo del formulario
  panel                    mostrar u ocultar el panel de extracción
  ver                      mostrar el formulario y el último resultado
  generar                  generar el documento
  guardar [ruta]           guardar el último documento generado
  ayuda                    mostrar esta ayuda
  salir                    terminar la sesión";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Type(DocumentType),
    Mode,
    Key(String),
    File(String),
    Extract,
    Field { name: String, value: String },
    Panel,
    Show,
    Generate,
    Save(Option<PathBuf>),
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "tipo" | "type" => {
            let ty = rest.parse::<DocumentType>().map_err(|e| e.to_string())?;
            Command::Type(ty)
        }
        "modo" | "mode" => Command::Mode,
        "clave" | "key" => Command::Key(rest.to_string()),
        "archivo" | "file" => {
            if rest.is_empty() {
                return Err("uso: archivo <ruta|data:URL>".to_string());
            }
            Command::File(rest.to_string())
        }
        "extraer" | "extract" => Command::Extract,
        "campo" | "set" => {
            let (name, value) = match rest.split_once(char::is_whitespace) {
                Some((name, value)) => (name, value.trim()),
                None => (rest, ""),
            };
            if name.is_empty() {
                return Err("uso: campo <nombre> <valor>".to_string());
            }
            Command::Field {
                name: name.to_string(),
                value: value.to_string(),
            }
        }
        "panel" => Command::Panel,
        "ver" | "show" => Command::Show,
        "generar" | "generate" => Command::Generate,
        "guardar" | "save" => Command::Save((!rest.is_empty()).then(|| PathBuf::from(rest))),
        "ayuda" | "help" | "?" => Command::Help,
        "salir" | "quit" | "exit" => Command::Quit,
        other => return Err(format!("comando desconocido '{other}'. Escriba 'ayuda'.")),
    };
    Ok(Some(command))
}

/// Run the interactive session until `salir` or end of input.
pub async fn run(session: &mut Session, store: &dyn CredentialStore) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Redacta v{} (escriba 'ayuda' para ver los comandos)", env!("CARGO_PKG_VERSION"));
    println!();
    print!("{}", display::form_card(session.state()));

    loop {
        let state = session.state();
        print!(
            "\n[{} | {}] > ",
            state.active_type().title(),
            display::mode_label(state)
        );
        std::io::stdout().flush().context("flushing prompt")?;

        let Some(line) = lines.next_line().await.context("reading command")? else {
            println!();
            break;
        };

        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => execute(session, store, command).await?,
            Err(message) => println!("{message}"),
        }
    }
    Ok(())
}

async fn execute(
    session: &mut Session,
    store: &dyn CredentialStore,
    command: Command,
) -> anyhow::Result<()> {
    match command {
        Command::Type(ty) => {
            session.state_mut().select_type(ty);
            print!("{}", display::form_card(session.state()));
        }
        Command::Mode => {
            session.state_mut().toggle_mode();
            println!("Modo: {}", display::mode_label(session.state()));
            println!("{}", display::generate_status(session.state()));
        }
        Command::Key(value) => {
            session.state_mut().set_credential(value.clone());
            if let Err(e) = store.set(&value) {
                warn!(error = %e, "could not persist credential");
                println!("La clave se usará en esta sesión, pero no se pudo guardar: {e}");
            }
            if value.is_empty() {
                println!("Clave API borrada.");
            } else {
                println!("Clave API actualizada.");
            }
        }
        Command::File(arg) => match load_upload(&arg).await {
            Ok(file) => {
                println!("Archivo seleccionado: {} ({})", file.name, file.mime_type);
                session.state_mut().select_file(Some(file));
            }
            Err(e) => println!("No se pudo leer el archivo: {e:#}"),
        },
        Command::Extract => {
            if !session.state().can_extract() {
                let reason = if session.state().is_busy() {
                    PipelineError::Busy
                } else {
                    PipelineError::NoFile
                };
                println!("{reason}");
                return Ok(());
            }
            println!("Extrayendo datos...");
            if let Err(e) = session.extract().await {
                println!("{e}");
            } else if session.state().last_error().is_some() {
                println!("{}", display::output_panel(session.state()));
            } else {
                print!("{}", display::form_card(session.state()));
            }
        }
        Command::Field { name, value } => {
            match session.state_mut().set_field(&name, value) {
                Ok(()) => println!("{}", display::generate_status(session.state())),
                Err(e) => println!("{e}"),
            }
        }
        Command::Panel => {
            session.state_mut().toggle_extractor_panel();
            print!("{}", display::form_card(session.state()));
        }
        Command::Show => {
            print!("{}", display::form_card(session.state()));
            println!();
            println!("{}", display::output_panel(session.state()));
        }
        Command::Generate => {
            if !session.state().can_generate() {
                println!("{}", display::generate_status(session.state()));
                return Ok(());
            }
            println!("Generando...");
            if let Err(e) = session.generate().await {
                println!("{e}");
            } else {
                println!();
                println!("{}", display::output_panel(session.state()));
            }
        }
        Command::Save(path) => {
            let Some(document) = session.state().last_document() else {
                println!("No hay ningún documento generado para guardar.");
                return Ok(());
            };
            let path = path.unwrap_or_else(|| default_output_path(session.state().active_type()));
            tokio::fs::write(&path, document)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Documento guardado en {}", path.display());
        }
        Command::Help => {
            println!("{HELP}");
            println!();
            println!("Campos de {}:", session.state().active_type().title());
            print!("{}", display::field_list(session.state()));
        }
        Command::Quit => {}
    }
    Ok(())
}

/// Read an upload from a path, or decode it from a `data:` URL.
pub async fn load_upload(arg: &str) -> anyhow::Result<UploadedFile> {
    if arg.starts_with("data:") {
        return Ok(UploadedFile::from_data_url("archivo pegado", arg)?);
    }
    let path = Path::new(arg);
    UploadedFile::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))
}

/// `<tipo>-<YYYYmmdd-HHMMSS>.md` in the working directory.
pub fn default_output_path(document_type: DocumentType) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    PathBuf::from(format!("{}-{stamp}.md", document_type.as_str()))
}
