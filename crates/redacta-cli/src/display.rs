//! Text rendering of the session: a vertical card for the active form and the
//! output panel.

use std::fmt::Write;

use redacta_session::ApplicationState;

const MAX_VALUE_CHARS: usize = 60;

// ── Public API ──

/// Render the active document type, mode, upload, and form fields as a card.
pub fn form_card(state: &ApplicationState) -> String {
    let mut out = String::new();
    let ty = state.active_type();
    let missing = state.missing_fields();

    let _ = writeln!(out, "=== {} ===", ty.title());
    let _ = writeln!(out);

    let _ = writeln!(out, "Configuración");
    row(&mut out, "modo", mode_label(state));
    if !state.is_demo_mode() {
        let key = if state.api_credential().is_empty() {
            "no configurada"
        } else {
            "configurada"
        };
        row(&mut out, "clave API", key);
    }
    let _ = writeln!(out);

    let panel = if state.extractor_panel_visible() {
        "abierto"
    } else {
        "cerrado"
    };
    let _ = writeln!(out, "1. Extraer datos de archivo (opcional) [{panel}]");
    if state.extractor_panel_visible() {
        let file = match state.uploaded_file() {
            Some(f) => format!("{} ({}, {} bytes)", f.name, f.mime_type, f.bytes.len()),
            None => "(ninguno)".to_string(),
        };
        row(&mut out, "archivo", &file);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "2. Completar y revisar datos");
    let form = state.active_form();
    for field in ty.profile().schema.fields() {
        let value = form.value(field.name);
        let shown = if value.trim().is_empty() {
            "(vacío)".to_string()
        } else {
            shorten(value)
        };
        let marker = if missing.contains(&field.name) { " *" } else { "" };
        let _ = writeln!(out, "  {:<26} {}{}", field.name, shown, marker);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", generate_status(state));
    out
}

/// Render the last generated document or the last error.
pub fn output_panel(state: &ApplicationState) -> String {
    if let Some(error) = state.last_error() {
        return format!("Error: {error}");
    }
    match state.last_document() {
        Some(document) => document.to_string(),
        None => "(todavía no se ha generado ningún documento)".to_string(),
    }
}

/// Field names and labels of the active type, for the help text.
pub fn field_list(state: &ApplicationState) -> String {
    let mut out = String::new();
    for field in state.active_type().profile().schema.fields() {
        let note = if field.protected {
            " (no se extrae)"
        } else {
            ""
        };
        let _ = writeln!(out, "  {:<26} {}{}", field.name, field.label, note);
    }
    out
}

/// One-line explanation of whether the generate action is available.
pub fn generate_status(state: &ApplicationState) -> String {
    if state.can_generate() {
        return "Generar: disponible".to_string();
    }
    if state.is_busy() {
        return "Generar: bloqueado (operación en curso)".to_string();
    }
    if !state.is_demo_mode() && state.api_credential().is_empty() {
        return "Generar: bloqueado (falta la clave API)".to_string();
    }
    format!(
        "Generar: bloqueado (campos vacíos: {})",
        state.missing_fields().join(", ")
    )
}

pub fn mode_label(state: &ApplicationState) -> &'static str {
    if state.is_demo_mode() {
        "demo"
    } else {
        "real (API)"
    }
}

// ── Helpers ──

fn row(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "  {:<26} {}", label, value);
}

/// First line of `value`, cut to [`MAX_VALUE_CHARS`].
fn shorten(value: &str) -> String {
    let first_line = value.lines().next().unwrap_or_default();
    let multiline = first_line.len() < value.trim_end().len();
    if first_line.chars().count() > MAX_VALUE_CHARS {
        let cut: String = first_line.chars().take(MAX_VALUE_CHARS - 3).collect();
        format!("{cut}...")
    } else if multiline {
        format!("{first_line}...")
    } else {
        first_line.to_string()
    }
}
