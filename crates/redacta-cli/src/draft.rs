//! One-shot drafting: optional extraction, field overrides, generation.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use redacta_core::{DocumentType, FormData};
use redacta_session::Session;
use tracing::info;

use crate::repl::load_upload;

pub struct DraftRequest {
    pub document_type: DocumentType,
    pub file: Option<String>,
    pub data: Option<PathBuf>,
    pub overrides: Vec<(String, String)>,
    pub out: Option<PathBuf>,
}

/// Run a full draft and write the document to `out` or stdout.
///
/// Values from `--data` and `--set` are applied after extraction so they win
/// over extracted ones.
pub async fn run(session: &mut Session, request: DraftRequest) -> anyhow::Result<()> {
    session.state_mut().select_type(request.document_type);

    if let Some(arg) = &request.file {
        let file = load_upload(arg).await?;
        session.state_mut().select_file(Some(file));
        session.extract().await?;
        if let Some(error) = session.state().last_error() {
            bail!("{error}");
        }
        info!("extraction merged into form");
    }

    if let Some(path) = &request.data {
        for (name, value) in read_form_file(path).await?.iter() {
            session.state_mut().set_field(name, value)?;
        }
    }
    for (name, value) in &request.overrides {
        session.state_mut().set_field(name, value.as_str())?;
    }

    if !session.state().can_generate() {
        bail!("{}", crate::display::generate_status(session.state()));
    }

    session.generate().await?;
    let state = session.state();
    if let Some(error) = state.last_error() {
        bail!("{error}");
    }
    let Some(document) = state.last_document() else {
        bail!("generation finished without a document");
    };

    match &request.out {
        Some(path) => {
            tokio::fs::write(path, document)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Documento guardado en {}", path.display());
        }
        None => println!("{document}"),
    }
    Ok(())
}

async fn read_form_file(path: &Path) -> anyhow::Result<FormData> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {} as a JSON object", path.display()))
}

/// Parse a `campo=valor` assignment from the command line.
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected campo=valor, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in '{s}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use redacta_ai::GeminiClient;
    use redacta_session::DemoTiming;

    fn demo_session() -> Session {
        Session::new(Arc::new(GeminiClient::default()), String::new()).with_timing(DemoTiming::INSTANT)
    }

    fn request(document_type: DocumentType) -> DraftRequest {
        DraftRequest {
            document_type,
            file: None,
            data: None,
            overrides: Vec::new(),
            out: None,
        }
    }

    #[test]
    fn parses_assignments() {
        assert_eq!(
            parse_assignment("grantorName=ANA ROJAS"),
            Ok(("grantorName".into(), "ANA ROJAS".into()))
        );
        assert_eq!(
            parse_assignment("powers=a=b"),
            Ok(("powers".into(), "a=b".into()))
        );
        assert!(parse_assignment("grantorName").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[tokio::test]
    async fn demo_draft_writes_canned_document() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("demanda.md");
        let mut session = demo_session();

        let mut req = request(DocumentType::LawsuitResponse);
        req.out = Some(out.clone());
        run(&mut session, req).await.unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        assert_eq!(written, DocumentType::LawsuitResponse.profile().demo_document);
    }

    #[tokio::test]
    async fn draft_extracts_then_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("poder.md");
        let mut session = demo_session();

        let mut req = request(DocumentType::PowerOfAttorney);
        req.file = Some("data:image/png;base64,aG9sYQ==".into());
        req.overrides = vec![("attorneyName".into(), "PEDRO".into())];
        req.out = Some(out);
        run(&mut session, req).await.unwrap();

        let form = session.state().active_form();
        assert_eq!(form.value("grantorName"), "ANA SOFIA CASTILLO ROJAS");
        assert_eq!(form.value("attorneyName"), "PEDRO");
    }

    #[tokio::test]
    async fn draft_refuses_blank_fields() {
        let mut session = demo_session();
        let mut req = request(DocumentType::LawsuitResponse);
        req.overrides = vec![("lawsuitText".into(), "   ".into())];

        let err = run(&mut session, req).await.unwrap_err();
        assert!(err.to_string().contains("lawsuitText"));
        assert!(session.state().last_document().is_none());
    }

    #[tokio::test]
    async fn draft_rejects_unknown_fields() {
        let mut session = demo_session();
        let mut req = request(DocumentType::LawsuitResponse);
        req.overrides = vec![("grantorName".into(), "ANA".into())];
        assert!(run(&mut session, req).await.is_err());
    }

    #[tokio::test]
    async fn draft_reads_form_file() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("form.json");
        std::fs::write(&data, r#"{"defendantName": "ACME S.A.C."}"#).unwrap();
        let mut session = demo_session();

        let mut req = request(DocumentType::LawsuitResponse);
        req.data = Some(data);
        req.out = Some(dir.path().join("out.md"));
        run(&mut session, req).await.unwrap();

        assert_eq!(
            session.state().active_form().value("defendantName"),
            "ACME S.A.C."
        );
    }

    #[tokio::test]
    async fn live_draft_without_key_is_refused() {
        let mut session = demo_session();
        session.state_mut().toggle_mode();
        let err = run(&mut session, request(DocumentType::PowerOfAttorney))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("clave API"));
    }
}
