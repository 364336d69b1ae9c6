//! Google Gemini client for live-mode extraction and generation.
//!
//! Both operations go through `models/{model}:generateContent`. Extraction sends
//! the image inline with a JSON response schema built from the field schema;
//! generation sends the prompt as a single text part.

use async_trait::async_trait;
use redacta_core::{FieldSchema, FormData};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{debug, info};

use crate::error::AiError;
use crate::file::InlineFile;
use crate::service::DocumentAi;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// HTTP client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiClient {
    /// Create a client for `model` served under `base_url`.
    ///
    /// `base_url` should be like `https://generativelanguage.googleapis.com/v1beta`
    /// (no trailing slash).
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn generate_content(
        &self,
        credential: &str,
        request: &GenerateRequest,
    ) -> Result<String, AiError> {
        if credential.is_empty() {
            return Err(AiError::MissingCredential);
        }

        let url = self.endpoint();
        debug!(url = %url, model = %self.model, "calling generateContent");
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", credential)
            .json(request)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AiError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let response: GenerateResponse = resp.json().await?;
        first_text(response)
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL.to_string(), DEFAULT_MODEL.to_string())
    }
}

#[async_trait]
impl DocumentAi for GeminiClient {
    async fn extract(
        &self,
        credential: &str,
        file: &InlineFile,
        schema: &FieldSchema,
        type_hint: &str,
    ) -> Result<FormData, AiError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: extraction_instruction(type_hint),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: file.mime_type.clone(),
                            data: file.data.clone(),
                        },
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(schema),
            }),
        };

        info!(type_hint, mime_type = %file.mime_type, "requesting field extraction");
        let text = self.generate_content(credential, &request).await?;
        parse_extracted_fields(&text)
    }

    async fn generate_text(&self, credential: &str, prompt: &str) -> Result<String, AiError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part::Text {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: None,
        };

        info!(prompt_chars = prompt.chars().count(), "requesting document generation");
        self.generate_content(credential, &request).await
    }
}

fn extraction_instruction(type_hint: &str) -> String {
    format!(
        "Eres un asistente experto en extracción de datos legales en documentos peruanos. \
         Analiza la imagen del documento proporcionado y extrae la información solicitada según \
         el esquema JSON. El documento es un/a \"{type_hint}\". Si un campo no se encuentra en el \
         documento, utiliza una cadena vacía \"\" como valor. Responde únicamente con el objeto JSON."
    )
}

/// Gemini `responseSchema`: an OBJECT of STRING properties, protected fields excluded.
fn response_schema(schema: &FieldSchema) -> Value {
    let properties: Map<String, Value> = schema
        .extractable()
        .map(|field| {
            (
                field.name.to_string(),
                json!({ "type": "STRING", "description": field.description }),
            )
        })
        .collect();
    json!({ "type": "OBJECT", "properties": properties })
}

/// Text of the first candidate, untouched. A blank answer counts as empty.
fn first_text(response: GenerateResponse) -> Result<String, AiError> {
    response
        .candidates
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
        .filter(|text| !text.trim().is_empty())
        .ok_or(AiError::EmptyResponse)
}

/// Parse the model's JSON answer into form fields.
///
/// Accepts an object whose values are strings or null (null reads as `""`).
/// Tolerates a surrounding markdown code fence.
fn parse_extracted_fields(text: &str) -> Result<FormData, AiError> {
    let body = strip_code_fence(text);
    let value: Value = serde_json::from_str(body)?;
    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(AiError::Malformed(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            )));
        }
    };

    let mut fields = FormData::new();
    for (name, value) in object {
        match value {
            Value::String(s) => fields.set(name, s),
            Value::Null => fields.set(name, ""),
            other => {
                return Err(AiError::Malformed(format!(
                    "field '{name}' is a {}, expected a string",
                    json_kind(&other)
                )));
            }
        }
    }
    Ok(fields)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redacta_core::schema::{LAWSUIT_RESPONSE, POWER_OF_ATTORNEY};

    #[test]
    fn client_trims_trailing_slash() {
        let client = GeminiClient::new("http://localhost:8080/v1beta/".into(), "m".into());
        assert_eq!(client.endpoint(), "http://localhost:8080/v1beta/models/m:generateContent");
    }

    #[test]
    fn response_schema_excludes_protected_fields() {
        let schema = response_schema(&POWER_OF_ATTORNEY);
        let properties = schema["properties"].as_object().unwrap();
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(properties.len(), 6);
        assert!(!properties.contains_key("powers"));
        assert_eq!(properties["grantorDNI"]["type"], "STRING");
        assert_eq!(properties["grantorDNI"]["description"], "DNI del poderdante");
    }

    #[test]
    fn extraction_request_serializes_inline_data() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: "hola".into() },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: "image/png".into(),
                            data: "aG9sYQ==".into(),
                        },
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".into(),
                response_schema: response_schema(&LAWSUIT_RESPONSE),
            }),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hola");
        assert_eq!(
            json["contents"][0]["parts"][1]["inline_data"]["mime_type"],
            "image/png"
        );
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn generation_request_omits_config() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part::Text { text: "p".into() }],
            }],
            generation_config: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("generationConfig").is_none());
    }

    #[test]
    fn first_text_reads_first_candidate() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"**PODER ESPECIAL**"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(first_text(response).unwrap(), "**PODER ESPECIAL**");
    }

    #[test]
    fn first_text_rejects_empty_candidates() {
        let response: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(matches!(first_text(response), Err(AiError::EmptyResponse)));

        let response: GenerateResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(matches!(first_text(response), Err(AiError::EmptyResponse)));
    }

    #[test]
    fn first_text_keeps_raw_text_but_rejects_blank_answers() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"\n  "}]}}]}"#,
        )
        .unwrap();
        assert!(matches!(first_text(response), Err(AiError::EmptyResponse)));

        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"\n**PODER**\n"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(first_text(response).unwrap(), "\n**PODER**\n");
    }

    #[test]
    fn parses_extracted_fields() {
        let fields =
            parse_extracted_fields(r#"{"defendantName": "ACME S.A.C.", "defendantDNI": null}"#)
                .unwrap();
        assert_eq!(fields.value("defendantName"), "ACME S.A.C.");
        assert_eq!(fields.get("defendantDNI"), Some(""));
    }

    #[test]
    fn parses_fenced_json() {
        let fields = parse_extracted_fields("```json\n{\"grantorName\": \"ANA\"}\n```").unwrap();
        assert_eq!(fields.value("grantorName"), "ANA");
    }

    #[test]
    fn rejects_malformed_extraction() {
        assert!(matches!(
            parse_extracted_fields("no es json"),
            Err(AiError::Json(_))
        ));
        assert!(matches!(
            parse_extracted_fields(r#"["ANA"]"#),
            Err(AiError::Malformed(_))
        ));
        assert!(matches!(
            parse_extracted_fields(r#"{"grantorDNI": 45678901}"#),
            Err(AiError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn empty_credential_fails_before_request() {
        // Unroutable base URL: reaching the network would surface as Http instead.
        let client = GeminiClient::new("http://127.0.0.1:9".into(), DEFAULT_MODEL.into());
        let result = client.generate_text("", "prompt").await;
        assert!(matches!(result, Err(AiError::MissingCredential)));

        let file = InlineFile {
            data: "aG9sYQ==".into(),
            mime_type: "image/png".into(),
        };
        let result = client.extract("", &file, &POWER_OF_ATTORNEY, "Poder").await;
        assert!(matches!(result, Err(AiError::MissingCredential)));
    }
}
