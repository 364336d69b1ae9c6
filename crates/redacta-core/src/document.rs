//! Document kinds and the form data they are drafted from.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The two kinds of legal draft Redacta can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Poder especial: a special power-of-attorney instrument.
    PowerOfAttorney,
    /// Contestación de demanda: a response to a labour lawsuit.
    LawsuitResponse,
}

impl DocumentType {
    pub const ALL: [DocumentType; 2] = [Self::PowerOfAttorney, Self::LawsuitResponse];

    /// Short identifier used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PowerOfAttorney => "poder",
            Self::LawsuitResponse => "demanda",
        }
    }

    /// Title shown to the user.
    pub fn title(&self) -> &'static str {
        match self {
            Self::PowerOfAttorney => "Poder Especial",
            Self::LawsuitResponse => "Contestación de Demanda",
        }
    }

    /// Hint passed to the extraction collaborator so it knows what kind of
    /// document the uploaded image is supposed to be.
    pub fn type_hint(&self) -> &'static str {
        match self {
            Self::PowerOfAttorney => "Poder",
            Self::LawsuitResponse => "Demanda",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown document type '{0}' (expected 'poder' or 'demanda')")]
pub struct UnknownDocumentType(pub String);

impl FromStr for DocumentType {
    type Err = UnknownDocumentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "poder" | "poa" | "power-of-attorney" => Ok(Self::PowerOfAttorney),
            "demanda" | "lawsuit" | "lawsuit-response" => Ok(Self::LawsuitResponse),
            other => Err(UnknownDocumentType(other.to_string())),
        }
    }
}

/// Field name → value for one document type.
///
/// Keys are field names from the type's [`FieldSchema`](crate::FieldSchema);
/// values are free text and may be empty while the user is still filling in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData {
    values: BTreeMap<String, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Value of `field`, or `""` when the key is absent.
    pub fn value(&self, field: &str) -> &str {
        self.get(field).unwrap_or_default()
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for FormData
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_command_line_aliases() {
        assert_eq!("poder".parse(), Ok(DocumentType::PowerOfAttorney));
        assert_eq!("POA".parse(), Ok(DocumentType::PowerOfAttorney));
        assert_eq!(" demanda ".parse(), Ok(DocumentType::LawsuitResponse));
        assert_eq!(
            "testamento".parse::<DocumentType>(),
            Err(UnknownDocumentType("testamento".into()))
        );
    }

    #[test]
    fn as_str_round_trips_through_from_str() {
        for ty in DocumentType::ALL {
            assert_eq!(ty.as_str().parse(), Ok(ty));
        }
    }

    #[test]
    fn missing_field_reads_as_empty() {
        let mut data = FormData::new();
        data.set("grantorName", "ANA");
        assert_eq!(data.value("grantorName"), "ANA");
        assert_eq!(data.value("grantorDNI"), "");
        assert!(data.get("grantorDNI").is_none());
    }

    #[test]
    fn form_data_deserializes_from_flat_object() {
        let json = r#"{"defendantName": "ACME S.A.C.", "defendantDNI": "20123456789"}"#;
        let data: FormData = serde_json::from_str(json).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.value("defendantName"), "ACME S.A.C.");
    }
}
