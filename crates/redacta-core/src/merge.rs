//! Extraction merge policy.
//!
//! Extracted values overwrite the current form field-by-field. Protected
//! fields always keep their current value, and names outside the schema are
//! ignored.

use crate::document::FormData;
use crate::schema::FieldSchema;

/// Fill in a raw collaborator response against `schema`.
///
/// Every extractable field absent from `raw` becomes `""`. Protected fields and
/// unknown names are dropped so they can never reach the form.
pub fn normalize_extraction(schema: &FieldSchema, raw: &FormData) -> FormData {
    schema
        .extractable()
        .map(|field| (field.name, raw.value(field.name)))
        .collect()
}

/// Merge `extracted` into `current` under the protection policy.
pub fn merge_extraction(schema: &FieldSchema, current: &FormData, extracted: &FormData) -> FormData {
    let mut merged = current.clone();
    for (name, value) in extracted.iter() {
        match schema.field(name) {
            Some(field) if !field.protected => merged.set(name, value),
            Some(_) => tracing::debug!(field = name, "kept protected field"),
            None => tracing::debug!(field = name, "ignored field outside schema"),
        }
    }
    merged
}

/// Schema fields whose value is blank after trimming.
pub fn blank_fields(schema: &FieldSchema, data: &FormData) -> Vec<&'static str> {
    schema
        .names()
        .filter(|name| data.value(name).trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{LAWSUIT_RESPONSE, POWER_OF_ATTORNEY};

    fn poa_form() -> FormData {
        [
            ("grantorName", "JUAN"),
            ("grantorDNI", "1"),
            ("grantorAddress", "Lima"),
            ("attorneyName", "MARIA"),
            ("attorneyDNI", "2"),
            ("attorneyAddress", "Callao"),
            ("powers", "cobrar un cheque"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn merge_never_overwrites_powers() {
        let extracted: FormData = [("grantorName", "ANA"), ("powers", "vender un inmueble")]
            .into_iter()
            .collect();

        let merged = merge_extraction(&POWER_OF_ATTORNEY, &poa_form(), &extracted);
        assert_eq!(merged.value("grantorName"), "ANA");
        assert_eq!(merged.value("powers"), "cobrar un cheque");
        assert_eq!(merged.value("attorneyName"), "MARIA");
    }

    #[test]
    fn merge_ignores_unknown_fields() {
        let extracted: FormData = [("plaintiffName", "CARLOS")].into_iter().collect();
        let merged = merge_extraction(&POWER_OF_ATTORNEY, &poa_form(), &extracted);
        assert_eq!(merged, poa_form());
    }

    #[test]
    fn merge_applies_empty_strings() {
        let extracted: FormData = [("grantorAddress", "")].into_iter().collect();
        let merged = merge_extraction(&POWER_OF_ATTORNEY, &poa_form(), &extracted);
        assert_eq!(merged.value("grantorAddress"), "");
    }

    #[test]
    fn normalize_fills_absent_fields_and_drops_protected() {
        let raw: FormData = [
            ("grantorName", "ANA"),
            ("powers", "todo"),
            ("unexpected", "x"),
        ]
        .into_iter()
        .collect();

        let normalized = normalize_extraction(&POWER_OF_ATTORNEY, &raw);
        assert_eq!(normalized.len(), 6);
        assert_eq!(normalized.value("grantorName"), "ANA");
        assert_eq!(normalized.get("attorneyDNI"), Some(""));
        assert!(!normalized.contains("powers"));
        assert!(!normalized.contains("unexpected"));
    }

    #[test]
    fn blank_fields_trims_whitespace() {
        let data: FormData = [
            ("defendantName", "ACME"),
            ("defendantDNI", "   "),
            ("lawsuitText", "\n"),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            blank_fields(&LAWSUIT_RESPONSE, &data),
            vec!["defendantDNI", "lawsuitText"]
        );
    }

    #[test]
    fn blank_fields_counts_missing_keys() {
        let data: FormData = [("defendantName", "ACME")].into_iter().collect();
        assert_eq!(blank_fields(&LAWSUIT_RESPONSE, &data).len(), 2);
    }
}
