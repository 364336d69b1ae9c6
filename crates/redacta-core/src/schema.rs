//! Field schemas for each document type.
//!
//! A schema is the ordered list of form fields for a document type. Every field
//! is required for generation; the description is only used to guide AI
//! extraction. A field marked `protected` is never written by extraction.

/// A single form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Short label for display.
    pub label: &'static str,
    /// Guidance for the extraction collaborator.
    pub description: &'static str,
    pub protected: bool,
}

impl FieldSpec {
    const fn extracted(name: &'static str, label: &'static str, description: &'static str) -> Self {
        Self {
            name,
            label,
            description,
            protected: false,
        }
    }

    const fn protected(name: &'static str, label: &'static str, description: &'static str) -> Self {
        Self {
            name,
            label,
            description,
            protected: true,
        }
    }
}

/// Ordered field list for one document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    fields: &'static [FieldSpec],
}

impl FieldSchema {
    pub const fn new(fields: &'static [FieldSpec]) -> Self {
        Self { fields }
    }

    /// All fields in display order. All of them are required.
    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|f| f.name)
    }

    /// Fields the extraction collaborator is asked to fill.
    pub fn extractable(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|f| !f.protected)
    }

    pub fn is_protected(&self, name: &str) -> bool {
        self.field(name).is_some_and(|f| f.protected)
    }
}

const POWER_OF_ATTORNEY_FIELDS: &[FieldSpec] = &[
    FieldSpec::extracted(
        "grantorName",
        "Poderdante",
        "Nombre completo del poderdante",
    ),
    FieldSpec::extracted("grantorDNI", "DNI del poderdante", "DNI del poderdante"),
    FieldSpec::extracted(
        "grantorAddress",
        "Domicilio del poderdante",
        "Dirección del poderdante",
    ),
    FieldSpec::extracted(
        "attorneyName",
        "Apoderado",
        "Nombre completo del apoderado",
    ),
    FieldSpec::extracted("attorneyDNI", "DNI del apoderado", "DNI del apoderado"),
    FieldSpec::extracted(
        "attorneyAddress",
        "Domicilio del apoderado",
        "Dirección del apoderado",
    ),
    FieldSpec::protected(
        "powers",
        "Facultades",
        "Facultades específicas que se otorgan al apoderado",
    ),
];

const LAWSUIT_RESPONSE_FIELDS: &[FieldSpec] = &[
    FieldSpec::extracted(
        "defendantName",
        "Demandado",
        "Nombre o razón social del demandado",
    ),
    FieldSpec::extracted(
        "defendantDNI",
        "DNI / RUC",
        "DNI o RUC del demandado",
    ),
    FieldSpec::extracted(
        "lawsuitText",
        "Resumen de la demanda",
        "Un resumen de los principales reclamos y hechos de la demanda.",
    ),
];

pub const POWER_OF_ATTORNEY: FieldSchema = FieldSchema::new(POWER_OF_ATTORNEY_FIELDS);
pub const LAWSUIT_RESPONSE: FieldSchema = FieldSchema::new(LAWSUIT_RESPONSE_FIELDS);
