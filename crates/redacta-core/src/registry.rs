//! Static per-type table: schema, seed data, demo fixtures, and prompt builder.
//!
//! Everything that varies by [`DocumentType`] is resolved here once per
//! operation through [`lookup`]; callers never match on the type themselves.

use crate::document::{DocumentType, FormData};
use crate::prompt;
use crate::schema::{self, FieldSchema};

/// Builds the live-mode generation prompt from a form snapshot.
pub type PromptBuilder = fn(&FormData) -> String;

/// Everything the pipelines need to know about one document type.
#[derive(Debug)]
pub struct DocumentProfile {
    pub document_type: DocumentType,
    pub schema: FieldSchema,
    seed: &'static [(&'static str, &'static str)],
    demo_extraction: &'static [(&'static str, &'static str)],
    /// Canned document returned by demo-mode generation.
    pub demo_document: &'static str,
    prompt_builder: PromptBuilder,
}

impl DocumentProfile {
    /// Form data a new session starts with. Has a key for every schema field.
    pub fn default_form_data(&self) -> FormData {
        self.seed.iter().copied().collect()
    }

    /// Canned extraction result returned in demo mode.
    pub fn demo_extraction(&self) -> FormData {
        self.demo_extraction.iter().copied().collect()
    }

    pub fn build_prompt(&self, data: &FormData) -> String {
        (self.prompt_builder)(data)
    }
}

/// Resolve the profile for a document type.
pub fn lookup(document_type: DocumentType) -> &'static DocumentProfile {
    match document_type {
        DocumentType::PowerOfAttorney => &POWER_OF_ATTORNEY,
        DocumentType::LawsuitResponse => &LAWSUIT_RESPONSE,
    }
}

impl DocumentType {
    pub fn profile(self) -> &'static DocumentProfile {
        lookup(self)
    }
}

static POWER_OF_ATTORNEY: DocumentProfile = DocumentProfile {
    document_type: DocumentType::PowerOfAttorney,
    schema: schema::POWER_OF_ATTORNEY,
    seed: &[
        ("grantorName", "JUAN PEREZ GOMEZ"),
        ("grantorDNI", "12345678"),
        ("grantorAddress", "Av. Siempre Viva 123, Springfield"),
        ("attorneyName", "MARIA LOPEZ DIAZ"),
        ("attorneyDNI", "87654321"),
        ("attorneyAddress", "Calle Falsa 456, Shelbyville"),
        (
            "powers",
            "Para que pueda representarme ante el Banco de la Nación para solicitar y cobrar un \
             cheque de gerencia por la suma de S/ 5,000.00 (Cinco Mil y 00/100 Soles).",
        ),
    ],
    demo_extraction: &[
        ("grantorName", "ANA SOFIA CASTILLO ROJAS"),
        ("grantorDNI", "45678901"),
        ("grantorAddress", "Calle Las Begonias 789, San Isidro, Lima"),
        ("attorneyName", "LUIS MIGUEL TORRES VERA"),
        ("attorneyDNI", "09876543"),
        ("attorneyAddress", "Jr. de la Unión 1020, Cercado de Lima, Lima"),
        (
            "powers",
            "Para que pueda representarme ante el Banco de Crédito para realizar el cobro de un \
             cheque de gerencia por la suma de S/ 15,000.00 (Quince Mil y 00/100 Soles), así como \
             solicitar estados de cuenta y cualquier otro trámite conexo.",
        ),
    ],
    demo_document: include_str!("../fixtures/poder_especial.md"),
    prompt_builder: prompt::power_of_attorney,
};

static LAWSUIT_RESPONSE: DocumentProfile = DocumentProfile {
    document_type: DocumentType::LawsuitResponse,
    schema: schema::LAWSUIT_RESPONSE,
    seed: &[
        ("defendantName", "EMPRESA CONSTRUCTORA S.A.C."),
        ("defendantDNI", "20123456789"),
        (
            "lawsuitText",
            "El demandante, Sr. Carlos Rodriguez, alega un despido arbitrario con fecha 15 de marzo \
             de 2024. Solicita el pago de beneficios sociales truncos, indemnización por despido y \
             una compensación por daños y perjuicios. Afirma haber trabajado de forma ininterrumpida \
             desde el 01 de enero de 2022.",
        ),
    ],
    demo_extraction: &[
        ("defendantName", "TECNOLOGIA Y SISTEMAS PERU S.A.C."),
        ("defendantDNI", "20506070801"),
        (
            "lawsuitText",
            "La demandante, Sra. Lucía Méndez, alega haber sido despedida de manera incausada el día \
             30 de abril de 2024. Reclama el pago de su liquidación de beneficios sociales, una \
             indemnización por despido arbitrario y el pago de horas extras que supuestamente laboró \
             durante el último año. Manifiesta haber sido contratada a plazo indeterminado desde el \
             10 de enero de 2021.",
        ),
    ],
    demo_document: include_str!("../fixtures/contestacion_demanda.md"),
    prompt_builder: prompt::lawsuit_response,
};
