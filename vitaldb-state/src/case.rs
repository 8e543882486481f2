use serde::{Deserialize, Serialize};

use crate::{Field, FieldValue, api};

/// A case ID
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct CaseId(pub u32);
impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The patient's sex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// Male
    #[serde(rename = "M")]
    Male,
    /// Female
    #[serde(rename = "F")]
    Female,
}
impl Sex {
    /// The single-letter code the server uses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }

    /// Parses `M`/`F` (or `male`/`female`), ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Some(Sex::Male),
            "f" | "female" => Some(Sex::Female),
            _ => None,
        }
    }
}
impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A case, as the case browser cares about it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CaseRecord {
    /// The case ID
    pub id: CaseId,
    /// The patient's age in years
    pub age: Option<f64>,
    /// The patient's sex
    pub sex: Option<Sex>,
    /// The patient's height in centimetres
    pub height: Option<f64>,
    /// The patient's weight in kilograms
    pub weight: Option<f64>,
    /// The patient's body mass index
    pub bmi: Option<f64>,
    /// The ASA physical status classification
    pub asa: Option<u8>,
    /// The surgical department
    pub department: Option<String>,
    /// The diagnosis
    pub diagnosis: Option<String>,
    /// The name of the operation
    pub operation: Option<String>,
}
impl CaseRecord {
    /// Builds a record from the server's clinical info. Values that don't parse
    /// (including pandas' `nan`) become `None`.
    pub fn from_clinical_info(id: CaseId, info: api::ClinicalInfo) -> Self {
        fn number(value: Option<String>) -> Option<f64> {
            value
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
        }
        fn text(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("nan"))
        }

        CaseRecord {
            id,
            age: number(info.age),
            sex: info.sex.as_deref().and_then(Sex::parse),
            height: number(info.height),
            weight: number(info.weight),
            bmi: number(info.bmi),
            asa: number(info.asa)
                .filter(|v| v.fract() == 0.0 && (0.0..=u8::MAX as f64).contains(v))
                .map(|v| v as u8),
            department: text(info.department),
            diagnosis: text(info.dx),
            operation: text(info.opname),
        }
    }

    /// The value of `field` for this record, or `None` if the record lacks it.
    pub fn value(&self, field: Field) -> Option<FieldValue<'_>> {
        match field {
            Field::Id => Some(FieldValue::Number(self.id.0 as f64)),
            Field::Age => self.age.map(FieldValue::Number),
            Field::Sex => self.sex.map(|s| FieldValue::Text(s.as_str())),
            Field::Height => self.height.map(FieldValue::Number),
            Field::Weight => self.weight.map(FieldValue::Number),
            Field::Bmi => self.bmi.map(FieldValue::Number),
            Field::Asa => self.asa.map(|a| FieldValue::Number(a as f64)),
            Field::Department => self.department.as_deref().map(FieldValue::Text),
            Field::Diagnosis => self.diagnosis.as_deref().map(FieldValue::Text),
            Field::Operation => self.operation.as_deref().map(FieldValue::Text),
        }
    }

    /// The text fields free-text search looks at.
    pub fn search_texts(&self) -> impl Iterator<Item = &str> {
        [self.operation.as_deref(), self.diagnosis.as_deref()]
            .into_iter()
            .flatten()
    }
}
