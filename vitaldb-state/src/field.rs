use serde::{Deserialize, Serialize};

/// A filterable and sortable column of a [`crate::CaseRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// The case ID
    #[default]
    Id,
    /// The patient's age
    Age,
    /// The patient's sex
    Sex,
    /// The patient's height
    Height,
    /// The patient's weight
    Weight,
    /// The patient's body mass index
    Bmi,
    /// The ASA classification
    Asa,
    /// The surgical department
    Department,
    /// The diagnosis
    Diagnosis,
    /// The operation name
    Operation,
}

/// A borrowed field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// A text value
    Text(&'a str),
    /// A numeric value
    Number(f64),
}

impl Field {
    /// Every field, in column order.
    pub const ALL: [Field; 10] = [
        Field::Id,
        Field::Age,
        Field::Sex,
        Field::Height,
        Field::Weight,
        Field::Bmi,
        Field::Asa,
        Field::Department,
        Field::Diagnosis,
        Field::Operation,
    ];

    /// The key used for this field in query strings.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Age => "age",
            Field::Sex => "sex",
            Field::Height => "height",
            Field::Weight => "weight",
            Field::Bmi => "bmi",
            Field::Asa => "asa",
            Field::Department => "dept",
            Field::Diagnosis => "dx",
            Field::Operation => "op",
        }
    }

    /// The inverse of [`Self::key`].
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    /// A human-readable column heading.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Id => "Case ID",
            Field::Age => "Age",
            Field::Sex => "Sex",
            Field::Height => "Height",
            Field::Weight => "Weight",
            Field::Bmi => "BMI",
            Field::Asa => "ASA",
            Field::Department => "Department",
            Field::Diagnosis => "Diagnosis",
            Field::Operation => "Operation",
        }
    }

    /// The full-open bounds of a range filter on this field, or `None` if the
    /// field can't be range-filtered. A range at these bounds filters nothing.
    pub fn default_bounds(&self) -> Option<(f64, f64)> {
        match self {
            Field::Age => Some((0.0, 100.0)),
            Field::Height => Some((0.0, 250.0)),
            Field::Weight => Some((0.0, 300.0)),
            Field::Bmi => Some((0.0, 100.0)),
            Field::Asa => Some((1.0, 6.0)),
            Field::Id | Field::Sex | Field::Department | Field::Diagnosis | Field::Operation => None,
        }
    }
}
impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FieldValue<'_> {
    /// Whether this value equals `expected`, the string form used in filters.
    /// Numbers match when `expected` parses to the same number.
    pub fn matches_text(&self, expected: &str) -> bool {
        match self {
            FieldValue::Text(text) => *text == expected,
            FieldValue::Number(number) => expected
                .trim()
                .parse::<f64>()
                .is_ok_and(|expected| expected == *number),
        }
    }
}
impl std::fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(text) => write!(f, "{text}"),
            FieldValue::Number(number) => write!(f, "{number}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_key(field.key()), Some(field));
        }
        assert_eq!(Field::from_key("operation"), None);
    }

    #[test]
    fn numeric_values_match_numeric_text() {
        assert!(FieldValue::Number(2.0).matches_text("2"));
        assert!(FieldValue::Number(2.0).matches_text("2.0"));
        assert!(!FieldValue::Number(2.0).matches_text("two"));
        assert!(FieldValue::Text("F").matches_text("F"));
        assert!(!FieldValue::Text("F").matches_text("f"));
    }

    #[test]
    fn whole_numbers_display_without_fraction() {
        assert_eq!(FieldValue::Number(54.0).to_string(), "54");
        assert_eq!(FieldValue::Number(24.5).to_string(), "24.5");
    }
}
