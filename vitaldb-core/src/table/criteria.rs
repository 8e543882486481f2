use smallvec::SmallVec;

use vitaldb_state::{CaseRecord, Field, FieldValue};

/// An inclusive numeric bound on a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeConstraint {
    pub field: Field,
    pub min: f64,
    pub max: f64,
}
impl RangeConstraint {
    /// Whether this range is at its field's full-open bounds, and so filters nothing.
    pub fn is_open(&self) -> bool {
        self.field.default_bounds() == Some((self.min, self.max))
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// The required value of an equality filter.
///
/// On [`Field::Operation`] the value is an operation type rather than an exact
/// name: it matches any operation containing it, ignoring case.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Equality {
    /// No constraint.
    #[default]
    All,
    Is(String),
}
impl Equality {
    /// The sentinel that stands for [`Equality::All`] in query strings.
    pub const ALL: &str = "all";

    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == Self::ALL {
            Equality::All
        } else {
            Equality::Is(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Equality::All => Self::ALL,
            Equality::Is(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualityConstraint {
    pub field: Field,
    pub value: Equality,
}

/// The active filter: free-text search, numeric ranges and equalities.
///
/// Kept normalised so that equal filters compare equal: open ranges and `All`
/// equalities are not stored, and constraints are ordered by field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Criteria {
    search: String,
    ranges: SmallVec<[RangeConstraint; 2]>,
    equalities: SmallVec<[EqualityConstraint; 2]>,
}
impl Criteria {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// The active (non-open) ranges, ordered by field.
    pub fn ranges(&self) -> &[RangeConstraint] {
        &self.ranges
    }

    /// The active (non-`All`) equalities, ordered by field.
    pub fn equalities(&self) -> &[EqualityConstraint] {
        &self.equalities
    }

    /// The current bounds for `field`: the configured range, or the field's
    /// default bounds if none is set. `None` for fields that can't be ranged.
    pub fn range(&self, field: Field) -> Option<(f64, f64)> {
        self.ranges
            .iter()
            .find(|r| r.field == field)
            .map(|r| (r.min, r.max))
            .or_else(|| field.default_bounds())
    }

    /// Sets the range for `field`. Setting it back to the default bounds removes it.
    /// Ignored for fields without default bounds.
    pub fn set_range(&mut self, field: Field, min: f64, max: f64) {
        if field.default_bounds().is_none() {
            tracing::debug!("ignoring range on non-rangeable field {field:?}");
            return;
        }

        self.ranges.retain(|r| r.field != field);
        let range = RangeConstraint { field, min, max };
        if !range.is_open() {
            let idx = self.ranges.partition_point(|r| r.field < field);
            self.ranges.insert(idx, range);
        }
    }

    pub fn equality(&self, field: Field) -> &Equality {
        self.equalities
            .iter()
            .find(|e| e.field == field)
            .map_or(&Equality::All, |e| &e.value)
    }

    /// Sets the equality for `field`. [`Equality::All`], and any value that
    /// reads back as it, removes it.
    pub fn set_equality(&mut self, field: Field, value: Equality) {
        let value = match value {
            Equality::Is(value) => Equality::parse(&value),
            Equality::All => Equality::All,
        };
        self.equalities.retain(|e| e.field != field);
        if value != Equality::All {
            let idx = self.equalities.partition_point(|e| e.field < field);
            self.equalities
                .insert(idx, EqualityConstraint { field, value });
        }
    }

    /// The operation type filter, e.g. `gastrectomy`.
    pub fn operation_type(&self) -> &Equality {
        self.equality(Field::Operation)
    }

    pub fn set_operation_type(&mut self, value: Equality) {
        self.set_equality(Field::Operation, value);
    }

    /// Whether nothing is filtered.
    pub fn is_default(&self) -> bool {
        self.search.is_empty() && self.ranges.is_empty() && self.equalities.is_empty()
    }

    pub fn matches(&self, record: &CaseRecord) -> bool {
        matches(record, self)
    }
}

/// Whether `record` passes every active constraint in `criteria`.
pub fn matches(record: &CaseRecord, criteria: &Criteria) -> bool {
    if !criteria.search.is_empty() {
        let needle = criteria.search.to_lowercase();
        let text_match = record
            .search_texts()
            .any(|text| text.to_lowercase().contains(&needle));
        if !text_match && !record.id.to_string().contains(criteria.search.as_str()) {
            return false;
        }
    }

    let ranges_match = criteria.ranges.iter().all(|range| {
        range.is_open()
            || matches!(record.value(range.field), Some(FieldValue::Number(v)) if range.contains(v))
    });
    if !ranges_match {
        return false;
    }

    criteria.equalities.iter().all(|constraint| match &constraint.value {
        Equality::All => true,
        Equality::Is(expected) if constraint.field == Field::Operation => {
            let expected = expected.to_lowercase();
            record
                .operation
                .as_deref()
                .is_some_and(|operation| operation.to_lowercase().contains(&expected))
        }
        Equality::Is(expected) => record
            .value(constraint.field)
            .is_some_and(|value| value.matches_text(expected)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitaldb_state::{CaseId, Sex};

    fn case(id: u32, age: Option<f64>, sex: Sex, operation: &str) -> CaseRecord {
        CaseRecord {
            id: CaseId(id),
            age,
            sex: Some(sex),
            operation: Some(operation.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn default_criteria_match_everything() {
        let criteria = Criteria::default();
        assert!(criteria.is_default());
        assert!(criteria.matches(&case(1, Some(40.0), Sex::Male, "LAR")));
        assert!(criteria.matches(&CaseRecord::default()));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let open = case(1, Some(61.0), Sex::Male, "Open Gastrectomy");
        let chole = case(2, Some(48.0), Sex::Female, "Cholecystectomy");

        let mut criteria = Criteria::default();
        criteria.set_search("gastrectomy");
        criteria.set_equality(Field::Sex, Equality::parse("all"));
        criteria.set_range(Field::Age, 0.0, 100.0);

        let matched: Vec<_> = [&open, &chole]
            .into_iter()
            .filter(|r| criteria.matches(r))
            .map(|r| r.id)
            .collect();
        assert_eq!(matched, vec![CaseId(1)]);
    }

    #[test]
    fn search_matches_identifier_substring() {
        let mut criteria = Criteria::default();
        criteria.set_search("12");
        assert!(criteria.matches(&case(312, None, Sex::Male, "LAR")));
        assert!(!criteria.matches(&case(31, None, Sex::Male, "LAR")));
    }

    #[test]
    fn search_looks_at_diagnosis() {
        let record = CaseRecord {
            diagnosis: Some("Brain Tumor".to_string()),
            ..case(5, None, Sex::Female, "Craniotomy")
        };
        let mut criteria = Criteria::default();
        criteria.set_search("tumor");
        assert!(criteria.matches(&record));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let mut criteria = Criteria::default();
        criteria.set_range(Field::Age, 40.0, 60.0);
        assert!(criteria.matches(&case(1, Some(40.0), Sex::Male, "LAR")));
        assert!(criteria.matches(&case(2, Some(60.0), Sex::Male, "LAR")));
        assert!(!criteria.matches(&case(3, Some(60.5), Sex::Male, "LAR")));
        assert!(!criteria.matches(&case(4, None, Sex::Male, "LAR")));
    }

    #[test]
    fn default_range_is_a_no_op() {
        let mut criteria = Criteria::default();
        criteria.set_range(Field::Age, 0.0, 100.0);
        assert!(criteria.ranges().is_empty());
        assert!(criteria.matches(&case(1, Some(120.0), Sex::Male, "LAR")));
        assert!(criteria.matches(&case(2, None, Sex::Male, "LAR")));
    }

    #[test]
    fn equality_filters_exact_value() {
        let mut criteria = Criteria::default();
        criteria.set_equality(Field::Sex, Equality::Is("F".to_string()));
        assert!(criteria.matches(&case(1, None, Sex::Female, "LAR")));
        assert!(!criteria.matches(&case(2, None, Sex::Male, "LAR")));
        assert!(!criteria.matches(&CaseRecord::default()));

        criteria.set_equality(Field::Sex, Equality::All);
        assert!(criteria.equalities().is_empty());
        assert!(criteria.matches(&case(2, None, Sex::Male, "LAR")));
    }

    #[test]
    fn operation_type_matches_part_of_the_name() {
        let mut criteria = Criteria::default();
        criteria.set_operation_type(Equality::Is("gastrectomy".to_string()));
        assert!(criteria.matches(&case(1, None, Sex::Male, "Open Gastrectomy")));
        assert!(criteria.matches(&case(2, None, Sex::Male, "Laparoscopic gastrectomy")));
        assert!(!criteria.matches(&case(3, None, Sex::Female, "Cholecystectomy")));
        assert!(!criteria.matches(&CaseRecord::default()));

        criteria.set_operation_type(Equality::All);
        assert!(criteria.is_default());
    }

    #[test]
    fn sentinel_values_clear_the_equality() {
        let mut criteria = Criteria::default();
        criteria.set_equality(Field::Sex, Equality::Is("F".to_string()));
        criteria.set_equality(Field::Sex, Equality::Is("all".to_string()));
        assert_eq!(criteria.equality(Field::Sex), &Equality::All);

        criteria.set_equality(Field::Department, Equality::Is(String::new()));
        assert!(criteria.is_default());
    }

    #[test]
    fn all_constraints_must_hold() {
        let mut criteria = Criteria::default();
        criteria.set_search("lar");
        criteria.set_range(Field::Age, 50.0, 70.0);
        criteria.set_equality(Field::Sex, Equality::Is("M".to_string()));

        assert!(criteria.matches(&case(1, Some(55.0), Sex::Male, "LAR")));
        assert!(!criteria.matches(&case(2, Some(55.0), Sex::Female, "LAR")));
        assert!(!criteria.matches(&case(3, Some(45.0), Sex::Male, "LAR")));
        assert!(!criteria.matches(&case(4, Some(55.0), Sex::Male, "Craniotomy")));
    }

    #[test]
    fn constraints_are_normalised() {
        let mut a = Criteria::default();
        a.set_equality(Field::Sex, Equality::Is("M".to_string()));
        a.set_equality(Field::Department, Equality::Is("Neurosurgery".to_string()));
        a.set_range(Field::Weight, 50.0, 80.0);
        a.set_range(Field::Age, 20.0, 30.0);

        let mut b = Criteria::default();
        b.set_range(Field::Age, 10.0, 30.0);
        b.set_range(Field::Age, 20.0, 30.0);
        b.set_range(Field::Weight, 50.0, 80.0);
        b.set_equality(Field::Department, Equality::Is("Neurosurgery".to_string()));
        b.set_equality(Field::Sex, Equality::Is("M".to_string()));

        assert_eq!(a, b);
        assert_eq!(
            a.ranges().iter().map(|r| r.field).collect::<Vec<_>>(),
            vec![Field::Age, Field::Weight]
        );
    }

    #[test]
    fn ranges_on_text_fields_are_ignored() {
        let mut criteria = Criteria::default();
        criteria.set_range(Field::Operation, 1.0, 2.0);
        assert!(criteria.is_default());
        assert_eq!(criteria.range(Field::Operation), None);
        assert_eq!(criteria.range(Field::Age), Some((0.0, 100.0)));
    }
}
