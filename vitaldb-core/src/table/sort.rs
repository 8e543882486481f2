use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use vitaldb_state::{CaseRecord, Field, FieldValue, TextCollator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}
impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}
impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub field: Field,
    pub direction: SortDirection,
}
impl SortState {
    /// Clicking the active column flips the direction; another column starts ascending.
    pub fn toggle(&mut self, field: Field) {
        if field == self.field {
            self.direction = self.direction.reversed();
        } else {
            self.field = field;
            self.direction = SortDirection::Ascending;
        }
    }
}

/// Orders records by one field.
///
/// Records missing the field go after every record that has it, in both
/// directions. Equal keys keep no particular order beyond what the caller's
/// sort provides.
#[derive(Debug, Default)]
pub struct SortComparator {
    collator: TextCollator,
}
impl SortComparator {
    pub fn new() -> Self {
        Self {
            collator: TextCollator::new(),
        }
    }

    pub fn compare(
        &self,
        a: &CaseRecord,
        b: &CaseRecord,
        field: Field,
        direction: SortDirection,
    ) -> Ordering {
        match (a.value(field), b.value(field)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => direction.apply(self.compare_values(a, b)),
        }
    }

    /// Sorts `records` in place by `sort`.
    pub fn sort(&self, records: &mut [&CaseRecord], sort: SortState) {
        records.sort_by(|a, b| self.compare(a, b, sort.field, sort.direction));
    }

    fn compare_values(&self, a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
        match (a, b) {
            (FieldValue::Text(a), FieldValue::Text(b)) => self.collator.compare(a, b),
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(&b),
            // A field is always one kind; numbers first keeps this total anyway.
            (FieldValue::Number(_), FieldValue::Text(_)) => Ordering::Less,
            (FieldValue::Text(_), FieldValue::Number(_)) => Ordering::Greater,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitaldb_state::CaseId;

    fn case(id: u32, age: Option<f64>, operation: Option<&str>) -> CaseRecord {
        CaseRecord {
            id: CaseId(id),
            age,
            operation: operation.map(str::to_string),
            ..Default::default()
        }
    }

    fn sorted_ids(records: &[CaseRecord], sort: SortState) -> Vec<u32> {
        let comparator = SortComparator::new();
        let mut refs: Vec<&CaseRecord> = records.iter().collect();
        comparator.sort(&mut refs, sort);
        refs.into_iter().map(|r| r.id.0).collect()
    }

    #[test]
    fn missing_values_sort_last_in_both_directions() {
        let records = vec![
            case(1, None, None),
            case(2, Some(70.0), None),
            case(3, Some(30.0), None),
            case(4, None, None),
            case(5, Some(50.0), None),
        ];

        let ascending = sorted_ids(
            &records,
            SortState {
                field: Field::Age,
                direction: SortDirection::Ascending,
            },
        );
        assert_eq!(&ascending[..3], &[3u32, 5, 2]);
        assert!(ascending[3..].contains(&1) && ascending[3..].contains(&4));

        let descending = sorted_ids(
            &records,
            SortState {
                field: Field::Age,
                direction: SortDirection::Descending,
            },
        );
        assert_eq!(&descending[..3], &[2u32, 5, 3]);
        assert!(descending[3..].contains(&1) && descending[3..].contains(&4));
    }

    #[test]
    fn text_sort_is_case_insensitive() {
        let records = vec![
            case(1, None, Some("craniotomy")),
            case(2, None, Some("Appendectomy")),
            case(3, None, Some("LAR")),
            case(4, None, Some("Lumbar fusion")),
        ];
        let ids = sorted_ids(
            &records,
            SortState {
                field: Field::Operation,
                direction: SortDirection::Ascending,
            },
        );
        assert_eq!(ids, vec![2, 1, 3, 4]);
    }

    #[test]
    fn compare_is_antisymmetric() {
        let comparator = SortComparator::new();
        let records = [
            case(1, Some(20.0), Some("b")),
            case(2, Some(40.0), Some("a")),
            case(3, None, None),
        ];
        for field in [Field::Id, Field::Age, Field::Operation] {
            for direction in [SortDirection::Ascending, SortDirection::Descending] {
                for a in &records {
                    for b in &records {
                        assert_eq!(
                            comparator.compare(a, b, field, direction),
                            comparator.compare(b, a, field, direction).reverse()
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn toggle_flips_or_resets() {
        let mut sort = SortState::default();
        assert_eq!(sort.field, Field::Id);

        sort.toggle(Field::Id);
        assert_eq!(sort.direction, SortDirection::Descending);

        sort.toggle(Field::Age);
        assert_eq!(
            sort,
            SortState {
                field: Field::Age,
                direction: SortDirection::Ascending
            }
        );

        sort.toggle(Field::Age);
        assert_eq!(sort.direction, SortDirection::Descending);
    }
}
