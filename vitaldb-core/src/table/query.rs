//! The query-string encoding of the table state.
//!
//! Keys: `q` (search), `{field}Min`/`{field}Max` (ranges), `{field}`
//! (equalities), `sort`, `dir`, `page` and `limit`. Keys holding their default
//! value are left out, and anything that fails to parse falls back to the
//! default for that key.
use url::form_urlencoded;

use vitaldb_state::Field;

use super::{Criteria, Equality, PageState, SortDirection, SortState};

pub const SEARCH_KEY: &str = "q";
pub const SORT_KEY: &str = "sort";
pub const DIRECTION_KEY: &str = "dir";
pub const PAGE_KEY: &str = "page";
pub const LIMIT_KEY: &str = "limit";

/// The part of the table state that lives in the URL.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableQuery {
    pub criteria: Criteria,
    pub sort: SortState,
    pub page: PageState,
}

fn min_key(field: Field) -> String {
    format!("{}Min", field.key())
}

fn max_key(field: Field) -> String {
    format!("{}Max", field.key())
}

/// Whether `key` is one [`parse`] reads.
pub fn is_table_key(key: &str) -> bool {
    [SEARCH_KEY, SORT_KEY, DIRECTION_KEY, PAGE_KEY, LIMIT_KEY].contains(&key)
        || Field::ALL.iter().any(|field| {
            key == field.key()
                || (field.default_bounds().is_some()
                    && (key == min_key(*field) || key == max_key(*field)))
        })
}

/// Reads the table state out of a query string, with or without a leading `?`.
pub fn parse(query: &str) -> TableQuery {
    let query = query.strip_prefix('?').unwrap_or(query);
    let pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();
    // The first occurrence wins.
    let get = |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };
    let get_number = |key: &str| {
        get(key)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
    };

    let mut criteria = Criteria::default();
    if let Some(search) = get(SEARCH_KEY) {
        criteria.set_search(search);
    }
    for field in Field::ALL {
        if let Some((default_min, default_max)) = field.default_bounds() {
            let min = get_number(&min_key(field)).unwrap_or(default_min);
            let max = get_number(&max_key(field)).unwrap_or(default_max);
            criteria.set_range(field, min, max);
        }
        if let Some(value) = get(field.key()) {
            criteria.set_equality(field, Equality::parse(value));
        }
    }

    let sort = SortState {
        field: get(SORT_KEY).and_then(Field::from_key).unwrap_or_default(),
        direction: match get(DIRECTION_KEY) {
            Some("desc") => SortDirection::Descending,
            _ => SortDirection::Ascending,
        },
    };

    let parse_count = |key: &str| get(key).and_then(|v| v.trim().parse::<usize>().ok());
    let default_page = PageState::default();
    let page = PageState::new(
        parse_count(PAGE_KEY).unwrap_or(default_page.current_page()),
        parse_count(LIMIT_KEY).unwrap_or(default_page.page_size()),
    );

    TableQuery {
        criteria,
        sort,
        page,
    }
}

/// Appends the non-default parts of `query` to `serializer`.
pub fn append_pairs<T: form_urlencoded::Target>(
    serializer: &mut form_urlencoded::Serializer<'_, T>,
    query: &TableQuery,
) {
    let criteria = &query.criteria;
    if !criteria.search().is_empty() {
        serializer.append_pair(SEARCH_KEY, criteria.search());
    }
    for range in criteria.ranges() {
        let Some((default_min, default_max)) = range.field.default_bounds() else {
            continue;
        };
        if range.min != default_min {
            serializer.append_pair(&min_key(range.field), &range.min.to_string());
        }
        if range.max != default_max {
            serializer.append_pair(&max_key(range.field), &range.max.to_string());
        }
    }
    for equality in criteria.equalities() {
        serializer.append_pair(equality.field.key(), equality.value.as_str());
    }

    let default_sort = SortState::default();
    if query.sort.field != default_sort.field {
        serializer.append_pair(SORT_KEY, query.sort.field.key());
    }
    if query.sort.direction != default_sort.direction {
        serializer.append_pair(DIRECTION_KEY, query.sort.direction.as_str());
    }

    let default_page = PageState::default();
    if query.page.current_page() != default_page.current_page() {
        serializer.append_pair(PAGE_KEY, &query.page.current_page().to_string());
    }
    if query.page.page_size() != default_page.page_size() {
        serializer.append_pair(LIMIT_KEY, &query.page.page_size().to_string());
    }
}

/// Writes the table state as a query string (without a leading `?`).
pub fn serialize(query: &TableQuery) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    append_pairs(&mut serializer, query);
    serializer.finish()
}
