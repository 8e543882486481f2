//! The client-side table engine: filter, sort, paginate and select over an
//! in-memory collection of cases.
mod controller;
pub use controller::{TableController, TableView};

mod criteria;
pub use criteria::{Criteria, Equality, EqualityConstraint, RangeConstraint, matches};

mod paginate;
pub use paginate::{DEFAULT_PAGE_SIZE, PAGE_SIZES, PageState, paginate, total_pages};

pub mod query;
pub use query::TableQuery;

mod selection;
pub use selection::SelectionSet;

mod sort;
pub use sort::{SortComparator, SortDirection, SortState};
