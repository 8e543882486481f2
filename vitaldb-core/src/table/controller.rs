use std::sync::Arc;

use serde::Serialize;
use vitaldb_state::{CaseId, CaseRecord, Field};

use super::{
    Criteria, Equality, PageState, SelectionSet, SortComparator, SortState, TableQuery, paginate,
    total_pages,
};
use crate::url_sync::{Location, UrlSync};

/// One rendered page of the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView<'a> {
    pub rows: Vec<&'a CaseRecord>,
    /// 1-based.
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    /// The number of records passing the filter.
    pub filtered_count: usize,
    /// The number of records in the collection.
    pub total_count: usize,
}

/// Owns the case collection and everything the table view derives from it.
///
/// The view is always collection → filter → sort → page, recomputed on
/// demand. Every state change is written to the [`Location`]; the location
/// is only read when the controller is created.
pub struct TableController<L> {
    records: Arc<Vec<CaseRecord>>,
    criteria: Criteria,
    sort: SortState,
    page: PageState,
    selection: SelectionSet,
    comparator: SortComparator,
    url: UrlSync<L>,
}
impl<L: Location> TableController<L> {
    /// Creates an empty controller, taking its initial filter, sort and page
    /// from `location`.
    pub fn new(location: L) -> Self {
        let (url, query) = UrlSync::mount(location);
        Self {
            records: Arc::new(vec![]),
            criteria: query.criteria,
            sort: query.sort,
            page: query.page,
            selection: SelectionSet::default(),
            comparator: SortComparator::new(),
            url,
        }
    }

    /// Replaces the collection after a reload. Clears the selection and pulls
    /// the current page back into range.
    pub fn set_collection(&mut self, records: Arc<Vec<CaseRecord>>) {
        self.records = records;
        self.selection.clear();
        self.page.clamp(self.total_pages());
        self.sync_url();
    }

    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn page(&self) -> PageState {
        self.page
    }

    pub fn query(&self) -> TableQuery {
        TableQuery {
            criteria: self.criteria.clone(),
            sort: self.sort,
            page: self.page,
        }
    }

    pub fn location(&self) -> &L {
        self.url.location()
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        self.edit_criteria(|criteria| criteria.set_search(search));
    }

    pub fn set_range(&mut self, field: Field, min: f64, max: f64) {
        self.edit_criteria(|criteria| criteria.set_range(field, min, max));
    }

    pub fn set_equality(&mut self, field: Field, value: Equality) {
        self.edit_criteria(|criteria| criteria.set_equality(field, value));
    }

    /// Clears every filter.
    pub fn reset_criteria(&mut self) {
        self.edit_criteria(|criteria| *criteria = Criteria::default());
    }

    /// Sorts by `field`, flipping the direction if it's already the sort field.
    /// Goes back to the first page.
    pub fn toggle_sort(&mut self, field: Field) {
        self.sort.toggle(field);
        self.page.reset();
        self.sync_url();
    }

    /// Moves to `page`, clamped to the pages that exist.
    pub fn set_page(&mut self, page: usize) {
        self.page.set_page(page, self.total_pages());
        self.sync_url();
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page.current_page().saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.current_page().saturating_sub(1));
    }

    /// Changes the page size and goes back to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        if self.page.set_page_size(page_size) {
            self.sync_url();
        }
    }

    pub fn toggle_selected(&mut self, id: CaseId) {
        self.selection.toggle(id);
    }

    /// Selects every record passing the filter, or deselects them all if they
    /// already are. Records hidden by the filter keep their selection.
    pub fn toggle_select_all(&mut self) {
        let visible = self.filtered_ids();
        self.selection.toggle_all(&visible);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&self, id: CaseId) -> bool {
        self.selection.is_selected(id)
    }

    /// Whether every record passing the filter is selected.
    pub fn all_filtered_selected(&self) -> bool {
        self.selection.all_selected(&self.filtered_ids())
    }

    /// The selected IDs in ascending order, whether or not they pass the filter.
    pub fn selected_ids(&self) -> Vec<CaseId> {
        self.selection.ids()
    }

    /// The IDs of the records passing the filter, in collection order.
    pub fn filtered_ids(&self) -> Vec<CaseId> {
        self.filtered().into_iter().map(|r| r.id).collect()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len(), self.page.page_size())
    }

    /// The current page.
    pub fn view(&self) -> TableView<'_> {
        let mut sorted = self.filtered();
        self.comparator.sort(&mut sorted, self.sort);

        let page_size = self.page.page_size();
        TableView {
            rows: paginate(&sorted, self.page.current_page(), page_size).to_vec(),
            current_page: self.page.current_page(),
            total_pages: total_pages(sorted.len(), page_size),
            page_size,
            filtered_count: sorted.len(),
            total_count: self.records.len(),
        }
    }
}
impl<L: Location> TableController<L> {
    fn filtered(&self) -> Vec<&CaseRecord> {
        self.records
            .iter()
            .filter(|record| self.criteria.matches(record))
            .collect()
    }

    /// Applies a filter edit. A change that actually alters the filter sends
    /// the view back to page 1.
    fn edit_criteria(&mut self, edit: impl FnOnce(&mut Criteria)) {
        let before = self.criteria.clone();
        edit(&mut self.criteria);
        if self.criteria != before {
            self.page.reset();
        }
        self.sync_url();
    }

    fn sync_url(&mut self) {
        let query = self.query();
        self.url.write(&query);
    }
}
