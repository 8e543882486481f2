use std::collections::HashSet;

use vitaldb_state::CaseId;

/// The cases the user has ticked. Independent of filtering, sorting and
/// paging, so selections survive those.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    selected: HashSet<CaseId>,
}
impl SelectionSet {
    pub fn toggle(&mut self, id: CaseId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// If every visible ID is already selected, deselects just those;
    /// otherwise selects all of them. Selections outside `visible` are left alone.
    pub fn toggle_all(&mut self, visible: &[CaseId]) {
        if self.all_selected(visible) {
            for id in visible {
                self.selected.remove(id);
            }
        } else {
            self.selected.extend(visible.iter().copied());
        }
    }

    pub fn is_selected(&self, id: CaseId) -> bool {
        self.selected.contains(&id)
    }

    /// Whether every ID in `ids` is selected. False for an empty slice, so an
    /// empty view offers "select all".
    pub fn all_selected(&self, ids: &[CaseId]) -> bool {
        !ids.is_empty() && ids.iter().all(|id| self.selected.contains(id))
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The selected IDs in ascending order.
    pub fn ids(&self) -> Vec<CaseId> {
        let mut ids: Vec<_> = self.selected.iter().copied().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u32]) -> Vec<CaseId> {
        raw.iter().copied().map(CaseId).collect()
    }

    #[test]
    fn toggle_flips_membership() {
        let mut selection = SelectionSet::default();
        selection.toggle(CaseId(3));
        assert!(selection.is_selected(CaseId(3)));
        selection.toggle(CaseId(3));
        assert!(!selection.is_selected(CaseId(3)));
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_all_selects_every_visible_id() {
        let mut selection = SelectionSet::default();
        selection.toggle(CaseId(2));

        let visible = ids(&[1, 2, 3]);
        selection.toggle_all(&visible);
        assert!(visible.iter().all(|id| selection.is_selected(*id)));
    }

    #[test]
    fn toggle_all_is_scoped_to_the_visible_ids() {
        let mut selection = SelectionSet::default();
        selection.toggle(CaseId(10));

        let visible = ids(&[1, 2]);
        selection.toggle_all(&visible);
        assert_eq!(selection.ids(), ids(&[1, 2, 10]));

        selection.toggle_all(&visible);
        assert_eq!(selection.ids(), ids(&[10]));
    }

    #[test]
    fn toggle_all_twice_restores_a_fully_selected_view() {
        let visible = ids(&[4, 5]);
        let mut selection = SelectionSet::default();
        selection.toggle_all(&visible);
        let before = selection.clone();

        selection.toggle_all(&visible);
        selection.toggle_all(&visible);
        assert_eq!(selection, before);
    }

    #[test]
    fn empty_view_is_never_all_selected() {
        let mut selection = SelectionSet::default();
        selection.toggle(CaseId(1));
        assert!(!selection.all_selected(&[]));
        selection.toggle_all(&[]);
        assert_eq!(selection.ids(), ids(&[1]));
    }
}
