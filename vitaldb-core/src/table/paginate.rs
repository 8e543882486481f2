/// The page sizes a user can pick from.
pub const PAGE_SIZES: [usize; 4] = [5, 10, 20, 50];
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Where the user is in the paged view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    page_size: usize,
}
impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
impl PageState {
    /// Builds a page state, falling back to page 1 and the default size for
    /// values out of range.
    pub fn new(current_page: usize, page_size: usize) -> Self {
        Self {
            current_page: current_page.max(1),
            page_size: if PAGE_SIZES.contains(&page_size) {
                page_size
            } else {
                DEFAULT_PAGE_SIZE
            },
        }
    }

    /// The 1-based current page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Moves to `page`, clamped to `[1, total_pages]`.
    pub fn set_page(&mut self, page: usize, total_pages: usize) {
        self.current_page = page.clamp(1, total_pages.max(1));
    }

    /// Changes the page size and goes back to page 1. Sizes outside
    /// [`PAGE_SIZES`] are ignored.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if !PAGE_SIZES.contains(&page_size) {
            tracing::debug!("ignoring unsupported page size {page_size}");
            return false;
        }
        self.page_size = page_size;
        self.current_page = 1;
        true
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Pulls the current page back inside `[1, total_pages]`.
    pub fn clamp(&mut self, total_pages: usize) {
        self.set_page(self.current_page, total_pages);
    }
}

/// The number of pages needed for `count` items. An empty sequence still has
/// one (empty) page.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// The items on 1-based `page`. Pages outside `[1, total_pages]` are empty;
/// callers clamp before asking.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let Some(start) = page
        .checked_sub(1)
        .and_then(|p| p.checked_mul(page_size))
        .filter(|start| *start < items.len())
    else {
        return &[];
    };
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_three_items_make_three_pages() {
        let ids: Vec<u32> = (1..=23).collect();
        assert_eq!(total_pages(ids.len(), 10), 3);
        assert_eq!(paginate(&ids, 1, 10), &(1..=10).collect::<Vec<u32>>()[..]);
        assert_eq!(paginate(&ids, 2, 10), &(11..=20).collect::<Vec<u32>>()[..]);
        assert_eq!(paginate(&ids, 3, 10), &[21u32, 22, 23]);
    }

    #[test]
    fn pages_cover_every_item_once() {
        for count in [0usize, 1, 9, 10, 11, 49, 50, 51, 137] {
            let items: Vec<usize> = (0..count).collect();
            for page_size in PAGE_SIZES {
                let pages = total_pages(count, page_size);
                assert_eq!(pages, count.div_ceil(page_size).max(1));
                let joined: Vec<usize> = (1..=pages)
                    .flat_map(|p| paginate(&items, p, page_size).iter().copied())
                    .collect();
                assert_eq!(joined, items);
            }
        }
    }

    #[test]
    fn empty_sequence_has_one_empty_page() {
        let items: [u32; 0] = [];
        assert_eq!(total_pages(0, 10), 1);
        assert!(paginate(&items, 1, 10).is_empty());
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let items = [1, 2, 3];
        assert!(paginate(&items, 0, 10).is_empty());
        assert!(paginate(&items, 2, 10).is_empty());
        assert!(paginate(&items, usize::MAX, 10).is_empty());
    }

    #[test]
    fn page_state_falls_back_to_defaults() {
        assert_eq!(PageState::new(0, 7), PageState::default());
        assert_eq!(PageState::new(4, 20).current_page(), 4);
    }

    #[test]
    fn changing_page_size_resets_page() {
        let mut state = PageState::new(3, 10);
        assert!(state.set_page_size(20));
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.page_size(), 20);

        state.set_page(2, 5);
        assert!(!state.set_page_size(15));
        assert_eq!(state.current_page(), 2);
    }

    #[test]
    fn set_page_clamps() {
        let mut state = PageState::default();
        state.set_page(9, 3);
        assert_eq!(state.current_page(), 3);
        state.set_page(0, 3);
        assert_eq!(state.current_page(), 1);
        state.set_page(5, 0);
        assert_eq!(state.current_page(), 1);
    }
}
