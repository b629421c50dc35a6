//! Pagination engine
//!
//! Pure slice math over an already-filtered list. The engine never clamps
//! `page`; out-of-range pages yield an empty slice and correction is the
//! controller's job. Keeping it a pure function makes the laws in the tests
//! checkable over the whole input space.

/// Result of paginating a list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult<T> {
    /// The items on the requested page, in original order
    pub items: Vec<T>,
    /// Total pages for this list and page size (0 for an empty list)
    pub total_pages: usize,
    /// Total items across all pages
    pub total_items: usize,
    /// 1-based index of the first item on this page
    pub start_index: usize,
    /// 1-based index of the last item on this page
    pub end_index: usize,
    /// Whether a later page exists
    pub has_next_page: bool,
    /// Whether an earlier page exists
    pub has_previous_page: bool,
}

/// Slice one page out of `items`.
///
/// Expects `page >= 1` and `page_size >= 1`; a page past the end produces an
/// empty slice with the totals still filled in.
pub fn paginate<T: Clone>(items: &[T], page: u32, page_size: u32) -> PageResult<T> {
    let total_items = items.len();
    let page = page as usize;
    let page_size = (page_size as usize).max(1);

    let total_pages = total_items.div_ceil(page_size);
    let start = page.saturating_sub(1) * page_size;
    let end = (start + page_size).min(total_items);

    let slice = if start < total_items {
        items[start..end].to_vec()
    } else {
        Vec::new()
    };

    PageResult {
        items: slice,
        total_pages,
        total_items,
        start_index: start + 1,
        end_index: end,
        has_next_page: page < total_pages,
        has_previous_page: page > 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PAGE_SIZES;

    fn keys(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("player{:03}", i)).collect()
    }

    #[test]
    fn test_worked_example_30_items_size_12() {
        let items = keys(30);

        let page1 = paginate(&items, 1, 12);
        assert_eq!(page1.total_pages, 3);
        assert_eq!(page1.total_items, 30);
        assert_eq!(page1.items.len(), 12);
        assert_eq!(page1.start_index, 1);
        assert_eq!(page1.end_index, 12);
        assert!(page1.has_next_page);
        assert!(!page1.has_previous_page);

        let page2 = paginate(&items, 2, 12);
        assert_eq!(page2.start_index, 13);
        assert_eq!(page2.end_index, 24);
        assert_eq!(page2.items.len(), 12);
        assert!(page2.has_next_page);
        assert!(page2.has_previous_page);

        let page3 = paginate(&items, 3, 12);
        assert_eq!(page3.start_index, 25);
        assert_eq!(page3.end_index, 30);
        assert_eq!(page3.items.len(), 5);
        assert!(!page3.has_next_page);
        assert_eq!(page3.items.first().map(String::as_str), Some("player025"));
    }

    #[test]
    fn test_empty_list() {
        let result = paginate::<String>(&[], 1, 24);
        assert_eq!(result.total_pages, 0);
        assert_eq!(result.total_items, 0);
        assert!(result.items.is_empty());
        assert!(!result.has_next_page);
        assert!(!result.has_previous_page);
    }

    #[test]
    fn test_page_past_end_is_empty_with_totals_intact() {
        let items = keys(10);
        let result = paginate(&items, 5, 12);
        assert!(result.items.is_empty());
        assert_eq!(result.total_pages, 1);
        assert_eq!(result.total_items, 10);
    }

    #[test]
    fn test_slice_lengths_sum_to_total() {
        for &page_size in &PAGE_SIZES {
            for n in [0usize, 1, 5, 11, 12, 13, 24, 30, 95, 96, 97, 200] {
                let items = keys(n);
                let total_pages = paginate(&items, 1, page_size).total_pages;

                assert_eq!(
                    total_pages,
                    n.div_ceil(page_size as usize),
                    "total_pages law for n={n} p={page_size}"
                );
                assert_eq!(total_pages == 0, n == 0);

                let covered: usize = (1..=total_pages as u32)
                    .map(|page| paginate(&items, page, page_size).items.len())
                    .sum();
                assert_eq!(covered, n, "coverage law for n={n} p={page_size}");
            }
        }
    }

    #[test]
    fn test_order_preserved_across_pages() {
        let items = keys(30);
        let mut rebuilt = Vec::new();
        for page in 1..=3 {
            rebuilt.extend(paginate(&items, page, 12).items);
        }
        assert_eq!(rebuilt, items);
    }
}
