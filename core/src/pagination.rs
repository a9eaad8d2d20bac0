//! Page window computation for table screens.
//!
//! Pages are 1-indexed. The window of page buttons holds at most
//! [`MAX_VISIBLE_PAGES`] entries and slides with the current page:
//!
//! ```text
//! total = 10
//! current = 1..=3   →  [1 2 3 4 5]
//! current = 5       →  [3 4 5 6 7]
//! current = 8..=10  →  [6 7 8 9 10]
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Maximum number of page buttons shown at once
pub const MAX_VISIBLE_PAGES: usize = 5;

/// Pages on each side of the current page in a centred window
const WINDOW_RADIUS: usize = MAX_VISIBLE_PAGES / 2;

/// Derived pagination metadata for one render.
///
/// Always satisfies `start_index <= end_index <= total_items` and
/// `end_index - start_index <= page_size`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    /// Number of items being paginated
    pub total_items: usize,
    /// Items per page (at least 1)
    pub page_size: usize,
    /// `max(1, ceil(total_items / page_size))`
    pub total_pages: usize,
    /// Current page, clamped into `[1, total_pages]`
    pub current_page: usize,
    /// Index of the first visible item
    pub start_index: usize,
    /// One past the index of the last visible item
    pub end_index: usize,
    /// Page numbers to render as buttons, ascending
    pub pages: SmallVec<[usize; MAX_VISIBLE_PAGES]>,
}

impl PageWindow {
    /// Whether a "previous" control should be enabled
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a "next" control should be enabled
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Number of items on the current page
    #[must_use]
    pub const fn visible_len(&self) -> usize {
        self.end_index - self.start_index
    }

    /// The visible part of `items`.
    ///
    /// `items` is expected to hold `total_items` entries; a shorter slice
    /// yields whatever part of the page it covers.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.end_index.min(items.len());
        let start = self.start_index.min(end);
        &items[start..end]
    }
}

/// Compute the page window for `total_items` items.
///
/// A `page_size` of 0 is treated as 1, and `current_page` outside
/// `[1, total_pages]` is clamped to the nearest valid page. Callers should
/// still disable navigation at the boundaries.
///
/// # Example
///
/// ```
/// use expo_admin_core::paginate;
///
/// let empty = paginate(0, 10, 1);
/// assert_eq!(empty.total_pages, 1);
/// assert_eq!((empty.start_index, empty.end_index), (0, 0));
/// assert_eq!(empty.pages.as_slice(), &[1]);
/// ```
#[must_use]
pub fn paginate(total_items: usize, page_size: usize, current_page: usize) -> PageWindow {
    let page_size = page_size.max(1);
    let total_pages = total_items.div_ceil(page_size).max(1);
    let current_page = current_page.clamp(1, total_pages);

    let start_index = (current_page - 1).saturating_mul(page_size).min(total_items);
    let end_index = start_index.saturating_add(page_size).min(total_items);

    PageWindow {
        total_items,
        page_size,
        total_pages,
        current_page,
        start_index,
        end_index,
        pages: visible_pages(total_pages, current_page),
    }
}

fn visible_pages(total_pages: usize, current_page: usize) -> SmallVec<[usize; MAX_VISIBLE_PAGES]> {
    let (first, last) = if current_page <= WINDOW_RADIUS + 1 {
        (1, total_pages.min(MAX_VISIBLE_PAGES))
    } else if current_page >= total_pages.saturating_sub(WINDOW_RADIUS) {
        (
            total_pages.saturating_sub(MAX_VISIBLE_PAGES - 1).max(1),
            total_pages,
        )
    } else {
        (current_page - WINDOW_RADIUS, current_page.saturating_add(WINDOW_RADIUS))
    };
    (first..=last).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pages(window: &PageWindow) -> Vec<usize> {
        window.pages.to_vec()
    }

    #[test]
    fn test_empty_collection() {
        let window = paginate(0, 10, 1);

        assert_eq!(window.total_pages, 1);
        assert_eq!(window.start_index, 0);
        assert_eq!(window.end_index, 0);
        assert_eq!(pages(&window), vec![1]);
        assert!(!window.has_previous());
        assert!(!window.has_next());
    }

    #[test]
    fn test_window_at_start() {
        assert_eq!(pages(&paginate(45, 10, 1)), vec![1, 2, 3, 4, 5]);
        assert_eq!(pages(&paginate(45, 10, 3)), vec![1, 2, 3, 4, 5]);
        assert_eq!(pages(&paginate(100, 10, 3)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_window_at_end() {
        assert_eq!(pages(&paginate(100, 10, 10)), vec![6, 7, 8, 9, 10]);
        assert_eq!(pages(&paginate(100, 10, 8)), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_window_centred() {
        assert_eq!(pages(&paginate(100, 10, 5)), vec![3, 4, 5, 6, 7]);
        assert_eq!(pages(&paginate(100, 10, 4)), vec![2, 3, 4, 5, 6]);
        assert_eq!(pages(&paginate(100, 10, 7)), vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_fewer_pages_than_window() {
        assert_eq!(pages(&paginate(25, 10, 1)), vec![1, 2, 3]);
        assert_eq!(pages(&paginate(25, 10, 3)), vec![1, 2, 3]);
        assert_eq!(pages(&paginate(40, 10, 4)), vec![1, 2, 3, 4]);
        assert_eq!(pages(&paginate(6, 10, 1)), vec![1]);
    }

    #[test]
    fn test_last_page_is_partial() {
        let window = paginate(45, 10, 5);

        assert_eq!(window.start_index, 40);
        assert_eq!(window.end_index, 45);
        assert_eq!(window.visible_len(), 5);
        assert!(window.has_previous());
        assert!(!window.has_next());
    }

    #[test]
    fn test_out_of_range_pages_are_clamped() {
        let low = paginate(45, 10, 0);
        assert_eq!(low.current_page, 1);
        assert_eq!(low.start_index, 0);

        let high = paginate(45, 10, 99);
        assert_eq!(high.current_page, 5);
        assert_eq!((high.start_index, high.end_index), (40, 45));
    }

    #[test]
    fn test_zero_page_size_is_treated_as_one() {
        let window = paginate(3, 0, 2);

        assert_eq!(window.page_size, 1);
        assert_eq!(window.total_pages, 3);
        assert_eq!((window.start_index, window.end_index), (1, 2));
    }

    #[test]
    fn test_slice() {
        let items: Vec<u32> = (0..5).collect();
        let window = paginate(items.len(), 3, 2);

        assert_eq!(window.slice(&items), &[3, 4]);
        assert!(window.slice::<u32>(&[]).is_empty());
    }

    #[test]
    fn test_extreme_inputs_do_not_overflow() {
        let halves = paginate(usize::MAX, usize::MAX / 2 + 1, 2);
        assert_eq!(halves.total_pages, 2);
        assert_eq!((halves.start_index, halves.end_index), (usize::MAX / 2 + 1, usize::MAX));
        assert_eq!(pages(&halves), vec![1, 2]);

        let last = paginate(usize::MAX, 1, usize::MAX);
        assert_eq!(last.current_page, usize::MAX);
        assert_eq!((last.start_index, last.end_index), (usize::MAX - 1, usize::MAX));
        assert_eq!(
            pages(&last),
            vec![usize::MAX - 4, usize::MAX - 3, usize::MAX - 2, usize::MAX - 1, usize::MAX]
        );

        let huge_page = paginate(3, usize::MAX, usize::MAX);
        assert_eq!((huge_page.start_index, huge_page.end_index), (0, 3));
    }

    proptest! {
        #[test]
        fn prop_extreme_sizes_stay_in_bounds(total in (usize::MAX - 1000)..=usize::MAX, size in 1usize.., page in 0usize..) {
            let window = paginate(total, size, page);

            prop_assert!(window.start_index <= window.end_index);
            prop_assert!(window.end_index <= total);
            prop_assert!(window.visible_len() <= size);
            prop_assert!(window.pages.contains(&window.current_page));
        }

        #[test]
        fn prop_indices_stay_in_bounds(total in 0usize..500, size in 1usize..40, page in 0usize..80) {
            let window = paginate(total, size, page);

            prop_assert!(window.start_index <= window.end_index);
            prop_assert!(window.end_index <= total);
            prop_assert!(window.visible_len() <= size);
            prop_assert!((1..=window.total_pages).contains(&window.current_page));
        }

        #[test]
        fn prop_window_contains_current_page(total in 0usize..500, size in 1usize..40, page in 1usize..80) {
            let window = paginate(total, size, page);

            prop_assert!(window.pages.contains(&window.current_page));
            prop_assert!(window.pages.len() <= MAX_VISIBLE_PAGES);
            prop_assert_eq!(window.pages.len(), window.total_pages.min(MAX_VISIBLE_PAGES));
            prop_assert!(window.pages.windows(2).all(|pair| pair[1] == pair[0] + 1));
        }
    }
}
