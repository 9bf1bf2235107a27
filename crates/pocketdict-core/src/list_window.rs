//! Windowing of a long list onto the three item rows under the header.

use core::ops::Range;

/// Rows on screen, header included.
pub const SCREEN_ROWS: usize = 4;
/// Rows available to list items.
pub const VISIBLE_ITEMS: usize = SCREEN_ROWS - 1;

/// Visible slice of a list for a given selection.
///
/// Row numbers count the header as row 0.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ListWindow {
    /// Empty list: one placeholder row, nothing highlighted.
    Placeholder,
    Items {
        /// First visible item index.
        start: usize,
        /// One past the last visible item index.
        end: usize,
        /// Screen row (1..=3) holding the selected item.
        highlight_row: usize,
    },
}

impl ListWindow {
    /// Computes the window for a list of `len` items with `selected` active.
    ///
    /// `selected` past the end is treated as the last item.
    pub fn compute(len: usize, selected: usize) -> Self {
        if len == 0 {
            return Self::Placeholder;
        }

        let selected = selected.min(len - 1);

        if len <= VISIBLE_ITEMS {
            return Self::Items {
                start: 0,
                end: len,
                highlight_row: selected + 1,
            };
        }

        let (start, highlight_row) = if selected == 0 {
            (0, 1)
        } else if selected == len - 1 {
            (len - VISIBLE_ITEMS, VISIBLE_ITEMS)
        } else {
            (selected - 1, 2)
        };

        Self::Items {
            start,
            end: start + VISIBLE_ITEMS,
            highlight_row,
        }
    }

    /// Visible item indices.
    pub fn range(&self) -> Range<usize> {
        match *self {
            Self::Placeholder => 0..0,
            Self::Items { start, end, .. } => start..end,
        }
    }

    pub fn highlight_row(&self) -> Option<usize> {
        match *self {
            Self::Placeholder => None,
            Self::Items { highlight_row, .. } => Some(highlight_row),
        }
    }

    /// Visible items of `items`. Empty when `items` is shorter than the
    /// window it was computed for.
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        items.get(self.range()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(len: usize, selected: usize) -> (Range<usize>, Option<usize>) {
        let w = ListWindow::compute(len, selected);
        (w.range(), w.highlight_row())
    }

    #[test]
    fn empty_list_shows_placeholder() {
        assert_eq!(ListWindow::compute(0, 0), ListWindow::Placeholder);
        assert_eq!(window(0, 5), (0..0, None));
    }

    #[test]
    fn short_lists_show_everything() {
        assert_eq!(window(1, 0), (0..1, Some(1)));
        assert_eq!(window(2, 1), (0..2, Some(2)));
        assert_eq!(window(3, 2), (0..3, Some(3)));
    }

    #[test]
    fn long_lists_pin_edges_and_center_the_middle() {
        assert_eq!(window(10, 0), (0..3, Some(1)));
        assert_eq!(window(10, 9), (7..10, Some(3)));
        assert_eq!(window(10, 5), (4..7, Some(2)));
        assert_eq!(window(4, 1), (0..3, Some(2)));
        assert_eq!(window(4, 2), (1..4, Some(2)));
    }

    #[test]
    fn selection_stays_visible_and_in_bounds() {
        for len in 0..12 {
            for selected in 0..len {
                let w = ListWindow::compute(len, selected);
                let range = w.range();
                assert!(range.end <= len);
                assert!(range.contains(&selected));
                let row = w.highlight_row().unwrap();
                assert_eq!(range.start + row - 1, selected);
            }
        }
    }

    #[test]
    fn out_of_range_selection_clamps_to_last() {
        assert_eq!(window(10, 42), (7..10, Some(3)));
    }

    #[test]
    fn visible_slices_items() {
        let items = ["a", "b", "c", "d", "e"];
        let w = ListWindow::compute(items.len(), 2);
        assert_eq!(w.visible(&items), &["b", "c", "d"]);
        assert!(ListWindow::Placeholder.visible(&items).is_empty());
    }
}
