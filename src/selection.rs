//! Cross-page selection tracking.
//!
//! `SelectionModel` owns the set of selected artwork ids plus the pending
//! bulk-selection quota. It knows nothing about rendering or fetching; the UI
//! feeds it ordered id lists and individual toggle events, which keeps every
//! rule here testable without an egui context.

use std::collections::HashSet;

/// Pending obligation to auto-select more rows as pages load.
///
/// Invariant: `is_active == (remaining_to_select > 0)`, re-established after
/// every mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkSelection {
    pub total_requested: usize,
    pub remaining_to_select: usize,
    pub is_active: bool,
}

#[derive(Debug, Default)]
pub struct SelectionModel {
    selected: HashSet<i64>,
    bulk: BulkSelection,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    /// Total ids selected across all visited pages.
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn bulk(&self) -> BulkSelection {
        self.bulk
    }

    /// How many of the given page's ids are currently selected.
    pub fn count_on_page(&self, page_ids: &[i64]) -> usize {
        page_ids.iter().filter(|id| self.selected.contains(*id)).count()
    }

    pub fn all_selected_on_page(&self, page_ids: &[i64]) -> bool {
        !page_ids.is_empty() && page_ids.iter().all(|id| self.selected.contains(id))
    }

    pub fn select(&mut self, id: i64) {
        self.selected.insert(id);
    }

    /// Manual deselection. While a bulk quota is pending, a deselected row
    /// consumes one unit of the quota instead of being backfilled on a later
    /// page. Deselecting an id that was never selected touches nothing.
    pub fn deselect(&mut self, id: i64) {
        if self.selected.remove(&id) && self.bulk.is_active {
            self.bulk.remaining_to_select = self.bulk.remaining_to_select.saturating_sub(1);
            self.bulk.is_active = self.bulk.remaining_to_select > 0;
        }
    }

    pub fn set_selected(&mut self, id: i64, on: bool) {
        if on {
            self.select(id);
        } else {
            self.deselect(id);
        }
    }

    /// Begin a bulk selection of `count` rows, filling from the current page
    /// in order. The first `min(count, page_ids.len())` ids count against the
    /// quota whether or not some were already selected; whatever is left over
    /// becomes the pending quota for later pages.
    pub fn start_bulk_select(&mut self, count: usize, page_ids: &[i64]) {
        if count == 0 {
            return;
        }
        let filled = count.min(page_ids.len());
        for &id in &page_ids[..filled] {
            self.selected.insert(id);
        }
        self.bulk = BulkSelection {
            total_requested: count,
            remaining_to_select: count - filled,
            is_active: count > filled,
        };
    }

    /// Apply a pending bulk quota to a freshly loaded page: select not-yet-
    /// selected ids in page order until the quota runs out or the page does.
    pub fn apply_to_page(&mut self, page_ids: &[i64]) {
        if !self.bulk.is_active {
            return;
        }
        let mut added = 0;
        for &id in page_ids {
            if added >= self.bulk.remaining_to_select {
                break;
            }
            if self.selected.insert(id) {
                added += 1;
            }
        }
        self.bulk.remaining_to_select -= added;
        self.bulk.is_active = self.bulk.remaining_to_select > 0;
    }

    /// Header-checkbox behavior: if every row on the page is selected,
    /// deselect the whole page (charging the bulk quota per row when active);
    /// otherwise select every row. `total_requested` is never touched.
    pub fn toggle_all_on_page(&mut self, page_ids: &[i64]) {
        if page_ids.is_empty() {
            return;
        }
        if self.all_selected_on_page(page_ids) {
            for id in page_ids {
                self.selected.remove(id);
            }
            if self.bulk.is_active {
                self.bulk.remaining_to_select =
                    self.bulk.remaining_to_select.saturating_sub(page_ids.len());
                self.bulk.is_active = self.bulk.remaining_to_select > 0;
            }
        } else {
            for &id in page_ids {
                self.selected.insert(id);
            }
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.bulk = BulkSelection::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(range: std::ops::Range<i64>) -> Vec<i64> {
        range.collect()
    }

    fn assert_invariant(model: &SelectionModel) {
        let bulk = model.bulk();
        assert_eq!(bulk.is_active, bulk.remaining_to_select > 0);
    }

    #[test]
    fn test_toggle_idempotence() {
        let mut model = SelectionModel::new();
        model.select(7);
        model.select(7);
        assert_eq!(model.count(), 1);
        assert!(model.is_selected(7));

        model.deselect(7);
        model.deselect(7);
        assert_eq!(model.count(), 0);

        // Deselecting an id that was never selected is a full no-op.
        model.deselect(99);
        assert_eq!(model.count(), 0);
        assert_invariant(&model);
    }

    #[test]
    fn test_start_bulk_fills_min_of_count_and_page() {
        let mut model = SelectionModel::new();
        model.start_bulk_select(5, &ids(0..12));
        assert_eq!(model.count(), 5);
        assert_eq!(model.bulk().total_requested, 5);
        assert_eq!(model.bulk().remaining_to_select, 0);
        assert!(!model.bulk().is_active);

        let mut model = SelectionModel::new();
        model.start_bulk_select(20, &ids(0..12));
        assert_eq!(model.count(), 12);
        assert_eq!(model.bulk().remaining_to_select, 8);
        assert!(model.bulk().is_active);
        assert_invariant(&model);
    }

    #[test]
    fn test_start_bulk_counts_already_selected_rows() {
        let mut model = SelectionModel::new();
        model.select(0);
        model.select(1);
        model.start_bulk_select(3, &ids(0..12));
        // The first 3 page slots are consumed even though two were already
        // selected, so the set only grows by one and nothing stays pending.
        assert_eq!(model.count(), 3);
        assert!(!model.bulk().is_active);
    }

    #[test]
    fn test_apply_to_page_respects_quota_and_skips_selected() {
        let mut model = SelectionModel::new();
        model.start_bulk_select(15, &ids(0..12));
        assert_eq!(model.bulk().remaining_to_select, 3);

        // Page 2 shares two ids with page 1 (already selected); they must be
        // skipped, not double-counted.
        let page2 = vec![10, 11, 20, 21, 22, 23];
        model.apply_to_page(&page2);
        assert_eq!(model.count(), 15);
        assert!(model.is_selected(20));
        assert!(model.is_selected(21));
        assert!(model.is_selected(22));
        assert!(!model.is_selected(23));
        assert_eq!(model.bulk().remaining_to_select, 0);
        assert!(!model.bulk().is_active);
        assert_invariant(&model);
    }

    #[test]
    fn test_apply_to_page_inactive_is_noop() {
        let mut model = SelectionModel::new();
        model.apply_to_page(&ids(0..12));
        assert_eq!(model.count(), 0);
    }

    #[test]
    fn test_apply_exhausts_page_before_quota() {
        let mut model = SelectionModel::new();
        model.start_bulk_select(30, &ids(0..12));
        model.apply_to_page(&ids(12..18));
        assert_eq!(model.count(), 18);
        assert_eq!(model.bulk().remaining_to_select, 12);
        assert!(model.bulk().is_active);
        assert_invariant(&model);
    }

    #[test]
    fn test_manual_deselect_consumes_quota() {
        let mut model = SelectionModel::new();
        model.start_bulk_select(15, &ids(0..12));
        assert_eq!(model.bulk().remaining_to_select, 3);

        model.deselect(0);
        assert_eq!(model.bulk().remaining_to_select, 2);
        model.deselect(1);
        model.deselect(2);
        assert_eq!(model.bulk().remaining_to_select, 0);
        assert!(!model.bulk().is_active);

        // Floored at zero; no reactivation of a completed bulk state.
        model.deselect(3);
        assert_eq!(model.bulk().remaining_to_select, 0);
        assert!(!model.bulk().is_active);
        assert_invariant(&model);
    }

    #[test]
    fn test_manual_deselect_without_bulk_leaves_quota_untouched() {
        let mut model = SelectionModel::new();
        model.start_bulk_select(3, &ids(0..12));
        assert!(!model.bulk().is_active);
        model.deselect(0);
        assert_eq!(model.bulk().remaining_to_select, 0);
        assert!(!model.bulk().is_active);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut model = SelectionModel::new();
        model.start_bulk_select(20, &ids(0..12));
        model.clear();
        assert_eq!(model.count(), 0);
        assert_eq!(model.bulk(), BulkSelection::default());
    }

    #[test]
    fn test_bulk_15_over_two_pages_of_12() {
        let mut model = SelectionModel::new();
        let page1 = ids(100..112);
        let page2 = ids(200..212);

        model.start_bulk_select(15, &page1);
        assert_eq!(model.count(), 12);
        assert_eq!(model.bulk().remaining_to_select, 3);
        assert!(model.bulk().is_active);

        model.apply_to_page(&page2);
        assert_eq!(model.count(), 15);
        // First three ids of page 2, in page order.
        assert!(model.is_selected(200));
        assert!(model.is_selected(201));
        assert!(model.is_selected(202));
        assert!(!model.is_selected(203));
        assert_eq!(model.bulk().remaining_to_select, 0);
        assert!(!model.bulk().is_active);
    }

    #[test]
    fn test_toggle_all_refills_after_manual_deselects() {
        let mut model = SelectionModel::new();
        let page = ids(0..12);

        model.toggle_all_on_page(&page);
        assert_eq!(model.count(), 12);

        model.deselect(3);
        model.deselect(7);
        assert_eq!(model.count(), 10);

        // Not all selected anymore, so toggle-all fills the two gaps back in.
        model.toggle_all_on_page(&page);
        assert_eq!(model.count(), 12);
    }

    #[test]
    fn test_toggle_all_deselects_and_charges_quota() {
        let mut model = SelectionModel::new();
        let page1 = ids(0..12);
        model.start_bulk_select(30, &page1);
        assert_eq!(model.bulk().remaining_to_select, 18);

        model.toggle_all_on_page(&page1);
        assert_eq!(model.count(), 0);
        assert_eq!(model.bulk().remaining_to_select, 6);
        assert!(model.bulk().is_active);
        assert_eq!(model.bulk().total_requested, 30);

        // Quota bottoms out at zero even if another full page is deselected.
        model.toggle_all_on_page(&page1);
        model.toggle_all_on_page(&page1);
        assert_eq!(model.bulk().remaining_to_select, 0);
        assert!(!model.bulk().is_active);
        assert_invariant(&model);
    }

    #[test]
    fn test_toggle_all_on_empty_page_is_noop() {
        let mut model = SelectionModel::new();
        model.select(1);
        model.toggle_all_on_page(&[]);
        assert_eq!(model.count(), 1);
    }

    #[test]
    fn test_page_counting_helpers() {
        let mut model = SelectionModel::new();
        let page = ids(0..12);
        assert!(!model.all_selected_on_page(&page));
        assert!(!model.all_selected_on_page(&[]));

        model.start_bulk_select(6, &page);
        assert_eq!(model.count_on_page(&page), 6);
        assert_eq!(model.count_on_page(&ids(50..60)), 0);

        model.toggle_all_on_page(&page);
        assert!(model.all_selected_on_page(&page));
    }
}
