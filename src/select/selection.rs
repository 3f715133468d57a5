use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::calc::{date_key, dates_in_range};

/// Whether a drag gesture adds to or removes from the selection. Decided
/// once when the gesture starts and applied uniformly to the whole range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureMode {
    Select,
    Delete,
}

/// The in-flight drag gesture: anchor date plus the mode inferred from it.
#[derive(Debug)]
struct PendingRange {
    start: NaiveDate,
    mode: GestureMode,
}

/// Owns the selected-date set and the press/hold/drag/release protocol.
///
/// Every operation is total: calling one in a state it does not apply to is
/// a silent no-op and never disturbs the selection. The UI layer guarantees
/// past dates never reach this type, because their cells carry no date.
#[derive(Debug, Default)]
pub struct SelectionModel {
    selected: BTreeSet<NaiveDate>,
    pending: Option<PendingRange>,
    /// Live highlighted range while dragging. Visual only; replaced
    /// wholesale on every update so a stale highlight cannot survive.
    preview: Vec<NaiveDate>,
}

impl SelectionModel {
    pub fn new(initial: BTreeSet<NaiveDate>) -> Self {
        SelectionModel {
            selected: initial,
            pending: None,
            preview: Vec::new(),
        }
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.selected.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn gesture_in_progress(&self) -> bool {
        self.pending.is_some()
    }

    /// The gesture mode `date` is currently previewed under, if any.
    pub fn preview_mode_for(&self, date: NaiveDate) -> Option<GestureMode> {
        if self.preview.contains(&date) {
            self.pending.as_ref().map(|pending| pending.mode)
        } else {
            None
        }
    }

    /// Adds `date` to the selection, or removes it when already present.
    pub fn toggle_date(&mut self, date: NaiveDate) {
        if !self.selected.remove(&date) {
            self.selected.insert(date);
        }
    }

    /// Starts a drag gesture anchored at `date`. The caller invokes this
    /// only after the hold threshold has elapsed; a quick press/release is
    /// dispatched as `toggle_date` instead. Ignored while another gesture
    /// is active, so a stray second press cannot corrupt the anchor.
    pub fn begin_gesture(&mut self, date: NaiveDate) {
        if self.pending.is_some() {
            return;
        }
        let mode = if self.selected.contains(&date) {
            GestureMode::Delete
        } else {
            GestureMode::Select
        };
        self.pending = Some(PendingRange { start: date, mode });
        self.preview = vec![date];
    }

    /// Recomputes the live highlighted range from the anchor to `date`.
    /// Never mutates the selection. No-op when no gesture is active.
    pub fn update_preview(&mut self, date: NaiveDate) {
        if let Some(pending) = &self.pending {
            self.preview = dates_in_range(pending.start, date);
        }
    }

    /// Commits the gesture range from the anchor to `date`: inserts every
    /// day for a Select gesture, removes every day for a Delete gesture.
    /// No-op when no gesture is active.
    pub fn end_gesture(&mut self, date: NaiveDate) {
        let pending = match self.pending.take() {
            Some(pending) => pending,
            None => return,
        };
        for day in dates_in_range(pending.start, date) {
            match pending.mode {
                GestureMode::Select => {
                    self.selected.insert(day);
                }
                GestureMode::Delete => {
                    self.selected.remove(&day);
                }
            }
        }
        self.preview.clear();
    }

    /// Abandons any in-progress gesture without touching the selection.
    /// Safe to call when no gesture is active.
    pub fn cancel_gesture(&mut self) {
        self.pending = None;
        self.preview.clear();
    }

    /// Toggles a whole column of dates uniformly: the action is decided
    /// from the first date alone, so a mixed column ends fully selected or
    /// fully cleared rather than flipped per cell. No-op on an empty slice.
    pub fn toggle_all(&mut self, dates: &[NaiveDate]) {
        let first = match dates.first() {
            Some(first) => first,
            None => return,
        };
        let remove = self.selected.contains(first);
        for date in dates {
            if remove {
                self.selected.remove(date);
            } else {
                self.selected.insert(*date);
            }
        }
    }

    /// The selection as ascending ISO date keys.
    pub fn sorted_keys(&self) -> Vec<String> {
        self.selected.iter().copied().map(date_key).collect()
    }

    /// The comma-joined form mirrored into the input field. Empty string
    /// when nothing is selected.
    pub fn input_value(&self) -> String {
        self.sorted_keys().join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn model_with(dates: &[NaiveDate]) -> SelectionModel {
        SelectionModel::new(dates.iter().copied().collect())
    }

    // ── toggle_date tests ─────────────────────────────────────────────────────

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut model = SelectionModel::default();
        let date = d(2025, 5, 10);
        model.toggle_date(date);
        assert!(model.is_selected(date));
        model.toggle_date(date);
        assert!(!model.is_selected(date));
        assert!(model.is_empty());
    }

    #[test]
    fn test_toggle_pair_restores_membership() {
        let mut model = model_with(&[d(2025, 5, 10)]);
        model.toggle_date(d(2025, 5, 10));
        model.toggle_date(d(2025, 5, 10));
        assert!(model.is_selected(d(2025, 5, 10)));
        assert_eq!(model.len(), 1);
    }

    // ── gesture mode inference ────────────────────────────────────────────────

    #[test]
    fn test_begin_on_unselected_date_is_select_mode() {
        let mut model = SelectionModel::default();
        model.begin_gesture(d(2025, 5, 10));
        assert!(model.gesture_in_progress());
        assert_eq!(
            model.preview_mode_for(d(2025, 5, 10)),
            Some(GestureMode::Select)
        );
    }

    #[test]
    fn test_begin_on_selected_date_is_delete_mode() {
        let mut model = model_with(&[d(2025, 5, 10)]);
        model.begin_gesture(d(2025, 5, 10));
        assert_eq!(
            model.preview_mode_for(d(2025, 5, 10)),
            Some(GestureMode::Delete)
        );
    }

    #[test]
    fn test_begin_while_gesturing_keeps_original_anchor() {
        let mut model = SelectionModel::default();
        model.begin_gesture(d(2025, 5, 10));
        model.begin_gesture(d(2025, 5, 20));
        model.end_gesture(d(2025, 5, 11));
        // Anchor stayed at the 10th: two days selected, not the 20th's range.
        assert_eq!(model.sorted_keys(), vec!["2025-05-10", "2025-05-11"]);
    }

    // ── preview tests ─────────────────────────────────────────────────────────

    #[test]
    fn test_preview_never_mutates_selection() {
        let mut model = SelectionModel::default();
        model.begin_gesture(d(2025, 5, 10));
        model.update_preview(d(2025, 5, 14));
        assert!(model.is_empty());
        assert_eq!(
            model.preview_mode_for(d(2025, 5, 12)),
            Some(GestureMode::Select)
        );
    }

    #[test]
    fn test_preview_is_replaced_not_accumulated() {
        let mut model = SelectionModel::default();
        model.begin_gesture(d(2025, 5, 10));
        model.update_preview(d(2025, 5, 14));
        model.update_preview(d(2025, 5, 11));
        // The 14th was highlighted by the first move and must be gone now.
        assert_eq!(model.preview_mode_for(d(2025, 5, 14)), None);
        assert_eq!(
            model.preview_mode_for(d(2025, 5, 11)),
            Some(GestureMode::Select)
        );
    }

    #[test]
    fn test_preview_without_gesture_is_noop() {
        let mut model = SelectionModel::default();
        model.update_preview(d(2025, 5, 14));
        assert_eq!(model.preview_mode_for(d(2025, 5, 14)), None);
        assert!(!model.gesture_in_progress());
    }

    #[test]
    fn test_preview_handles_backwards_drag() {
        let mut model = SelectionModel::default();
        model.begin_gesture(d(2025, 5, 10));
        model.update_preview(d(2025, 5, 7));
        assert_eq!(
            model.preview_mode_for(d(2025, 5, 8)),
            Some(GestureMode::Select)
        );
    }

    // ── end_gesture tests ─────────────────────────────────────────────────────

    #[test]
    fn test_select_gesture_commits_whole_range() {
        let mut model = SelectionModel::default();
        model.begin_gesture(d(2025, 5, 10));
        model.end_gesture(d(2025, 5, 13));
        assert_eq!(model.len(), 4);
        assert!(model.is_selected(d(2025, 5, 10)));
        assert!(model.is_selected(d(2025, 5, 13)));
        assert!(!model.gesture_in_progress());
    }

    #[test]
    fn test_commit_ignores_intermediate_previews() {
        let mut model = SelectionModel::default();
        model.begin_gesture(d(2025, 5, 10));
        model.update_preview(d(2025, 5, 31));
        model.update_preview(d(2025, 5, 3));
        model.end_gesture(d(2025, 5, 12));
        // Only the final [10th, 12th] range lands, whatever was previewed.
        assert_eq!(
            model.sorted_keys(),
            vec!["2025-05-10", "2025-05-11", "2025-05-12"]
        );
    }

    #[test]
    fn test_select_gesture_across_month_boundary() {
        let mut model = SelectionModel::default();
        model.begin_gesture(d(2024, 3, 30));
        model.end_gesture(d(2024, 4, 2));
        assert_eq!(
            model.sorted_keys(),
            vec!["2024-03-30", "2024-03-31", "2024-04-01", "2024-04-02"]
        );
    }

    #[test]
    fn test_delete_gesture_spanning_selected_anchor() {
        let mut model = model_with(&[d(2024, 5, 10)]);
        model.begin_gesture(d(2024, 5, 10));
        model.end_gesture(d(2024, 5, 12));
        assert!(model.is_empty());
    }

    #[test]
    fn test_delete_gesture_removes_only_range() {
        let mut model = model_with(&[d(2025, 5, 1), d(2025, 5, 10), d(2025, 5, 11)]);
        model.begin_gesture(d(2025, 5, 10));
        model.end_gesture(d(2025, 5, 12));
        assert_eq!(model.sorted_keys(), vec!["2025-05-01"]);
    }

    #[test]
    fn test_reversed_release_selects_same_range() {
        let mut model = SelectionModel::default();
        model.begin_gesture(d(2025, 5, 13));
        model.end_gesture(d(2025, 5, 10));
        assert_eq!(model.len(), 4);
        assert!(model.is_selected(d(2025, 5, 10)));
    }

    #[test]
    fn test_end_without_begin_is_noop() {
        let mut model = model_with(&[d(2025, 5, 10)]);
        model.end_gesture(d(2025, 5, 20));
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn test_end_clears_preview() {
        let mut model = SelectionModel::default();
        model.begin_gesture(d(2025, 5, 10));
        model.update_preview(d(2025, 5, 14));
        model.end_gesture(d(2025, 5, 14));
        assert_eq!(model.preview_mode_for(d(2025, 5, 12)), None);
    }

    // ── cancel_gesture tests ──────────────────────────────────────────────────

    #[test]
    fn test_cancel_leaves_selection_unchanged() {
        let mut model = model_with(&[d(2025, 5, 1)]);
        model.begin_gesture(d(2025, 5, 10));
        model.update_preview(d(2025, 5, 20));
        model.cancel_gesture();
        assert_eq!(model.sorted_keys(), vec!["2025-05-01"]);
        assert!(!model.gesture_in_progress());
        assert_eq!(model.preview_mode_for(d(2025, 5, 15)), None);
    }

    #[test]
    fn test_cancel_when_idle_is_safe() {
        let mut model = SelectionModel::default();
        model.cancel_gesture();
        assert!(model.is_empty());
    }

    // ── toggle_all tests ──────────────────────────────────────────────────────

    #[test]
    fn test_toggle_all_adds_when_first_unselected() {
        // Mixed column: second date already selected, first not.
        let mut model = model_with(&[d(2025, 5, 12)]);
        let column = [d(2025, 5, 5), d(2025, 5, 12), d(2025, 5, 19)];
        model.toggle_all(&column);
        assert_eq!(model.len(), 3);
    }

    #[test]
    fn test_toggle_all_removes_when_first_selected() {
        let column = [d(2025, 5, 5), d(2025, 5, 12), d(2025, 5, 19)];
        let mut model = model_with(&column);
        model.toggle_all(&column);
        assert!(model.is_empty());
    }

    #[test]
    fn test_toggle_all_round_trip() {
        let mut model = SelectionModel::default();
        let column = [d(2025, 5, 4), d(2025, 5, 11), d(2025, 6, 1)];
        model.toggle_all(&column);
        assert_eq!(model.len(), 3);
        model.toggle_all(&column);
        assert!(model.is_empty());
    }

    #[test]
    fn test_toggle_all_empty_is_noop() {
        let mut model = model_with(&[d(2025, 5, 1)]);
        model.toggle_all(&[]);
        assert_eq!(model.len(), 1);
    }

    // ── sink formatting tests ─────────────────────────────────────────────────

    #[test]
    fn test_sorted_keys_ascending_without_duplicates() {
        let mut model = SelectionModel::default();
        model.toggle_date(d(2025, 6, 15));
        model.toggle_date(d(2024, 12, 31));
        model.toggle_date(d(2025, 1, 1));
        assert_eq!(
            model.sorted_keys(),
            vec!["2024-12-31", "2025-01-01", "2025-06-15"]
        );
    }

    #[test]
    fn test_input_value_joins_with_commas() {
        let model = model_with(&[d(2024, 5, 1), d(2024, 5, 2), d(2024, 6, 15)]);
        assert_eq!(model.input_value(), "2024-05-01,2024-05-02,2024-06-15");
    }

    #[test]
    fn test_input_value_empty_selection() {
        assert_eq!(SelectionModel::default().input_value(), "");
    }

    #[test]
    fn test_new_seeds_initial_selection() {
        let model = model_with(&[d(2025, 5, 1)]);
        assert!(model.is_selected(d(2025, 5, 1)));
        assert_eq!(model.len(), 1);
    }
}
