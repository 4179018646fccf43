// Selection rectangle resolution and committing a gesture into an item-id set.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::grid::GridPoint;
use crate::input::mouse::DragState;

/// Normalized cell rectangle, inclusive on all sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRect {
    pub start_row: usize,
    pub end_row: usize,
    pub start_col: usize,
    pub end_col: usize,
}

impl SelectionRect {
    /// Rectangle spanned by two corner cells, in any order.
    pub fn from_corners(a: GridPoint, b: GridPoint) -> Self {
        Self {
            start_row: a.row.min(b.row),
            end_row: a.row.max(b.row),
            start_col: a.col.min(b.col),
            end_col: a.col.max(b.col),
        }
    }

    /// Whether the rectangle covers exactly one cell.
    pub fn is_single_cell(&self) -> bool {
        self.start_row == self.end_row && self.start_col == self.end_col
    }

    pub fn contains(&self, point: GridPoint) -> bool {
        (self.start_row..=self.end_row).contains(&point.row)
            && (self.start_col..=self.end_col).contains(&point.col)
    }

    /// Number of cells covered, saturating at `usize::MAX`.
    pub fn cell_count(&self) -> usize {
        let rows = (self.end_row - self.start_row).saturating_add(1);
        let cols = (self.end_col - self.start_col).saturating_add(1);
        rows.saturating_mul(cols)
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = GridPoint> {
        let (start_col, end_col) = (self.start_col, self.end_col);
        (self.start_row..=self.end_row)
            .flat_map(move |row| (start_col..=end_col).map(move |col| GridPoint::new(row, col)))
    }
}

/// Current rectangle of a gesture, or `None` when no gesture has started.
///
/// A single-cell gesture is a valid 1x1 rectangle, not an absence.
pub fn resolve_rect(state: &DragState) -> Option<SelectionRect> {
    state
        .span()
        .map(|span| SelectionRect::from_corners(span.start, span.end))
}

/// Position → item index owned by the grid. Queried only at commit time.
pub trait ItemLookup<I> {
    fn item_at(&self, point: GridPoint) -> Option<I>;
}

impl<I, F> ItemLookup<I> for F
where
    F: Fn(GridPoint) -> Option<I>,
{
    fn item_at(&self, point: GridPoint) -> Option<I> {
        self(point)
    }
}

impl<I: Clone> ItemLookup<I> for HashMap<GridPoint, I> {
    fn item_at(&self, point: GridPoint) -> Option<I> {
        self.get(&point).cloned()
    }
}

/// Proposed next value for the host's selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionUpdate<I: Eq + Hash> {
    /// Replace the selection outright (possibly with an empty set).
    Replace(HashSet<I>),
    /// Union these items into the prior selection.
    Union(HashSet<I>),
}

impl<I: Eq + Hash + Clone> SelectionUpdate<I> {
    /// Apply to the prior selection and return the next one.
    pub fn apply(&self, prior: &HashSet<I>) -> HashSet<I> {
        match self {
            SelectionUpdate::Replace(items) => items.clone(),
            SelectionUpdate::Union(items) => prior.union(items).cloned().collect(),
        }
    }

    /// The items swept by the gesture, regardless of merge mode.
    pub fn items(&self) -> &HashSet<I> {
        match self {
            SelectionUpdate::Replace(items) | SelectionUpdate::Union(items) => items,
        }
    }
}

/// What to do with a single-cell, non-additive gesture that began outside selection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SingleCellPolicy {
    /// Treat it as a plain click and leave the selection alone.
    #[default]
    Click,
    /// Commit it like any other rectangle.
    Commit,
}

impl SingleCellPolicy {
    pub const NAMES: &'static [&'static str] = &["click", "commit"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "click" => Some(Self::Click),
            "commit" => Some(Self::Commit),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Commit => "commit",
        }
    }
}

/// Facts about a finished gesture that a host needs to apply its commit policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureSummary {
    pub rect: SelectionRect,
    pub is_single_cell: bool,
    pub was_selection_mode_active: bool,
    pub is_additive: bool,
}

impl GestureSummary {
    pub fn new(rect: SelectionRect, was_selection_mode_active: bool, is_additive: bool) -> Self {
        Self {
            rect,
            is_single_cell: rect.is_single_cell(),
            was_selection_mode_active,
            is_additive,
        }
    }

    /// Whether the gesture should be treated as a plain click under `policy`.
    pub fn is_click(&self, policy: SingleCellPolicy) -> bool {
        policy == SingleCellPolicy::Click
            && self.is_single_cell
            && !self.was_selection_mode_active
            && !self.is_additive
    }
}

/// Result of committing a gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome<I: Eq + Hash> {
    /// The gesture was a plain click; the selection must not change.
    Click,
    Update(SelectionUpdate<I>),
}

/// Collect the items under `rect` into a selection update.
///
/// Additive gestures union into the prior selection. Non-additive gestures replace it,
/// including with an empty set when the rectangle covers no items. A non-additive
/// gesture over a single already-selected item re-selects exactly that item.
pub fn collect<I, L>(rect: &SelectionRect, additive: bool, lookup: &L) -> SelectionUpdate<I>
where
    I: Eq + Hash + Clone,
    L: ItemLookup<I> + ?Sized,
{
    let items: HashSet<I> = rect.cells().filter_map(|p| lookup.item_at(p)).collect();
    if additive {
        SelectionUpdate::Union(items)
    } else {
        SelectionUpdate::Replace(items)
    }
}

/// Commit a finished gesture, honoring the single-cell policy.
pub fn commit<I, L>(
    summary: &GestureSummary,
    policy: SingleCellPolicy,
    lookup: &L,
) -> CommitOutcome<I>
where
    I: Eq + Hash + Clone,
    L: ItemLookup<I> + ?Sized,
{
    if summary.is_click(policy) {
        log::debug!("single-cell gesture treated as click");
        return CommitOutcome::Click;
    }
    let update = collect(&summary.rect, summary.is_additive, lookup);
    log::debug!(
        "committing {} item(s) from {} cell(s) (additive={})",
        update.items().len(),
        summary.rect.cell_count(),
        summary.is_additive
    );
    CommitOutcome::Update(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(ids: &[&'static str]) -> HashSet<&'static str> {
        ids.iter().copied().collect()
    }

    fn items(entries: &[(&str, &'static str)]) -> HashMap<GridPoint, &'static str> {
        entries
            .iter()
            .map(|(label, id)| (GridPoint::from_label(label).unwrap(), *id))
            .collect()
    }

    fn rect(r1: usize, c1: usize, r2: usize, c2: usize) -> SelectionRect {
        SelectionRect::from_corners(GridPoint::new(r1, c1), GridPoint::new(r2, c2))
    }

    // ── Resolver ───────────────────────────────────────────────────

    #[test]
    fn no_rect_before_gesture() {
        assert_eq!(resolve_rect(&DragState::new()), None);
    }

    #[test]
    fn single_cell_gesture_is_a_rect() {
        let mut state = DragState::new();
        state.start(4, 4, false);
        let r = resolve_rect(&state).unwrap();
        assert!(r.is_single_cell());
        assert_eq!(r.cell_count(), 1);
    }

    #[test]
    fn rect_survives_end_until_reset() {
        let mut state = DragState::new();
        state.start(1, 1, false);
        state.extend(2, 3);
        state.end();
        assert_eq!(resolve_rect(&state), Some(rect(1, 1, 2, 3)));
        state.reset();
        assert_eq!(resolve_rect(&state), None);
    }

    proptest! {
        #[test]
        fn rect_is_min_max_of_corners(
            r1 in 0usize..1000, c1 in 0usize..1000,
            r2 in 0usize..1000, c2 in 0usize..1000,
        ) {
            let mut state = DragState::new();
            state.start(r1, c1, false);
            state.extend(r2, c2);
            let r = resolve_rect(&state).unwrap();
            prop_assert_eq!(r, SelectionRect {
                start_row: r1.min(r2),
                end_row: r1.max(r2),
                start_col: c1.min(c2),
                end_col: c1.max(c2),
            });
        }
    }

    #[test]
    fn cells_iterate_row_major() {
        let cells: Vec<_> = rect(1, 2, 0, 1).cells().collect();
        assert_eq!(
            cells,
            vec![
                GridPoint::new(0, 1),
                GridPoint::new(0, 2),
                GridPoint::new(1, 1),
                GridPoint::new(1, 2),
            ]
        );
    }

    #[test]
    fn contains_covers_edges_only_inside() {
        let r = rect(1, 1, 3, 2);
        assert!(r.contains(GridPoint::new(1, 1)));
        assert!(r.contains(GridPoint::new(3, 2)));
        assert!(r.contains(GridPoint::new(2, 1)));
        assert!(!r.contains(GridPoint::new(0, 1)));
        assert!(!r.contains(GridPoint::new(4, 2)));
        assert!(!r.contains(GridPoint::new(2, 3)));
    }

    #[test]
    fn cell_count_of_full_range_saturates() {
        assert_eq!(rect(0, 0, 2, 3).cell_count(), 12);
        assert_eq!(rect(0, 0, usize::MAX, 0).cell_count(), usize::MAX);
        assert_eq!(rect(0, 0, usize::MAX, usize::MAX).cell_count(), usize::MAX);
    }

    // ── Merge rules ────────────────────────────────────────────────

    #[test]
    fn additive_merge_unions_prior() {
        let grid = items(&[("A1", "B"), ("A2", "C"), ("C3", "A")]);
        let prior = set(&["A", "B"]);
        let update = collect(&rect(0, 0, 0, 1), true, &grid);
        assert_eq!(update.apply(&prior), set(&["A", "B", "C"]));
    }

    #[test]
    fn replace_merge_drops_prior() {
        let grid = items(&[("A1", "B"), ("A2", "C"), ("C3", "A")]);
        let prior = set(&["A", "B"]);
        let update = collect(&rect(0, 0, 0, 1), false, &grid);
        assert_eq!(update.apply(&prior), set(&["B", "C"]));
    }

    #[test]
    fn empty_drag_clears_selection() {
        let grid = items(&[("J10", "far")]);
        let prior = set(&["A", "B"]);
        let update = collect(&rect(0, 0, 2, 2), false, &grid);
        assert_eq!(update, SelectionUpdate::Replace(HashSet::new()));
        assert!(update.apply(&prior).is_empty());
    }

    #[test]
    fn single_selected_cell_is_reselected_not_toggled() {
        let grid = items(&[("B2", "id2"), ("C3", "id3")]);
        let prior = set(&["id2", "id3"]);
        let update = collect(&rect(1, 1, 1, 1), false, &grid);
        assert_eq!(update.apply(&prior), set(&["id2"]));
    }

    #[test]
    fn closure_lookup_is_supported() {
        let lookup = |p: GridPoint| (p.row == p.col).then_some(p.row);
        let update: SelectionUpdate<usize> = collect(&rect(0, 0, 2, 2), false, &lookup);
        let expected: HashSet<usize> = [0, 1, 2].into_iter().collect();
        assert_eq!(update.items(), &expected);
    }

    // ── Single-cell policy ─────────────────────────────────────────

    #[test]
    fn click_policy_skips_plain_single_cell() {
        let grid = items(&[("A1", "id1")]);
        let summary = GestureSummary::new(rect(0, 0, 0, 0), false, false);
        let outcome = commit(&summary, SingleCellPolicy::Click, &grid);
        assert_eq!(outcome, CommitOutcome::Click);
    }

    #[test]
    fn click_policy_commits_when_mode_was_active() {
        let grid = items(&[("A1", "id1")]);
        let summary = GestureSummary::new(rect(0, 0, 0, 0), true, false);
        let outcome = commit(&summary, SingleCellPolicy::Click, &grid);
        assert_eq!(outcome, CommitOutcome::Update(SelectionUpdate::Replace(set(&["id1"]))));
    }

    #[test]
    fn click_policy_commits_additive_single_cell() {
        let grid = items(&[("A1", "id1")]);
        let summary = GestureSummary::new(rect(0, 0, 0, 0), false, true);
        let outcome = commit(&summary, SingleCellPolicy::Click, &grid);
        assert_eq!(outcome, CommitOutcome::Update(SelectionUpdate::Union(set(&["id1"]))));
    }

    #[test]
    fn commit_policy_always_commits() {
        let grid = items(&[("A1", "id1")]);
        let summary = GestureSummary::new(rect(0, 0, 0, 0), false, false);
        let outcome = commit(&summary, SingleCellPolicy::Commit, &grid);
        assert!(matches!(outcome, CommitOutcome::Update(_)));
    }

    #[test]
    fn policy_names_roundtrip() {
        for name in SingleCellPolicy::NAMES {
            assert_eq!(SingleCellPolicy::from_name(name).unwrap().name(), *name);
        }
        assert_eq!(SingleCellPolicy::from_name("toggle"), None);
    }
}
