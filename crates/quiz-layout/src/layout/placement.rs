//! Placement strategies
//!
//! A strategy answers one question: given the current occupancy of a page,
//! where should a `w x h` item go? Page breaks and round boundaries are the
//! engine's concern, not the strategy's.

use crate::types::PlacementStrategyKind;

use super::{GridManager, GridPosition};

/// Chooses a position for an item on a single page.
pub trait PlacementStrategy: std::fmt::Debug {
    /// Short name used in log output and errors
    fn name(&self) -> &'static str;

    /// Find a free `w x h` rectangle on `page`, or `None` if the page has
    /// no room for it.
    fn find_position(
        &self,
        grid: &GridManager,
        page: usize,
        w: usize,
        h: usize,
    ) -> Option<GridPosition>;
}

impl PlacementStrategyKind {
    /// Construct the strategy this kind names
    pub fn build(self) -> Box<dyn PlacementStrategy> {
        match self {
            PlacementStrategyKind::TopLeft => Box::new(TopLeftStrategy),
            PlacementStrategyKind::Compact => Box::new(CompactStrategy),
        }
    }
}

// =============================================================================
// Top-Left
// =============================================================================

/// Row-major first fit: rows top to bottom, then columns left to right.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopLeftStrategy;

impl PlacementStrategy for TopLeftStrategy {
    fn name(&self) -> &'static str {
        "top-left"
    }

    fn find_position(
        &self,
        grid: &GridManager,
        page: usize,
        w: usize,
        h: usize,
    ) -> Option<GridPosition> {
        let last_row = grid.height().checked_sub(h)?;
        let last_col = grid.width().checked_sub(w)?;

        (0..=last_row)
            .flat_map(|row| (0..=last_col).map(move |col| GridPosition::new(row, col)))
            .find(|pos| grid.can_place_at(page, pos.row, pos.col, w, h))
    }
}

// =============================================================================
// Compact
// =============================================================================

/// Prefers filling rows that already hold content.
///
/// Single-row items are first tried in rows with at least one occupied
/// cell, so short items sit beside existing content instead of opening a
/// mostly-empty row. Everything else uses top-left first fit.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactStrategy;

impl CompactStrategy {
    fn find_in_started_rows(grid: &GridManager, page: usize, w: usize) -> Option<GridPosition> {
        let last_col = grid.width().checked_sub(w)?;

        (0..grid.height())
            .filter(|&row| grid.row_has_content(page, row))
            .flat_map(|row| (0..=last_col).map(move |col| GridPosition::new(row, col)))
            .find(|pos| grid.can_place_at(page, pos.row, pos.col, w, 1))
    }
}

impl PlacementStrategy for CompactStrategy {
    fn name(&self) -> &'static str {
        "compact"
    }

    fn find_position(
        &self,
        grid: &GridManager,
        page: usize,
        w: usize,
        h: usize,
    ) -> Option<GridPosition> {
        if h == 1 {
            if let Some(pos) = Self::find_in_started_rows(grid, page, w) {
                return Some(pos);
            }
        }
        TopLeftStrategy.find_position(grid, page, w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_left_empty_page() {
        let grid = GridManager::new(4, 8);
        assert_eq!(
            TopLeftStrategy.find_position(&grid, 0, 2, 1),
            Some(GridPosition::new(0, 0))
        );
    }

    #[test]
    fn test_top_left_skips_occupied() {
        let mut grid = GridManager::new(4, 8);
        grid.place_at(0, 0, 0, 3, 1).unwrap();

        // A 1x1 still fits at the end of row 0
        assert_eq!(
            TopLeftStrategy.find_position(&grid, 0, 1, 1),
            Some(GridPosition::new(0, 3))
        );
        // A 2x1 has to move down a row
        assert_eq!(
            TopLeftStrategy.find_position(&grid, 0, 2, 1),
            Some(GridPosition::new(1, 0))
        );
    }

    #[test]
    fn test_top_left_full_page() {
        let mut grid = GridManager::new(4, 8);
        grid.place_at(0, 0, 0, 4, 8).unwrap();
        assert_eq!(TopLeftStrategy.find_position(&grid, 0, 1, 1), None);
    }

    #[test]
    fn test_top_left_oversized() {
        let grid = GridManager::new(4, 8);
        assert_eq!(TopLeftStrategy.find_position(&grid, 0, 5, 1), None);
        assert_eq!(TopLeftStrategy.find_position(&grid, 0, 1, 9), None);
    }

    #[test]
    fn test_compact_fills_started_row() {
        // Row 0 = [occupied, empty, empty, empty]
        let mut grid = GridManager::new(4, 8);
        grid.place_at(0, 0, 0, 1, 1).unwrap();

        assert_eq!(
            CompactStrategy.find_position(&grid, 0, 1, 1),
            Some(GridPosition::new(0, 1))
        );
    }

    #[test]
    fn test_compact_prefers_started_row_over_earlier_empty_row() {
        let mut grid = GridManager::new(4, 8);
        // Row 0 is full; row 3 holds a single item
        grid.place_at(0, 0, 0, 4, 1).unwrap();
        grid.place_at(0, 3, 0, 1, 1).unwrap();

        // Row 1 is empty and comes first, but row 3 already has content
        assert_eq!(
            CompactStrategy.find_position(&grid, 0, 2, 1),
            Some(GridPosition::new(3, 1))
        );
        assert_eq!(
            TopLeftStrategy.find_position(&grid, 0, 2, 1),
            Some(GridPosition::new(1, 0))
        );
    }

    #[test]
    fn test_compact_falls_back_for_tall_items() {
        let mut grid = GridManager::new(4, 8);
        grid.place_at(0, 2, 0, 1, 1).unwrap();

        assert_eq!(
            CompactStrategy.find_position(&grid, 0, 2, 2),
            Some(GridPosition::new(0, 0))
        );
    }

    #[test]
    fn test_compact_falls_back_when_started_rows_full() {
        let mut grid = GridManager::new(4, 8);
        grid.place_at(0, 0, 0, 4, 1).unwrap();

        assert_eq!(
            CompactStrategy.find_position(&grid, 0, 1, 1),
            Some(GridPosition::new(1, 0))
        );
    }

    #[test]
    fn test_kind_builds_named_strategy() {
        assert_eq!(PlacementStrategyKind::TopLeft.build().name(), "top-left");
        assert_eq!(PlacementStrategyKind::Compact.build().name(), "compact");
    }
}
