//! Multi-page layout of an ordered question list
//!
//! The engine walks the records in order. A change of `round_index` (or the
//! first record) always opens a fresh page, even if the current one still
//! has room, so rounds never share a page. Within a round the configured
//! strategy picks a position; when the page is full the engine moves on to
//! the next page.

use crate::options::QuizOptions;
use crate::types::{
    GridOptions, LayoutError, PlacementResult, PlacementStrategyKind, QuestionRecord,
};

use super::{GridManager, GridPosition, PlacementStrategy};

/// Where the engine is relative to round boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineState {
    /// The next record starts a round and must go on a new page
    ExpectNewRoundPage,
    /// The next record continues the round on the current page
    PlacingWithinRound,
}

/// Result of a successful `layout()` call
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOutcome<P> {
    /// One placement per input record, in input order
    pub placements: Vec<PlacementResult<P>>,
    /// Number of pages used (0 when there were no records)
    pub total_pages: usize,
}

impl<P> LayoutOutcome<P> {
    /// Placements on one page, in placement order
    pub fn page(&self, page_index: usize) -> impl Iterator<Item = &PlacementResult<P>> {
        self.placements
            .iter()
            .filter(move |placement| placement.page_index == page_index)
    }
}

/// Places questions onto page grids.
///
/// The strategy is chosen once at construction. Every `layout()` call works
/// on its own `GridManager`, so an engine can be reused and repeated calls
/// with the same input give the same result.
#[derive(Debug)]
pub struct LayoutEngine {
    grid: GridOptions,
    strategy: Box<dyn PlacementStrategy>,
}

impl LayoutEngine {
    pub fn new(grid: GridOptions, strategy: PlacementStrategyKind) -> Self {
        Self::with_strategy(grid, strategy.build())
    }

    /// Use a custom strategy implementation
    pub fn with_strategy(grid: GridOptions, strategy: Box<dyn PlacementStrategy>) -> Self {
        Self { grid, strategy }
    }

    pub fn from_options(options: &QuizOptions) -> Self {
        Self::new(options.grid, options.placement)
    }

    pub fn grid(&self) -> GridOptions {
        self.grid
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Lay out `records` in order.
    ///
    /// Fails only if a record's footprint is larger than the grid itself;
    /// in that case no placements are returned.
    pub fn layout<P>(
        &self,
        records: Vec<QuestionRecord<P>>,
    ) -> Result<LayoutOutcome<P>, LayoutError> {
        let mut grid = GridManager::from_options(&self.grid);
        let mut placements = Vec::with_capacity(records.len());

        let mut state = EngineState::ExpectNewRoundPage;
        let mut current_page: Option<usize> = None;
        let mut previous_round: Option<usize> = None;

        for record in records {
            let (w, h) = record.size.cells();
            if w > grid.width() || h > grid.height() {
                return Err(LayoutError::ItemTooLarge {
                    category: record.category,
                    subcategory: record.subcategory,
                    sequence_index: record.sequence_index,
                    width: w,
                    height: h,
                    grid_width: grid.width(),
                    grid_height: grid.height(),
                });
            }

            if previous_round != Some(record.round_index) {
                state = EngineState::ExpectNewRoundPage;
            }

            let mut page = match (state, current_page) {
                (EngineState::ExpectNewRoundPage, Some(last)) => {
                    log::debug!(
                        "Round {} starts on new page {}",
                        record.round_index,
                        last + 1
                    );
                    last + 1
                }
                (EngineState::PlacingWithinRound, Some(last)) => last,
                (_, None) => 0,
            };
            grid.ensure_page(page);

            let position = self.place_from(&mut grid, &mut page, w, h, record.sequence_index)?;

            current_page = Some(page);
            previous_round = Some(record.round_index);
            state = EngineState::PlacingWithinRound;

            placements.push(PlacementResult {
                question_record: record,
                page_index: page,
                row: position.row,
                col: position.col,
                width_cells: w,
                height_cells: h,
            });
        }

        let total_pages = current_page.map_or(0, |last| last + 1);
        log::info!(
            "Laid out {} questions on {} pages using {} placement",
            placements.len(),
            total_pages,
            self.strategy.name()
        );

        Ok(LayoutOutcome {
            placements,
            total_pages,
        })
    }

    /// Search `page` and the pages after it until the strategy finds room,
    /// then mark the cells. `page` is left at the page that was used.
    fn place_from(
        &self,
        grid: &mut GridManager,
        page: &mut usize,
        w: usize,
        h: usize,
        sequence_index: usize,
    ) -> Result<GridPosition, LayoutError> {
        loop {
            if let Some(pos) = self.strategy.find_position(grid, *page, w, h) {
                grid.place_at(*page, pos.row, pos.col, w, h)?;
                return Ok(pos);
            }

            // An item that fits the grid always fits an empty page
            if grid.occupied_cells(*page) == 0 {
                return Err(LayoutError::Unplaceable {
                    strategy: self.strategy.name(),
                    sequence_index,
                });
            }

            log::debug!(
                "Page {} has no room for a {}x{} item, moving to page {}",
                *page,
                w,
                h,
                *page + 1
            );
            *page += 1;
            grid.ensure_page(*page);
        }
    }
}
