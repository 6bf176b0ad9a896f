use crate::layout::LayoutOutcome;
use crate::types::GridOptions;

/// Summary of a finished layout
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutStatistics {
    /// Number of questions placed
    pub placed_items: usize,
    /// Pages used by the layout
    pub total_pages: usize,
    /// Number of distinct rounds
    pub rounds: usize,
    /// Pages spanned by each round, in round order
    pub pages_per_round: Vec<usize>,
    /// Cells covered by placed questions
    pub cells_used: usize,
    /// Cells on all used pages
    pub cells_available: usize,
    /// `cells_used / cells_available` (0.0 for an empty layout)
    pub utilization: f32,
}

/// Calculate statistics for a layout
pub fn calculate_statistics<P>(outcome: &LayoutOutcome<P>, grid: &GridOptions) -> LayoutStatistics {
    let cells_used: usize = outcome
        .placements
        .iter()
        .map(|p| p.width_cells * p.height_cells)
        .sum();
    let cells_available = outcome.total_pages * grid.cell_count();

    // Rounds are contiguous in the placement list, and each occupies a
    // contiguous run of pages
    let mut pages_per_round = Vec::new();
    let mut current: Option<(usize, usize, usize)> = None; // (round, first page, last page)
    for placement in &outcome.placements {
        let round = placement.question_record.round_index;
        current = match current {
            Some((r, first, _)) if r == round => Some((r, first, placement.page_index)),
            Some((_, first, last)) => {
                pages_per_round.push(last - first + 1);
                Some((round, placement.page_index, placement.page_index))
            }
            None => Some((round, placement.page_index, placement.page_index)),
        };
    }
    if let Some((_, first, last)) = current {
        pages_per_round.push(last - first + 1);
    }

    let utilization = if cells_available == 0 {
        0.0
    } else {
        cells_used as f32 / cells_available as f32
    };

    LayoutStatistics {
        placed_items: outcome.placements.len(),
        total_pages: outcome.total_pages,
        rounds: pages_per_round.len(),
        pages_per_round,
        cells_used,
        cells_available,
        utilization,
    }
}
