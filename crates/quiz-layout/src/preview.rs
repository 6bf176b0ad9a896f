use crate::layout::LayoutOutcome;
use crate::types::GridOptions;

const EMPTY_CELL: char = '.';

/// Render one page as text, one line per grid row.
///
/// Each occupied cell shows the last base-36 digit of the owning question's
/// `sequence_index`; empty cells show `.`. Returns `None` if the layout has
/// no such page.
pub fn render_page_map<P>(
    outcome: &LayoutOutcome<P>,
    grid: &GridOptions,
    page: usize,
) -> Option<String> {
    if page >= outcome.total_pages {
        return None;
    }

    let mut cells = vec![vec![EMPTY_CELL; grid.width]; grid.height];
    for placement in outcome.page(page) {
        let label = std::char::from_digit(
            (placement.question_record.sequence_index % 36) as u32,
            36,
        )
        .unwrap_or('#');
        for row in cells
            .iter_mut()
            .skip(placement.row)
            .take(placement.height_cells)
        {
            for cell in row
                .iter_mut()
                .skip(placement.col)
                .take(placement.width_cells)
            {
                *cell = label;
            }
        }
    }

    let lines: Vec<String> = cells.into_iter().map(|row| row.into_iter().collect()).collect();
    Some(lines.join("\n"))
}
