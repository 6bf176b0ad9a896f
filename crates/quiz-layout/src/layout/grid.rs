//! Per-page cell occupancy
//!
//! `GridManager` only records which cells are taken. Deciding where an item
//! should go is the job of a `PlacementStrategy`.

use crate::types::{GridOptions, LayoutError};

// =============================================================================
// Page Grid
// =============================================================================

/// Occupancy of a single page, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
struct PageGrid {
    cells: Vec<bool>,
}

impl PageGrid {
    fn empty(width: usize, height: usize) -> Self {
        Self {
            cells: vec![false; width * height],
        }
    }
}

// =============================================================================
// Grid Manager
// =============================================================================

/// Tracks occupied cells across all pages of one layout run.
///
/// Pages are allocated lazily; a page that has never been referenced reads
/// as empty.
#[derive(Debug, Clone)]
pub struct GridManager {
    width: usize,
    height: usize,
    pages: Vec<PageGrid>,
}

impl GridManager {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pages: Vec::new(),
        }
    }

    pub fn from_options(grid: &GridOptions) -> Self {
        Self::new(grid.width, grid.height)
    }

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pages allocated so far
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Allocate `page` (and any missing pages before it) as empty grids.
    pub fn ensure_page(&mut self, page: usize) {
        while self.pages.len() <= page {
            self.pages.push(PageGrid::empty(self.width, self.height));
        }
    }

    /// True iff the rectangle fits inside the grid and none of its cells
    /// are occupied.
    pub fn can_place_at(&self, page: usize, row: usize, col: usize, w: usize, h: usize) -> bool {
        if !self.in_bounds(row, col, w, h) {
            return false;
        }
        let Some(grid) = self.pages.get(page) else {
            return true;
        };
        (row..row + h).all(|r| {
            let start = r * self.width + col;
            grid.cells[start..start + w].iter().all(|&taken| !taken)
        })
    }

    /// Mark the rectangle as occupied.
    ///
    /// Callers are expected to check `can_place_at` first; placing over an
    /// occupied cell or outside the grid is an error.
    pub fn place_at(
        &mut self,
        page: usize,
        row: usize,
        col: usize,
        w: usize,
        h: usize,
    ) -> Result<(), LayoutError> {
        if !self.in_bounds(row, col, w, h) {
            return Err(LayoutError::OutOfBounds {
                page,
                row,
                col,
                width: w,
                height: h,
            });
        }
        if let Some((r, c)) = self.first_occupied(page, row, col, w, h) {
            return Err(LayoutError::CellOccupied {
                page,
                row: r,
                col: c,
            });
        }

        self.ensure_page(page);
        let width = self.width;
        let grid = &mut self.pages[page];
        for r in row..row + h {
            let start = r * width + col;
            grid.cells[start..start + w].fill(true);
        }
        Ok(())
    }

    /// True if any cell in `row` of `page` is occupied
    pub fn row_has_content(&self, page: usize, row: usize) -> bool {
        if row >= self.height {
            return false;
        }
        self.pages.get(page).is_some_and(|grid| {
            let start = row * self.width;
            grid.cells[start..start + self.width].iter().any(|&taken| taken)
        })
    }

    /// Whether a single cell is occupied
    pub fn is_occupied(&self, page: usize, row: usize, col: usize) -> bool {
        row < self.height
            && col < self.width
            && self
                .pages
                .get(page)
                .is_some_and(|grid| grid.cells[row * self.width + col])
    }

    /// Number of occupied cells on `page`
    pub fn occupied_cells(&self, page: usize) -> usize {
        self.pages
            .get(page)
            .map_or(0, |grid| grid.cells.iter().filter(|&&taken| taken).count())
    }

    fn in_bounds(&self, row: usize, col: usize, w: usize, h: usize) -> bool {
        w > 0
            && h > 0
            && row.checked_add(h).is_some_and(|end| end <= self.height)
            && col.checked_add(w).is_some_and(|end| end <= self.width)
    }

    fn first_occupied(
        &self,
        page: usize,
        row: usize,
        col: usize,
        w: usize,
        h: usize,
    ) -> Option<(usize, usize)> {
        (row..row + h)
            .flat_map(|r| (col..col + w).map(move |c| (r, c)))
            .find(|&(r, c)| self.is_occupied(page, r, c))
    }
}

// =============================================================================
// Tests
// =============================================================================
