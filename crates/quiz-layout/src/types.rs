use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

pub type Result<T> = std::result::Result<T, QuizError>;

/// A selection entry that could not be turned into slots.
///
/// Reported per entry; the remaining entries are still distributed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown category '{category}'")]
    UnknownCategory { category: String },
    #[error("Unknown subcategory '{subcategory}' in category '{category}'")]
    UnknownSubcategory {
        category: String,
        subcategory: String,
    },
    #[error("No questions requested for {category}/{subcategory}")]
    ZeroCount {
        category: String,
        subcategory: String,
    },
}

impl ValidationError {
    pub fn category(&self) -> &str {
        match self {
            ValidationError::UnknownCategory { category }
            | ValidationError::UnknownSubcategory { category, .. }
            | ValidationError::ZeroCount { category, .. } => category,
        }
    }
}

/// Failure reported by a question generator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Generator in invalid state: {0}")]
    InvalidState(String),
    #[error("Generator returned unknown size code {0}")]
    InvalidSizeCode(u8),
    #[error("Generation cancelled")]
    Cancelled,
}

/// Placement failures. `ItemTooLarge` is the only one `layout()` can
/// produce with the built-in strategies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error(
        "Question #{sequence_index} ({category}/{subcategory}) needs {width}x{height} cells \
         but the grid is only {grid_width}x{grid_height}"
    )]
    ItemTooLarge {
        category: String,
        subcategory: String,
        sequence_index: usize,
        width: usize,
        height: usize,
        grid_width: usize,
        grid_height: usize,
    },
    #[error("{width}x{height} rectangle at page {page}, row {row}, col {col} is outside the grid")]
    OutOfBounds {
        page: usize,
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },
    #[error("Cell at page {page}, row {row}, col {col} is already occupied")]
    CellOccupied { page: usize, row: usize, col: usize },
    #[error("{strategy} strategy found no position for question #{sequence_index} on an empty page")]
    Unplaceable {
        strategy: &'static str,
        sequence_index: usize,
    },
}

/// Display size of a question, measured in grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuestionSize {
    /// 1x1
    Small,
    /// 2x1
    Wide,
    /// 1x2
    Square,
    /// 2x2
    Medium,
    /// 3x2
    Large,
    /// 4x2
    Extra,
}

impl QuestionSize {
    pub const ALL: [QuestionSize; 6] = [
        QuestionSize::Small,
        QuestionSize::Wide,
        QuestionSize::Square,
        QuestionSize::Medium,
        QuestionSize::Large,
        QuestionSize::Extra,
    ];

    /// Cell footprint as (width, height)
    pub fn cells(self) -> (usize, usize) {
        match self {
            QuestionSize::Small => (1, 1),
            QuestionSize::Wide => (2, 1),
            QuestionSize::Square => (1, 2),
            QuestionSize::Medium => (2, 2),
            QuestionSize::Large => (3, 2),
            QuestionSize::Extra => (4, 2),
        }
    }

    /// Numeric code used by generators (1 = Small .. 6 = Extra)
    pub fn code(self) -> u8 {
        match self {
            QuestionSize::Small => 1,
            QuestionSize::Wide => 2,
            QuestionSize::Square => 3,
            QuestionSize::Medium => 4,
            QuestionSize::Large => 5,
            QuestionSize::Extra => 6,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.code() == code)
    }
}

/// Declared difficulty of a subcategory or generated question
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// How slots are ordered before they are packed into rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistributionStrategy {
    /// Round-robin across categories so neighbours differ whenever possible
    #[default]
    BalancedRotation,
    /// Uniform shuffle
    Random,
    /// Stable sort by declared difficulty
    DifficultySorted,
}

/// Sort direction for `DistributionStrategy::DifficultySorted`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DifficultyOrder {
    #[default]
    Ascending,
    Descending,
}

/// Which placement strategy a layout engine uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlacementStrategyKind {
    /// First free position in row-major order
    #[default]
    TopLeft,
    /// Pack single-row items next to existing content first
    Compact,
}

/// Page grid dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridOptions {
    pub width: usize,
    pub height: usize,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            width: 4,
            height: 8,
        }
    }
}

impl GridOptions {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Cells on a single page
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

/// One line of the category selection: how many questions to request
/// from a category/subcategory pair
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategorySelection {
    pub category: String,
    pub subcategory: String,
    pub requested_count: usize,
}

impl CategorySelection {
    pub fn new(
        category: impl Into<String>,
        subcategory: impl Into<String>,
        requested_count: usize,
    ) -> Self {
        Self {
            category: category.into(),
            subcategory: subcategory.into(),
            requested_count,
        }
    }
}

/// A generated question, ready for layout.
///
/// The payload belongs to the content layer; layout only reads `size`
/// and `round_index`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionRecord<P> {
    pub category: String,
    pub subcategory: String,
    pub size: QuestionSize,
    pub difficulty: Difficulty,
    /// Round this question belongs to (0-based)
    pub round_index: usize,
    /// Position in the distributor's output (0-based, no gaps)
    pub sequence_index: usize,
    pub payload: P,
}

/// Where a question ended up
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementResult<P> {
    pub question_record: QuestionRecord<P>,
    pub page_index: usize,
    /// Top row of the rectangle (row 0 is the top of the page)
    pub row: usize,
    /// Left column of the rectangle
    pub col: usize,
    pub width_cells: usize,
    pub height_cells: usize,
}

impl<P> PlacementResult<P> {
    /// Row index one past the bottom edge
    pub fn row_end(&self) -> usize {
        self.row + self.height_cells
    }

    /// Column index one past the right edge
    pub fn col_end(&self) -> usize {
        self.col + self.width_cells
    }

    /// Whether two placements cover a common cell on the same page
    pub fn overlaps<Q>(&self, other: &PlacementResult<Q>) -> bool {
        self.page_index == other.page_index
            && self.row < other.row_end()
            && other.row < self.row_end()
            && self.col < other.col_end()
            && other.col < self.col_end()
    }
}
