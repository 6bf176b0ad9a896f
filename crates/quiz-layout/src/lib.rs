pub mod distribute;
pub mod layout;
mod options;
mod preview;
mod selection;
mod stats;
mod types;

pub use distribute::{
    DEFAULT_MAX_ATTEMPTS, DistributionResult, FailedSlot, GeneratedQuestion, GeneratorRegistry,
    QuestionDistributor, QuestionGenerator, SlotFailure,
};
pub use layout::{
    CompactStrategy, GridManager, GridPosition, LayoutEngine, LayoutOutcome, PlacementStrategy,
    TopLeftStrategy,
};
pub use options::*;
pub use preview::render_page_map;
pub use selection::load_selection_csv;
pub use stats::{LayoutStatistics, calculate_statistics};
pub use types::*;
