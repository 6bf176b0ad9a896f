//! Page layout for distributed questions
//!
//! This module handles turning an ordered question list into page positions:
//! - Grid occupancy tracking (which cells of which page are taken)
//! - Placement strategies (where on a page the next item goes)
//! - The layout engine (round page breaks and page overflow)

mod engine;
mod grid;
mod placement;
mod types;

pub use engine::*;
pub use grid::*;
pub use placement::*;
pub use types::*;
