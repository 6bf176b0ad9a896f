//! Question distribution
//!
//! Turns a weighted category selection into the ordered, round-assigned
//! question list the layout engine consumes:
//! - Selection validation against the generator catalog
//! - Slot ordering (balanced rotation, random, difficulty sorted)
//! - Round assignment and bounded-retry generation

mod distributor;
mod generator;
mod ordering;

pub use distributor::*;
pub use generator::*;
pub use ordering::*;
