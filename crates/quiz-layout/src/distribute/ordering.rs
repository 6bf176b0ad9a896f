//! Slot expansion, ordering and round assignment
//!
//! Everything here happens before any generator is called. The output is
//! the exact sequence in which slots will be generated and the round each
//! one belongs to.

use std::cmp::Reverse;
use std::collections::VecDeque;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::types::{CategorySelection, Difficulty, DifficultyOrder, DistributionStrategy};

/// One requested question that has not been generated yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub category: String,
    pub subcategory: String,
    /// Difficulty declared for the subcategory
    pub difficulty: Difficulty,
}

/// A slot with its round decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedSlot {
    pub slot: Slot,
    pub round_index: usize,
}

/// Expand each validated entry into `requested_count` individual slots,
/// keeping selection order.
pub fn expand_selection(entries: &[(CategorySelection, Difficulty)]) -> Vec<Slot> {
    entries
        .iter()
        .flat_map(|(entry, difficulty)| {
            (0..entry.requested_count).map(move |_| Slot {
                category: entry.category.clone(),
                subcategory: entry.subcategory.clone(),
                difficulty: *difficulty,
            })
        })
        .collect()
}

/// Put slots in generation order according to `strategy`.
pub fn order_slots<R: Rng + ?Sized>(
    mut slots: Vec<Slot>,
    strategy: DistributionStrategy,
    difficulty_order: DifficultyOrder,
    rng: &mut R,
) -> Vec<Slot> {
    match strategy {
        DistributionStrategy::BalancedRotation => balanced_rotation(slots),
        DistributionStrategy::Random => {
            slots.shuffle(rng);
            slots
        }
        DistributionStrategy::DifficultySorted => {
            // sort_by_key is stable, so ties keep selection order
            match difficulty_order {
                DifficultyOrder::Ascending => slots.sort_by_key(|slot| slot.difficulty),
                DifficultyOrder::Descending => slots.sort_by_key(|slot| Reverse(slot.difficulty)),
            }
            slots
        }
    }
}

/// Round-robin across categories in order of first appearance.
///
/// Each pass takes one slot from every category that still has some, so two
/// neighbours share a category only once a single category is left.
fn balanced_rotation(slots: Vec<Slot>) -> Vec<Slot> {
    let total = slots.len();
    let mut queues: Vec<(String, VecDeque<Slot>)> = Vec::new();

    for slot in slots {
        match queues.iter_mut().find(|(category, _)| *category == slot.category) {
            Some((_, queue)) => queue.push_back(slot),
            None => queues.push((slot.category.clone(), VecDeque::from([slot]))),
        }
    }

    let mut ordered = Vec::with_capacity(total);
    while ordered.len() < total {
        for (_, queue) in queues.iter_mut() {
            if let Some(slot) = queue.pop_front() {
                ordered.push(slot);
            }
        }
    }
    ordered
}

/// Pack ordered slots into rounds of `questions_per_round`.
///
/// Returns the assigned slots and the overflow that did not fit into
/// `rounds` rounds. The last used round may be short.
pub fn assign_rounds(
    slots: Vec<Slot>,
    rounds: usize,
    questions_per_round: usize,
) -> (Vec<AssignedSlot>, Vec<Slot>) {
    let capacity = rounds.saturating_mul(questions_per_round);
    let mut assigned = Vec::with_capacity(slots.len().min(capacity));
    let mut overflow = Vec::new();

    for (position, slot) in slots.into_iter().enumerate() {
        if position < capacity {
            assigned.push(AssignedSlot {
                slot,
                round_index: position / questions_per_round,
            });
        } else {
            overflow.push(slot);
        }
    }
    (assigned, overflow)
}
