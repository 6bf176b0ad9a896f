use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::options::QuizOptions;
use crate::types::{
    CategorySelection, Difficulty, DifficultyOrder, DistributionStrategy, GenerationError,
    QuestionRecord, QuestionSize, QuizError, Result, ValidationError,
};

use super::generator::{GeneratedQuestion, GeneratorRegistry};
use super::ordering::{AssignedSlot, Slot, assign_rounds, expand_selection, order_slots};

/// Attempts per slot before it is reported as failed
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Why a slot produced no record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotFailure {
    #[error("Slot does not fit in the configured rounds")]
    OverCapacity,
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// A slot that was dropped from the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedSlot {
    pub category: String,
    pub subcategory: String,
    /// Round the slot was assigned to, if it got that far
    pub round_index: Option<usize>,
    pub reason: SlotFailure,
}

/// Output of `QuestionDistributor::distribute`
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionResult<P> {
    /// Generated questions in layout order
    pub records: Vec<QuestionRecord<P>>,
    /// Slots that were dropped
    pub failed_slots: Vec<FailedSlot>,
    /// Selection entries that were rejected before expansion
    pub validation_errors: Vec<ValidationError>,
}

impl<P> DistributionResult<P> {
    /// True when every requested slot produced a record
    pub fn is_complete(&self) -> bool {
        self.failed_slots.is_empty() && self.validation_errors.is_empty()
    }

    /// Number of distinct rounds that received at least one record
    pub fn rounds_used(&self) -> usize {
        let mut rounds: Vec<_> = self.records.iter().map(|r| r.round_index).collect();
        rounds.dedup();
        rounds.len()
    }
}

/// Turns a category selection into an ordered, round-assigned list of
/// generated questions.
pub struct QuestionDistributor<P> {
    registry: GeneratorRegistry<P>,
    max_attempts: usize,
    difficulty_order: DifficultyOrder,
    seed: Option<u64>,
    cancel: Option<Arc<AtomicBool>>,
}

impl<P> QuestionDistributor<P> {
    pub fn new(registry: GeneratorRegistry<P>) -> Self {
        Self {
            registry,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            difficulty_order: DifficultyOrder::default(),
            seed: None,
            cancel: None,
        }
    }

    /// Take attempts, sort order and seed from `options`
    pub fn from_options(registry: GeneratorRegistry<P>, options: &QuizOptions) -> Self {
        Self::new(registry)
            .with_max_attempts(options.max_attempts)
            .with_difficulty_order(options.difficulty_order)
            .with_seed(options.seed)
    }

    /// Attempts per slot. Zero is treated as one, so every slot is tried
    /// at least once; `QuizOptions::validate` rejects zero up front.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_difficulty_order(mut self, order: DifficultyOrder) -> Self {
        self.difficulty_order = order;
        self
    }

    /// Seed for `DistributionStrategy::Random`; `None` seeds from the OS
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Polled before each slot. Once set, the remaining slots are reported
    /// as cancelled and `distribute` returns.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn registry(&self) -> &GeneratorRegistry<P> {
        &self.registry
    }

    /// Run the selection and round settings held in `options`.
    pub fn distribute_options(&mut self, options: &QuizOptions) -> Result<DistributionResult<P>> {
        self.distribute(
            &options.selection,
            options.rounds,
            options.questions_per_round,
            options.strategy,
        )
    }

    /// Validate, expand, order and generate.
    ///
    /// Only a zero `rounds` or `questions_per_round` fails the whole call.
    /// Rejected entries and failed slots are collected in the result.
    pub fn distribute(
        &mut self,
        selection: &[CategorySelection],
        rounds: usize,
        questions_per_round: usize,
        strategy: DistributionStrategy,
    ) -> Result<DistributionResult<P>> {
        if rounds == 0 {
            return Err(QuizError::Config("At least one round is required".to_string()));
        }
        if questions_per_round == 0 {
            return Err(QuizError::Config(
                "Questions per round must be at least 1".to_string(),
            ));
        }

        let mut validation_errors = Vec::new();
        let mut accepted: Vec<(CategorySelection, Difficulty)> = Vec::new();
        for entry in selection {
            match self.registry.validate(entry) {
                Ok(difficulty) => accepted.push((entry.clone(), difficulty)),
                Err(e) => {
                    log::warn!("Skipping selection entry: {}", e);
                    validation_errors.push(e);
                }
            }
        }

        let slots = expand_selection(&accepted);
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let ordered = order_slots(slots, strategy, self.difficulty_order, &mut rng);
        let (assigned, overflow) = assign_rounds(ordered, rounds, questions_per_round);

        let mut failed_slots = Vec::new();
        let mut records = Vec::with_capacity(assigned.len());
        for AssignedSlot { slot, round_index } in assigned {
            let outcome = if self.is_cancelled() {
                Err(GenerationError::Cancelled)
            } else {
                self.generate_slot(&slot)
            };

            match outcome {
                Ok((question, size)) => records.push(QuestionRecord {
                    category: slot.category,
                    subcategory: slot.subcategory,
                    size,
                    difficulty: question.difficulty,
                    round_index,
                    sequence_index: records.len(),
                    payload: question.content,
                }),
                Err(e) => failed_slots.push(FailedSlot {
                    category: slot.category,
                    subcategory: slot.subcategory,
                    round_index: Some(round_index),
                    reason: SlotFailure::Generation(e),
                }),
            }
        }

        // Overflow slots come after every assigned slot in generation order
        failed_slots.extend(overflow.into_iter().map(|slot| {
            log::warn!(
                "{}/{} exceeds capacity of {} rounds x {} questions",
                slot.category,
                slot.subcategory,
                rounds,
                questions_per_round
            );
            FailedSlot {
                category: slot.category,
                subcategory: slot.subcategory,
                round_index: None,
                reason: SlotFailure::OverCapacity,
            }
        }));

        log::info!(
            "Distributed {} questions ({} failed slots, {} rejected entries)",
            records.len(),
            failed_slots.len(),
            validation_errors.len()
        );

        Ok(DistributionResult {
            records,
            failed_slots,
            validation_errors,
        })
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Call the slot's generator until it succeeds or attempts run out.
    fn generate_slot(
        &mut self,
        slot: &Slot,
    ) -> std::result::Result<(GeneratedQuestion<P>, QuestionSize), GenerationError> {
        let max_attempts = self.max_attempts;
        let Some(generator) = self.registry.generator_mut(&slot.category, &slot.subcategory)
        else {
            return Err(GenerationError::InvalidState(format!(
                "no generator registered for {}/{}",
                slot.category, slot.subcategory
            )));
        };

        let mut last_error = GenerationError::InvalidState("no attempts made".to_string());
        for attempt in 1..=max_attempts {
            let result = generator.generate_one().and_then(|question| {
                if question.category != slot.category || question.subcategory != slot.subcategory
                {
                    return Err(GenerationError::InvalidState(format!(
                        "generator for {}/{} returned a {}/{} question",
                        slot.category, slot.subcategory, question.category, question.subcategory
                    )));
                }
                match QuestionSize::from_code(question.size_code) {
                    Some(size) => Ok((question, size)),
                    None => Err(GenerationError::InvalidSizeCode(question.size_code)),
                }
            });
            match result {
                Ok(generated) => return Ok(generated),
                Err(e) => {
                    log::debug!(
                        "{}/{} attempt {}/{} failed: {}",
                        slot.category,
                        slot.subcategory,
                        attempt,
                        max_attempts,
                        e
                    );
                    last_error = e;
                }
            }
        }

        log::warn!(
            "Giving up on {}/{} after {} attempts: {}",
            slot.category,
            slot.subcategory,
            max_attempts,
            last_error
        );
        Err(last_error)
    }
}
