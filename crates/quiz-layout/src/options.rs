use crate::distribute::DEFAULT_MAX_ATTEMPTS;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete quiz configuration: what to ask, how to order it, and how to
/// lay it out
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuizOptions {
    // Selection
    pub selection: Vec<CategorySelection>,

    // Rounds
    pub rounds: usize,
    pub questions_per_round: usize,

    // Ordering
    pub strategy: DistributionStrategy,
    pub difficulty_order: DifficultyOrder,
    pub seed: Option<u64>,

    // Generation
    pub max_attempts: usize,

    // Layout
    pub grid: GridOptions,
    pub placement: PlacementStrategyKind,
}

impl Default for QuizOptions {
    fn default() -> Self {
        Self {
            selection: Vec::new(),
            rounds: 1,
            questions_per_round: 10,
            strategy: DistributionStrategy::BalancedRotation,
            difficulty_order: DifficultyOrder::Ascending,
            seed: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            grid: GridOptions::default(),
            placement: PlacementStrategyKind::TopLeft,
        }
    }
}

impl QuizOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| QuizError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| QuizError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Total number of question slots the rounds can hold
    pub fn capacity(&self) -> usize {
        self.rounds.saturating_mul(self.questions_per_round)
    }

    /// Total number of questions requested by the selection
    pub fn requested_total(&self) -> usize {
        self.selection.iter().map(|s| s.requested_count).sum()
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.selection.is_empty() {
            return Err(QuizError::Config("No categories selected".to_string()));
        }

        if self.rounds == 0 {
            return Err(QuizError::Config(
                "At least one round is required".to_string(),
            ));
        }

        if self.questions_per_round == 0 {
            return Err(QuizError::Config(
                "Questions per round must be at least 1".to_string(),
            ));
        }

        if self.max_attempts == 0 {
            return Err(QuizError::Config(
                "Max attempts must be at least 1".to_string(),
            ));
        }

        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(QuizError::Config(format!(
                "Grid must have at least one cell, got {}x{}",
                self.grid.width, self.grid.height
            )));
        }

        Ok(())
    }
}
