//! Question generator seam
//!
//! Content generation lives outside this crate. The distributor only needs
//! something it can ask for one question at a time, plus a catalog telling
//! it which category/subcategory pairs exist and how hard they are.

use std::collections::HashMap;

use crate::types::{CategorySelection, Difficulty, GenerationError, ValidationError};

/// What a generator hands back for one question
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedQuestion<P> {
    pub content: P,
    /// Display size code, see `QuestionSize::from_code`
    pub size_code: u8,
    pub difficulty: Difficulty,
    pub category: String,
    pub subcategory: String,
}

/// Produces questions for one category/subcategory pair.
///
/// Calls are synchronous and may block. A failing call is retried by the
/// distributor a bounded number of times.
pub trait QuestionGenerator<P> {
    fn generate_one(&mut self) -> Result<GeneratedQuestion<P>, GenerationError>;
}

impl<P, F> QuestionGenerator<P> for F
where
    F: FnMut() -> Result<GeneratedQuestion<P>, GenerationError>,
{
    fn generate_one(&mut self) -> Result<GeneratedQuestion<P>, GenerationError> {
        self()
    }
}

struct RegisteredGenerator<P> {
    difficulty: Difficulty,
    generator: Box<dyn QuestionGenerator<P>>,
}

/// Catalog of known categories and the generators behind them
pub struct GeneratorRegistry<P> {
    categories: HashMap<String, HashMap<String, RegisteredGenerator<P>>>,
}

impl<P> Default for GeneratorRegistry<P> {
    fn default() -> Self {
        Self {
            categories: HashMap::new(),
        }
    }
}

impl<P> std::fmt::Debug for GeneratorRegistry<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.entries().collect();
        names.sort();
        f.debug_struct("GeneratorRegistry")
            .field("entries", &names)
            .finish()
    }
}

impl<P> GeneratorRegistry<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the generator for a category/subcategory pair.
    pub fn register(
        &mut self,
        category: impl Into<String>,
        subcategory: impl Into<String>,
        difficulty: Difficulty,
        generator: impl QuestionGenerator<P> + 'static,
    ) -> &mut Self {
        self.categories
            .entry(category.into())
            .or_default()
            .insert(
                subcategory.into(),
                RegisteredGenerator {
                    difficulty,
                    generator: Box::new(generator),
                },
            );
        self
    }

    pub fn contains(&self, category: &str, subcategory: &str) -> bool {
        self.categories
            .get(category)
            .is_some_and(|subs| subs.contains_key(subcategory))
    }

    /// Difficulty declared when the pair was registered
    pub fn declared_difficulty(&self, category: &str, subcategory: &str) -> Option<Difficulty> {
        self.categories
            .get(category)?
            .get(subcategory)
            .map(|entry| entry.difficulty)
    }

    /// All registered (category, subcategory) pairs, in no particular order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.categories.iter().flat_map(|(category, subs)| {
            subs.keys()
                .map(move |subcategory| (category.as_str(), subcategory.as_str()))
        })
    }

    /// Check a selection entry against the catalog and return the declared
    /// difficulty of its subcategory.
    pub fn validate(&self, entry: &CategorySelection) -> Result<Difficulty, ValidationError> {
        let Some(subs) = self.categories.get(&entry.category) else {
            return Err(ValidationError::UnknownCategory {
                category: entry.category.clone(),
            });
        };
        let Some(registered) = subs.get(&entry.subcategory) else {
            return Err(ValidationError::UnknownSubcategory {
                category: entry.category.clone(),
                subcategory: entry.subcategory.clone(),
            });
        };
        if entry.requested_count == 0 {
            return Err(ValidationError::ZeroCount {
                category: entry.category.clone(),
                subcategory: entry.subcategory.clone(),
            });
        }
        Ok(registered.difficulty)
    }

    pub(crate) fn generator_mut(
        &mut self,
        category: &str,
        subcategory: &str,
    ) -> Option<&mut (dyn QuestionGenerator<P> + 'static)> {
        self.categories
            .get_mut(category)?
            .get_mut(subcategory)
            .map(|entry| entry.generator.as_mut())
    }
}
