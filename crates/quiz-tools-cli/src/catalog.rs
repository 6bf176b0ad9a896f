//! Built-in demo catalog
//!
//! Real content generators live elsewhere. These placeholders let the CLI
//! exercise distribution and layout end to end: each one returns a label
//! with the size and difficulty declared for its subcategory.

use quiz_layout::{
    CategorySelection, Difficulty, GeneratedQuestion, GenerationError, GeneratorRegistry,
    QuestionSize,
};

pub struct CatalogEntry {
    pub category: &'static str,
    pub subcategory: &'static str,
    pub difficulty: Difficulty,
    pub size: QuestionSize,
}

const fn entry(
    category: &'static str,
    subcategory: &'static str,
    difficulty: Difficulty,
    size: QuestionSize,
) -> CatalogEntry {
    CatalogEntry {
        category,
        subcategory,
        difficulty,
        size,
    }
}

pub const DEMO_CATALOG: &[CatalogEntry] = &[
    entry("arithmetic", "addition", Difficulty::Easy, QuestionSize::Small),
    entry("arithmetic", "multiplication", Difficulty::Medium, QuestionSize::Small),
    entry("arithmetic", "long-division", Difficulty::Hard, QuestionSize::Wide),
    entry("fractions", "simplify", Difficulty::Easy, QuestionSize::Small),
    entry("fractions", "compare", Difficulty::Medium, QuestionSize::Wide),
    entry("geometry", "angles", Difficulty::Medium, QuestionSize::Square),
    entry("geometry", "area", Difficulty::Hard, QuestionSize::Medium),
    entry("word-problems", "rates", Difficulty::Hard, QuestionSize::Large),
    entry("graphs", "coordinate-plane", Difficulty::Medium, QuestionSize::Extra),
];

fn placeholder(
    entry: &'static CatalogEntry,
) -> impl FnMut() -> Result<GeneratedQuestion<String>, GenerationError> {
    let category = entry.category;
    let subcategory = entry.subcategory;
    let difficulty = entry.difficulty;
    let size_code = entry.size.code();
    let mut produced = 0usize;

    move || {
        produced += 1;
        Ok(GeneratedQuestion {
            content: format!("{} / {} #{}", category, subcategory, produced),
            size_code,
            difficulty,
            category: category.to_string(),
            subcategory: subcategory.to_string(),
        })
    }
}

/// Registry with one placeholder generator per demo entry
pub fn demo_registry() -> GeneratorRegistry<String> {
    let mut registry = GeneratorRegistry::new();
    for entry in DEMO_CATALOG {
        registry.register(
            entry.category,
            entry.subcategory,
            entry.difficulty,
            placeholder(entry),
        );
    }
    registry
}

/// Starter selection written by `init-config`
pub fn sample_selection() -> Vec<CategorySelection> {
    DEMO_CATALOG
        .iter()
        .map(|entry| {
            let count = match entry.size {
                QuestionSize::Small | QuestionSize::Wide => 3,
                _ => 1,
            };
            CategorySelection::new(entry.category, entry.subcategory, count)
        })
        .collect()
}
