use crate::types::{CategorySelection, QuizError, Result};
use std::path::Path;

/// Load a category selection from CSV.
///
/// Expects a header row followed by `category,subcategory,requested_count`
/// rows. Rows with fewer than three columns are skipped.
pub async fn load_selection_csv(path: impl AsRef<Path>) -> Result<Vec<CategorySelection>> {
    let path = path.as_ref().to_owned();

    let contents = tokio::fs::read_to_string(&path).await?;

    let selection = tokio::task::spawn_blocking(move || parse_selection(&contents)).await??;

    Ok(selection)
}

fn parse_selection(contents: &str) -> Result<Vec<CategorySelection>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(contents.as_bytes());
    let mut selection = Vec::new();

    for result in reader.records() {
        let record = result?;
        if record.len() < 3 {
            continue;
        }

        let requested_count = record[2].parse::<usize>().map_err(|_| {
            let line = record.position().map_or(0, |p| p.line());
            QuizError::Config(format!(
                "Invalid requested count '{}' on line {}",
                &record[2], line
            ))
        })?;

        selection.push(CategorySelection::new(
            &record[0],
            &record[1],
            requested_count,
        ));
    }

    Ok(selection)
}
