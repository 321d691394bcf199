//! Classify Command
//!
//! Prints what the classifier derives from each path. Files are not read.

use crate::classifier::{Classification, FileClassifier};
use crate::loader::expand_patterns;
use crate::types::{HelixError, Result};

pub fn classify_all(patterns: &[String]) -> Result<Vec<Classification>> {
    Ok(expand_patterns(patterns)?
        .iter()
        .map(|path| FileClassifier::classify(&path.to_string_lossy()))
        .collect())
}

pub fn render(classifications: &[Classification], format: &str) -> Result<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(classifications)?),
        "text" => Ok(classifications.iter().map(render_text).collect()),
        other => Err(HelixError::Context(format!(
            "Invalid format '{}'. Valid values: text, json",
            other
        ))),
    }
}

fn render_text(c: &Classification) -> String {
    let or_dash = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };
    format!(
        "{}\n  type:       {}\n  phase:      {}\n  category:   {}\n  complexity: {}\n  title:      {}\n  tags:       {}\n",
        c.path,
        c.file_type,
        or_dash(&c.phase),
        or_dash(&c.category),
        c.complexity.as_str(),
        c.title,
        c.tags.join(", ")
    )
}

pub fn run(patterns: &[String], format: &str) -> Result<()> {
    let classifications = classify_all(patterns)?;
    print!("{}", render(&classifications, format)?);
    Ok(())
}
