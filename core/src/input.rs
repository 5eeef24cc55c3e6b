use std::collections::HashMap;
use anyhow::{anyhow, Result};

/// Metadata keys accepted by the shell `record` command.
pub const RECORD_KEYS: &[&str] = &["date", "duration", "action", "active", "first", "last"];

/// A shell line split into positional words and `key:value` pairs.
#[derive(Debug, PartialEq, Default)]
pub struct ParsedInput {
    pub words: Vec<String>,
    pub metadata: HashMap<String, String>,
}

impl ParsedInput {
    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }
}

pub fn parse_line(line: &str) -> ParsedInput {
    let mut words = Vec::new();
    let mut metadata = HashMap::new();

    for token in line.split_whitespace() {
        if let Some((key, value)) = token.split_once(':') {
            // `2024-03-15T10:00:00` style values still split on the first colon only
            if !key.is_empty() && key.chars().all(|c| c.is_ascii_alphabetic()) {
                metadata.insert(key.to_lowercase(), value.to_string());
                continue;
            }
        }
        words.push(token.to_string());
    }

    ParsedInput { words, metadata }
}

/// Expands `key` to the single candidate it is a prefix of.
pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Normalizes every metadata key of `parsed` against `candidates`.
pub fn expand_metadata(parsed: &ParsedInput, candidates: &[&str]) -> Result<HashMap<String, String>> {
    let mut normalized = HashMap::new();
    for (key, value) in &parsed.metadata {
        let full_key = expand_key(key, candidates)?;
        normalized.insert(full_key, value.clone());
    }
    Ok(normalized)
}

pub fn parse_bool(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(anyhow!("Invalid boolean: '{}'", value)),
    }
}
