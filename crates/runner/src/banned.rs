#![forbid(unsafe_code)]

use crate::RunnerError;
use serde::Deserialize;
use std::path::Path;

/// Shape of the optional `--banned-terms` YAML file.
#[derive(Debug, Deserialize)]
pub struct BannedTermsFile {
    #[serde(default)]
    pub banned_terms: Vec<String>,
}

pub fn load_banned_terms(path: &Path) -> Result<Vec<String>, RunnerError> {
    let raw = std::fs::read_to_string(path)?;
    let file: BannedTermsFile = serde_yaml::from_str(&raw)?;
    Ok(file
        .banned_terms
        .into_iter()
        .map(|term| term.trim().to_string())
        .filter(|term| !term.is_empty())
        .collect())
}
