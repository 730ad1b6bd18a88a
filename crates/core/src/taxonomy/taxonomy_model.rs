//! Domain model for a single taxonomy path.

use std::fmt;

use serde::Serialize;

use crate::constants::TAXONOMY_DELIMITER;
use crate::errors::{Error, Result};

/// One (L1, L2, L3) path of the taxonomy.
///
/// Fields are trimmed, non-empty and never contain the column delimiter, so a
/// rendered table always parses back to the same rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TaxonomyRow {
    #[serde(rename = "L1")]
    l1: String,
    #[serde(rename = "L2")]
    l2: String,
    #[serde(rename = "L3")]
    l3: String,
}

impl TaxonomyRow {
    pub fn new(l1: &str, l2: &str, l3: &str) -> Result<Self> {
        Ok(Self {
            l1: clean_field("L1", l1)?,
            l2: clean_field("L2", l2)?,
            l3: clean_field("L3", l3)?,
        })
    }

    pub fn l1(&self) -> &str {
        &self.l1
    }

    pub fn l2(&self) -> &str {
        &self.l2
    }

    pub fn l3(&self) -> &str {
        &self.l3
    }

    /// Space-joined levels, used for free-text search.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.l1, self.l2, self.l3)
    }

    /// True if the given levels name this path (case-insensitive, trimmed).
    pub fn matches(&self, l1: &str, l2: &str, l3: &str) -> bool {
        self.l1.eq_ignore_ascii_case(l1.trim())
            && self.l2.eq_ignore_ascii_case(l2.trim())
            && self.l3.eq_ignore_ascii_case(l3.trim())
    }
}

impl fmt::Display for TaxonomyRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} > {} > {}", self.l1, self.l2, self.l3)
    }
}

fn clean_field(level: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::TaxonomyParse(format!("{} must not be empty", level)));
    }
    if value.contains(TAXONOMY_DELIMITER) {
        return Err(Error::TaxonomyParse(format!(
            "{} must not contain '{}': {}",
            level, TAXONOMY_DELIMITER, value
        )));
    }
    Ok(value.to_string())
}
