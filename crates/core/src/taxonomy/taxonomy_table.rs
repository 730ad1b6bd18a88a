//! The immutable, ordered taxonomy table and its text format.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use log::debug;

use super::TaxonomyRow;
use crate::constants::{TAXONOMY_DELIMITER, TAXONOMY_HEADER_L1};
use crate::errors::{Error, Result};

/// Built-in procurement taxonomy, parsed on first use.
static BUILTIN: LazyLock<Taxonomy> = LazyLock::new(|| {
    let text = include_str!("procurement_taxonomy.txt");
    Taxonomy::parse(text).expect("Failed to parse procurement_taxonomy.txt")
});

/// Ordered list of (L1, L2, L3) rows.
///
/// Loaded once and never mutated. Shared by reference across concurrent
/// classification requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomy {
    rows: Vec<TaxonomyRow>,
}

impl Taxonomy {
    /// The procurement taxonomy shipped with the crate.
    pub fn builtin() -> &'static Taxonomy {
        &BUILTIN
    }

    pub fn from_rows(rows: Vec<TaxonomyRow>) -> Self {
        Self { rows }
    }

    /// Parse pipe-delimited taxonomy text.
    ///
    /// Blank lines, the header (first column `L1`) and divider lines (dashes,
    /// optionally separated by pipes) are skipped. Lines with fewer than three
    /// columns or a blank level are skipped; columns past the third are
    /// discarded. A leading or trailing pipe, as in markdown tables, is allowed.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows = Vec::new();

        for (index, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || is_divider(line) {
                continue;
            }

            let fields = split_fields(line);
            if fields.first().copied() == Some(TAXONOMY_HEADER_L1) {
                continue;
            }
            if fields.len() < 3 {
                debug!("Skipping taxonomy line {}: fewer than 3 columns", index + 1);
                continue;
            }

            match TaxonomyRow::new(fields[0], fields[1], fields[2]) {
                Ok(row) => rows.push(row),
                Err(e) => debug!("Skipping taxonomy line {}: {}", index + 1, e),
            }
        }

        debug!("Parsed taxonomy with {} rows", rows.len());
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[TaxonomyRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose joined levels contain `query`, case-insensitively.
    /// A blank query returns every row.
    pub fn filter(&self, query: &str) -> Vec<&TaxonomyRow> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.rows.iter().collect();
        }
        self.rows
            .iter()
            .filter(|row| row.search_text().to_lowercase().contains(&needle))
            .collect()
    }

    /// Advisory closed-set check: does (l1, l2, l3) name a row of this table?
    pub fn contains_path(&self, l1: &str, l2: &str, l3: &str) -> bool {
        self.rows.iter().any(|row| row.matches(l1, l2, l3))
    }

    /// Render as a pipe table (header, divider, one line per row).
    ///
    /// The output parses back to the same rows.
    pub fn render(&self) -> String {
        let mut out = format!("L1 {d} L2 {d} L3\n---{d}---{d}---\n", d = TAXONOMY_DELIMITER);
        for row in &self.rows {
            out.push_str(&format!(
                "{} {d} {} {d} {}\n",
                row.l1(),
                row.l2(),
                row.l3(),
                d = TAXONOMY_DELIMITER
            ));
        }
        out
    }

    /// Verify path uniqueness and the strict L1 > L2 > L3 hierarchy.
    pub fn check_integrity(&self) -> Result<()> {
        let mut seen: HashSet<&TaxonomyRow> = HashSet::new();
        let mut l2_parent: HashMap<&str, &str> = HashMap::new();
        let mut l3_parent: HashMap<&str, (&str, &str)> = HashMap::new();

        for row in &self.rows {
            if !seen.insert(row) {
                return Err(Error::TaxonomyIntegrity(format!("duplicate path {}", row)));
            }

            let l1 = *l2_parent.entry(row.l2()).or_insert(row.l1());
            if l1 != row.l1() {
                return Err(Error::TaxonomyIntegrity(format!(
                    "L2 '{}' appears under both '{}' and '{}'",
                    row.l2(),
                    l1,
                    row.l1()
                )));
            }

            let parent = *l3_parent.entry(row.l3()).or_insert((row.l1(), row.l2()));
            if parent != (row.l1(), row.l2()) {
                return Err(Error::TaxonomyIntegrity(format!(
                    "L3 '{}' appears under both '{} > {}' and '{} > {}'",
                    row.l3(),
                    parent.0,
                    parent.1,
                    row.l1(),
                    row.l2()
                )));
            }
        }

        Ok(())
    }
}

fn is_divider(line: &str) -> bool {
    line.contains('-')
        && line
            .chars()
            .all(|c| c == '-' || c == ':' || c == TAXONOMY_DELIMITER || c.is_whitespace())
}

fn split_fields(line: &str) -> Vec<&str> {
    let line = line.strip_prefix(TAXONOMY_DELIMITER).unwrap_or(line);
    let line = line.strip_suffix(TAXONOMY_DELIMITER).unwrap_or(line);
    line.split(TAXONOMY_DELIMITER).map(str::trim).collect()
}
