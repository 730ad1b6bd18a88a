//! Prompt construction from a PO description, supplier and taxonomy.
//!
//! Prompts are a pure function of their inputs: no timestamps, no randomness,
//! no truncation. The same request against the same taxonomy always yields the
//! same bytes.

use serde::Serialize;

use crate::constants::{NOT_SURE, SUPPLIER_NOT_PROVIDED};
use crate::errors::{Error, Result};
use crate::taxonomy::Taxonomy;

/// Validated input for one classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationRequest {
    description: String,
    supplier: String,
}

impl ClassificationRequest {
    /// Trim both fields, refuse a blank description and default a blank
    /// supplier to `"Not provided"`.
    pub fn new(description: &str, supplier: Option<&str>) -> Result<Self> {
        let description = description.trim();
        if description.is_empty() {
            return Err(Error::EmptyInput);
        }
        let supplier = supplier
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(SUPPLIER_NOT_PROVIDED);

        Ok(Self {
            description: description.to_string(),
            supplier: supplier.to_string(),
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn input_stats(&self) -> InputStats {
        InputStats::of(&self.description)
    }
}

/// Word and character counts of a description, for length hints in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InputStats {
    pub words: usize,
    pub characters: usize,
}

impl InputStats {
    pub fn of(text: &str) -> Self {
        let text = text.trim();
        Self {
            words: text.split_whitespace().count(),
            characters: text.chars().count(),
        }
    }
}

/// Renders classification prompts against one taxonomy.
///
/// The taxonomy table is rendered once at construction and reused for every
/// prompt.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    taxonomy_table: String,
}

impl PromptBuilder {
    pub fn new(taxonomy: &Taxonomy) -> Self {
        Self {
            taxonomy_table: taxonomy.render(),
        }
    }

    /// Validate raw inputs and render the prompt.
    ///
    /// Fails with [`Error::EmptyInput`] when the description is blank.
    pub fn build(&self, description: &str, supplier: Option<&str>) -> Result<String> {
        let request = ClassificationRequest::new(description, supplier)?;
        Ok(self.render(&request))
    }

    pub fn render(&self, request: &ClassificationRequest) -> String {
        format!(
            "You are a procurement analyst. Classify the purchase order below into the \
approved L1/L2/L3 taxonomy.\n\
\n\
Taxonomy:\n\
{taxonomy}\n\
Purchase order description:\n\
{description}\n\
\n\
Supplier:\n\
{supplier}\n\
\n\
Rules:\n\
- Choose L1, L2 and L3 only from values listed in the taxonomy above. Do not invent categories.\n\
- If you cannot confidently determine a level, set that level to the exact string \"{not_sure}\" instead of guessing or leaving it out.\n\
- Respond with a single JSON object with exactly the keys \"L1\", \"L2\" and \"L3\" and no other keys.\n\
- Return only the JSON object: no markdown, no code fences, no explanation.\n\
\n\
Response format:\n\
{{\"L1\": \"...\", \"L2\": \"...\", \"L3\": \"...\"}}\n",
            taxonomy = self.taxonomy_table,
            description = request.description(),
            supplier = request.supplier(),
            not_sure = NOT_SURE,
        )
    }
}

/// Render the prompt for `request` against `taxonomy`.
pub fn build_prompt(request: &ClassificationRequest, taxonomy: &Taxonomy) -> String {
    PromptBuilder::new(taxonomy).render(request)
}
