use chrono::{DateTime, Utc};
use po_classifier_ai::{Classification, ModelInfo, ProviderInfo};
use po_classifier_core::{HistoryEntry, InputStats, TaxonomyRow, ValidationOutcome};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    pub description: String,
    #[serde(default)]
    pub supplier: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationStatus {
    Valid,
    Malformed,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InputStatsDto {
    pub words: usize,
    pub characters: usize,
}

impl From<InputStats> for InputStatsDto {
    fn from(s: InputStats) -> Self {
        Self {
            words: s.words,
            characters: s.characters,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfoDto {
    pub provider: String,
    pub model: String,
    pub temperature: f64,
}

impl From<ModelInfo> for ModelInfoDto {
    fn from(m: ModelInfo) -> Self {
        Self {
            provider: m.provider,
            model: m.model,
            temperature: m.temperature,
        }
    }
}

/// One provider from the built-in catalog. `active` marks the provider the
/// running classifier was built with.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfoDto {
    pub id: String,
    pub name: String,
    pub env_key: Option<String>,
    pub default_model: String,
    pub default_url: Option<String>,
    pub documentation_url: Option<String>,
    pub active: bool,
}

impl ProviderInfoDto {
    pub fn new(p: ProviderInfo, active_provider: &str) -> Self {
        Self {
            active: p.id == active_provider,
            id: p.id,
            name: p.name,
            env_key: p.env_key,
            default_model: p.default_model,
            default_url: p.default_url,
            documentation_url: p.documentation_url,
        }
    }
}

/// Classification output. On `malformed` the levels are empty and `raw`
/// carries what the model actually said.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    pub status: ClassificationStatus,
    #[serde(rename = "L1")]
    pub l1: String,
    #[serde(rename = "L2")]
    pub l2: String,
    #[serde(rename = "L3")]
    pub l3: String,
    pub low_confidence: bool,
    pub in_taxonomy: bool,
    pub description: String,
    pub supplier: String,
    pub raw: String,
    pub model: ModelInfoDto,
    pub input_stats: InputStatsDto,
}

impl From<&Classification> for ClassifyResponse {
    fn from(c: &Classification) -> Self {
        let (status, l1, l2, l3) = match &c.outcome {
            ValidationOutcome::Valid { result, .. } => (
                ClassificationStatus::Valid,
                result.l1.clone(),
                result.l2.clone(),
                result.l3.clone(),
            ),
            ValidationOutcome::Malformed { .. } => (
                ClassificationStatus::Malformed,
                String::new(),
                String::new(),
                String::new(),
            ),
        };
        Self {
            status,
            l1,
            l2,
            l3,
            low_confidence: c.is_low_confidence(),
            in_taxonomy: c.in_taxonomy,
            description: c.request.description().to_string(),
            supplier: c.request.supplier().to_string(),
            raw: c.raw.clone(),
            model: c.model.clone().into(),
            input_stats: c.input_stats().into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaxonomyRowDto {
    #[serde(rename = "L1")]
    pub l1: String,
    #[serde(rename = "L2")]
    pub l2: String,
    #[serde(rename = "L3")]
    pub l3: String,
}

impl From<&TaxonomyRow> for TaxonomyRowDto {
    fn from(r: &TaxonomyRow) -> Self {
        Self {
            l1: r.l1().to_string(),
            l2: r.l2().to_string(),
            l3: r.l3().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryDto {
    pub timestamp: DateTime<Utc>,
    pub display_timestamp: String,
    pub description: String,
    pub supplier: String,
    #[serde(rename = "L1")]
    pub l1: String,
    #[serde(rename = "L2")]
    pub l2: String,
    #[serde(rename = "L3")]
    pub l3: String,
}

impl From<&HistoryEntry> for HistoryEntryDto {
    fn from(e: &HistoryEntry) -> Self {
        Self {
            timestamp: e.timestamp,
            display_timestamp: e.display_timestamp(),
            description: e.description.clone(),
            supplier: e.supplier.clone(),
            l1: e.l1.clone(),
            l2: e.l2.clone(),
            l3: e.l3.clone(),
        }
    }
}

/// Sample input offered by the UI.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExamplePreset {
    pub name: String,
    pub description: String,
    pub supplier: String,
}

pub fn example_presets() -> Vec<ExamplePreset> {
    [
        (
            "DocuSign subscription",
            "DocuSign Inc - eSignature Enterprise Pro Subscription",
            "DocuSign Inc",
        ),
        (
            "Laptop purchase",
            "Dell Latitude laptops for new hires",
            "Dell",
        ),
        (
            "Security services",
            "Monthly office security services",
            "Guardian Security",
        ),
    ]
    .into_iter()
    .map(|(name, description, supplier)| ExamplePreset {
        name: name.to_string(),
        description: description.to_string(),
        supplier: supplier.to_string(),
    })
    .collect()
}
