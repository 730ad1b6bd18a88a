//! Provider catalog and resolved backend settings.
//!
//! The catalog is embedded JSON listing each supported backend with its API
//! key variable and default model. Which provider and model to use is
//! configuration, resolved here into [`ProviderSettings`].

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::AiError;

/// Provider used when none is configured.
pub const DEFAULT_PROVIDER_ID: &str = "groq";

// ============================================================================
// Provider Catalog (Static JSON)
// ============================================================================

/// Static provider catalog loaded from embedded JSON.
static PROVIDER_CATALOG: Lazy<ProviderCatalog> = Lazy::new(|| {
    let json = include_str!("providers.json");
    serde_json::from_str(json).expect("Failed to parse providers.json")
});

#[derive(Debug, Deserialize)]
struct ProviderCatalog {
    providers: BTreeMap<String, ProviderCatalogEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderCatalogEntry {
    name: String,
    #[serde(default)]
    env_key: Option<String>,
    default_model: String,
    #[serde(default)]
    default_url: Option<String>,
    #[serde(default)]
    documentation_url: Option<String>,
}

/// Catalog entry as exposed to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    pub id: String,
    pub name: String,
    pub env_key: Option<String>,
    pub default_model: String,
    pub default_url: Option<String>,
    pub documentation_url: Option<String>,
}

/// All catalog providers, ordered by id.
pub fn provider_catalog() -> Vec<ProviderInfo> {
    PROVIDER_CATALOG
        .providers
        .iter()
        .map(|(id, entry)| ProviderInfo {
            id: id.clone(),
            name: entry.name.clone(),
            env_key: entry.env_key.clone(),
            default_model: entry.default_model.clone(),
            default_url: entry.default_url.clone(),
            documentation_url: entry.documentation_url.clone(),
        })
        .collect()
}

// ============================================================================
// Resolved Settings
// ============================================================================

/// Everything the invoker needs to reach one backend.
#[derive(Clone)]
pub struct ProviderSettings {
    pub provider_id: String,
    pub model: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

// Keep API keys out of logs.
impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("provider_id", &self.provider_id)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

impl ProviderSettings {
    /// Merge explicit values with catalog defaults.
    ///
    /// `secret` maps a catalog key name (e.g. `GROQ_API_KEY`) to its value;
    /// the caller decides where secrets come from. Providers that need a key
    /// fail with [`AiError::MissingApiKey`] when none is found.
    pub fn resolve<F>(
        provider_id: &str,
        model: Option<String>,
        base_url: Option<String>,
        secret: F,
    ) -> Result<Self, AiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let entry = PROVIDER_CATALOG
            .providers
            .get(provider_id)
            .ok_or_else(|| AiError::UnknownProvider(provider_id.to_string()))?;

        let api_key = match &entry.env_key {
            Some(key) => {
                let value = secret(key)
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
                    .ok_or_else(|| AiError::MissingApiKey(provider_id.to_string()))?;
                Some(value)
            }
            None => None,
        };

        let model = model
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| entry.default_model.clone());
        let base_url = base_url
            .filter(|u| !u.trim().is_empty())
            .or_else(|| entry.default_url.clone());

        Ok(Self {
            provider_id: provider_id.to_string(),
            model,
            base_url,
            api_key,
        })
    }
}
