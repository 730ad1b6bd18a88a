//! Shared DTOs for the classifier service.

use serde::Serialize;

use po_classifier_core::{ClassificationRequest, InputStats, ValidationOutcome};

/// Decoding temperature for every classification call.
pub const DECODING_TEMPERATURE: f64 = 0.0;

/// Which backend produced a response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub provider: String,
    pub model: String,
    pub temperature: f64,
}

impl ModelInfo {
    pub fn new(provider: &str, model: &str) -> Self {
        Self {
            provider: provider.to_string(),
            model: model.to_string(),
            temperature: DECODING_TEMPERATURE,
        }
    }
}

/// A completed classification: the request, the validated outcome and the
/// untouched backend text.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub request: ClassificationRequest,
    pub outcome: ValidationOutcome,
    /// Raw backend text, kept for both outcomes.
    pub raw: String,
    pub model: ModelInfo,
    /// Advisory: the three levels name a row of the taxonomy. Never affects
    /// `outcome`.
    pub in_taxonomy: bool,
}

impl Classification {
    pub fn is_valid(&self) -> bool {
        self.outcome.is_valid()
    }

    pub fn is_low_confidence(&self) -> bool {
        self.outcome.is_low_confidence()
    }

    pub fn input_stats(&self) -> InputStats {
        self.request.input_stats()
    }
}
