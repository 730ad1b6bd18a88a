//! Classification service: build the prompt, call the model, validate.
//!
//! The service holds no per-request state. One instance can serve any number
//! of concurrent `classify` calls; they share only the read-only taxonomy.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use po_classifier_core::{
    validate, ClassificationRequest, PromptBuilder, Taxonomy, ValidationOutcome,
};

use crate::error::AiError;
use crate::invoker::ModelInvoker;
use crate::types::{Classification, ModelInfo};

/// Configuration for the classifier.
#[derive(Debug, Clone, Default)]
pub struct ClassifierConfig {
    /// Upper bound on one backend call. `None` (the default) waits for the
    /// backend indefinitely.
    pub backend_timeout: Option<Duration>,
}

/// PO classifier over a model invoker and a taxonomy.
pub struct Classifier {
    invoker: Arc<dyn ModelInvoker>,
    taxonomy: Arc<Taxonomy>,
    prompt_builder: PromptBuilder,
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(
        invoker: Arc<dyn ModelInvoker>,
        taxonomy: Arc<Taxonomy>,
        config: ClassifierConfig,
    ) -> Self {
        let prompt_builder = PromptBuilder::new(&taxonomy);
        Self {
            invoker,
            taxonomy,
            prompt_builder,
            config,
        }
    }

    /// Classifier over the built-in procurement taxonomy.
    pub fn with_builtin_taxonomy(invoker: Arc<dyn ModelInvoker>, config: ClassifierConfig) -> Self {
        Self::new(invoker, Arc::new(Taxonomy::builtin().clone()), config)
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn model_info(&self) -> ModelInfo {
        self.invoker.model_info()
    }

    /// Classify one PO description.
    ///
    /// A blank description fails with [`AiError::EmptyInput`] before the
    /// backend is contacted. Backend failures and timeouts propagate without
    /// retry. A response that does not parse is an `Ok` with a
    /// `Malformed` outcome.
    pub async fn classify(
        &self,
        description: &str,
        supplier: Option<&str>,
    ) -> Result<Classification, AiError> {
        let request = ClassificationRequest::new(description, supplier)?;
        let prompt = self.prompt_builder.render(&request);
        let raw = self.invoke(&prompt).await?;
        let outcome = validate(&raw);

        let in_taxonomy = outcome
            .result()
            .map(|r| self.taxonomy.contains_path(&r.l1, &r.l2, &r.l3))
            .unwrap_or(false);

        match &outcome {
            ValidationOutcome::Valid {
                result,
                low_confidence,
            } => {
                info!(
                    "Classified as {} > {} > {} (low confidence: {}, in taxonomy: {})",
                    result.l1, result.l2, result.l3, low_confidence, in_taxonomy
                );
            }
            ValidationOutcome::Malformed { .. } => {
                warn!("Model returned a malformed response ({} chars)", raw.len());
            }
        }

        Ok(Classification {
            request,
            outcome,
            raw,
            model: self.invoker.model_info(),
            in_taxonomy,
        })
    }

    async fn invoke(&self, prompt: &str) -> Result<String, AiError> {
        match self.config.backend_timeout {
            Some(limit) => {
                debug!("Invoking model with {:?} timeout", limit);
                tokio::time::timeout(limit, self.invoker.invoke(prompt))
                    .await
                    .map_err(|_| AiError::Timeout(limit))?
            }
            None => self.invoker.invoke(prompt).await,
        }
    }
}
