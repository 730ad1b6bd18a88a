use std::sync::{Arc, RwLock};

use chrono::Utc;
use po_classifier_ai::{
    Classification, Classifier, ClassifierConfig, ModelInvoker, ProviderSettings, RigInvoker,
};
use po_classifier_core::{History, HistoryEntry};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{config::Config, error::ApiError};

/// Shared server state. The classifier is stateless; the history and the
/// last result belong to this consumer, not to the classifier.
pub struct AppState {
    pub classifier: Arc<Classifier>,
    history: RwLock<History>,
    last_classification: RwLock<Option<Classification>>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let settings = ProviderSettings::resolve(
        &config.provider_id,
        config.model.clone(),
        config.provider_url.clone(),
        |key| std::env::var(key).ok(),
    )?;
    tracing::info!(
        provider = %settings.provider_id,
        model = %settings.model,
        "Model backend configured"
    );
    Ok(build_state_with_invoker(
        config,
        Arc::new(RigInvoker::new(settings)),
    ))
}

pub fn build_state_with_invoker(config: &Config, invoker: Arc<dyn ModelInvoker>) -> Arc<AppState> {
    let classifier = Classifier::with_builtin_taxonomy(
        invoker,
        ClassifierConfig {
            backend_timeout: Some(config.backend_timeout),
        },
    );
    tracing::info!(
        rows = classifier.taxonomy().len(),
        history_capacity = config.history_capacity,
        "Classifier ready"
    );
    Arc::new(AppState {
        classifier: Arc::new(classifier),
        history: RwLock::new(History::with_capacity(config.history_capacity)),
        last_classification: RwLock::new(None),
    })
}

impl AppState {
    /// Append a finished classification to the history and make it the last
    /// result. Locks are held only for the update itself.
    pub fn record(&self, classification: Classification) -> Result<(), ApiError> {
        let entry = HistoryEntry::from_outcome(
            &classification.request,
            &classification.outcome,
            Utc::now(),
        );
        self.history
            .write()
            .map_err(|_| poisoned("history"))?
            .push(entry);
        *self
            .last_classification
            .write()
            .map_err(|_| poisoned("last classification"))? = Some(classification);
        Ok(())
    }

    pub fn history_entries(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        Ok(self
            .history
            .read()
            .map_err(|_| poisoned("history"))?
            .to_vec())
    }

    pub fn clear_history(&self) -> Result<(), ApiError> {
        self.history
            .write()
            .map_err(|_| poisoned("history"))?
            .clear();
        Ok(())
    }

    pub fn last_classification(&self) -> Result<Option<Classification>, ApiError> {
        Ok(self
            .last_classification
            .read()
            .map_err(|_| poisoned("last classification"))?
            .clone())
    }
}

fn poisoned(what: &str) -> ApiError {
    ApiError::Internal(format!("{} lock poisoned", what))
}
