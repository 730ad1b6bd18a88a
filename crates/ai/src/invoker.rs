//! Model invocation: the single network boundary of the classifier.
//!
//! `RigInvoker` sends one prompt to the configured backend at temperature 0.0
//! and returns the raw text. It never retries and never interprets the
//! response.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client as HttpClient;
use rig::{
    client::{CompletionClient, Nothing},
    completion::Prompt,
    providers::{anthropic, gemini, groq, ollama, openai},
};

use crate::error::AiError;
use crate::providers::ProviderSettings;
use crate::types::{ModelInfo, DECODING_TEMPERATURE};

// ============================================================================
// Model Invoker Trait
// ============================================================================

/// Sends a prompt to a text-generation backend.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// Return the raw response text, or a backend failure.
    async fn invoke(&self, prompt: &str) -> Result<String, AiError>;

    /// Provider and model this invoker talks to.
    fn model_info(&self) -> ModelInfo;
}

// ============================================================================
// rig-core Implementation
// ============================================================================

/// Invoker backed by rig-core provider clients.
pub struct RigInvoker {
    settings: ProviderSettings,
}

impl RigInvoker {
    pub fn new(settings: ProviderSettings) -> Self {
        Self { settings }
    }

    fn require_key(&self) -> Result<String, AiError> {
        self.settings
            .api_key
            .clone()
            .ok_or_else(|| AiError::MissingApiKey(self.settings.provider_id.clone()))
    }
}

/// Build a zero-temperature agent on `$client` and send `$prompt` once.
macro_rules! prompt_once {
    ($client:expr, $model:expr, $prompt:expr) => {
        $client
            .agent($model)
            .temperature(DECODING_TEMPERATURE)
            .build()
            .prompt($prompt)
            .await
            .map_err(|e| AiError::Backend(e.to_string()))?
    };
}

#[async_trait]
impl ModelInvoker for RigInvoker {
    async fn invoke(&self, prompt: &str) -> Result<String, AiError> {
        let provider_id = self.settings.provider_id.as_str();
        let model_id = self.settings.model.as_str();
        let prompt = prompt.to_string();
        let started = Instant::now();

        debug!(
            "Invoking provider {} model {} ({} prompt chars)",
            provider_id,
            model_id,
            prompt.chars().count()
        );

        let response = match provider_id {
            "groq" => {
                let key = self.require_key()?;
                let client: groq::Client<HttpClient> =
                    groq::Client::new(&key).map_err(|e| AiError::Backend(e.to_string()))?;
                prompt_once!(client, model_id, &prompt)
            }
            "anthropic" => {
                let key = self.require_key()?;
                let client: anthropic::Client<HttpClient> =
                    anthropic::Client::new(&key).map_err(|e| AiError::Backend(e.to_string()))?;
                prompt_once!(client, model_id, &prompt)
            }
            "gemini" => {
                let key = self.require_key()?;
                let client: gemini::Client<HttpClient> =
                    gemini::Client::new(&key).map_err(|e| AiError::Backend(e.to_string()))?;
                prompt_once!(client, model_id, &prompt)
            }
            "ollama" => {
                let mut builder = ollama::Client::<HttpClient>::builder().api_key(Nothing);
                if let Some(url) = self.settings.base_url.clone() {
                    builder = builder.base_url(&url);
                }
                let client = builder
                    .build()
                    .map_err(|e| AiError::Backend(e.to_string()))?;
                prompt_once!(client, model_id, &prompt)
            }
            "openai" => {
                let key = self.require_key()?;
                let client: openai::Client<HttpClient> =
                    openai::Client::new(&key).map_err(|e| AiError::Backend(e.to_string()))?;
                prompt_once!(client, model_id, &prompt)
            }
            other => return Err(AiError::UnknownProvider(other.to_string())),
        };

        debug!(
            "Provider {} answered in {} ms ({} chars)",
            provider_id,
            started.elapsed().as_millis(),
            response.chars().count()
        );

        Ok(response)
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo::new(&self.settings.provider_id, &self.settings.model)
    }
}

// ============================================================================
// Scripted Invoker for Testing
// ============================================================================

/// A fake invoker that replays queued responses in order.
///
/// Every prompt it receives is recorded so tests can assert on what would
/// have been sent.
pub struct ScriptedInvoker {
    responses: Mutex<VecDeque<Result<String, AiError>>>,
    prompts: Mutex<Vec<String>>,
    delay: Option<Duration>,
    info: ModelInfo,
}

impl Default for ScriptedInvoker {
    fn default() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
            delay: None,
            info: ModelInfo::new("scripted", "scripted-model"),
        }
    }
}

impl ScriptedInvoker {
    /// Create an invoker that answers each call with the next response.
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let invoker = Self::default();
        for response in responses {
            invoker.push_response(response);
        }
        invoker
    }

    /// Create an invoker whose next call fails with a backend error.
    pub fn failing(message: &str) -> Self {
        let invoker = Self::default();
        invoker.push_failure(AiError::backend(message));
        invoker
    }

    /// Wait this long before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push_response(&self, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(response.into()));
    }

    pub fn push_failure(&self, error: AiError) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(error));
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl ModelInvoker for ScriptedInvoker {
    async fn invoke(&self, prompt: &str) -> Result<String, AiError> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        next.unwrap_or_else(|| {
            warn!("Scripted invoker has no response left");
            Err(AiError::internal("no scripted response left"))
        })
    }

    fn model_info(&self) -> ModelInfo {
        self.info.clone()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_invoker_replays_in_order() {
        let invoker = ScriptedInvoker::with_responses(["first", "second"]);
        assert_eq!(invoker.invoke("a").await.unwrap(), "first");
        assert_eq!(invoker.invoke("b").await.unwrap(), "second");
        assert!(matches!(
            invoker.invoke("c").await,
            Err(AiError::Internal(_))
        ));
        assert_eq!(invoker.prompts(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_scripted_invoker_failure() {
        let invoker = ScriptedInvoker::failing("429 Too Many Requests");
        let err = invoker.invoke("prompt").await.unwrap_err();
        assert!(err.is_backend_failure());
        assert_eq!(invoker.call_count(), 1);
    }

    #[tokio::test]
    async fn test_rig_invoker_without_key_fails_before_network() {
        let invoker = RigInvoker::new(ProviderSettings {
            provider_id: "groq".to_string(),
            model: "openai/gpt-oss-120b".to_string(),
            base_url: None,
            api_key: None,
        });
        let err = invoker.invoke("prompt").await.unwrap_err();
        assert!(matches!(err, AiError::MissingApiKey(p) if p == "groq"));
    }

    #[tokio::test]
    async fn test_rig_invoker_unknown_provider() {
        let invoker = RigInvoker::new(ProviderSettings {
            provider_id: "acme".to_string(),
            model: "m".to_string(),
            base_url: None,
            api_key: Some("k".to_string()),
        });
        assert!(matches!(
            invoker.invoke("prompt").await,
            Err(AiError::UnknownProvider(_))
        ));
    }

    #[test]
    fn test_model_info_reports_zero_temperature() {
        let invoker = RigInvoker::new(ProviderSettings {
            provider_id: "groq".to_string(),
            model: "openai/gpt-oss-120b".to_string(),
            base_url: None,
            api_key: Some("k".to_string()),
        });
        let info = invoker.model_info();
        assert_eq!(info.provider, "groq");
        assert_eq!(info.temperature, 0.0);
    }
}
