//! PO Classifier AI - model invocation using rig-core.
//!
//! This crate wires the deterministic core (taxonomy, prompt, validator) to a
//! text-generation backend.
//!
//! # Architecture
//!
//! - `invoker`: `ModelInvoker` trait, rig-core implementation, scripted fake
//! - `providers`: Provider catalog and resolved backend settings
//! - `classifier`: Build → invoke → validate pipeline
//! - `types`: Shared DTOs (`Classification`, `ModelInfo`)
//! - `error`: Service error type
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use po_classifier_ai::{Classifier, ClassifierConfig, ProviderSettings, RigInvoker};
//!
//! let settings = ProviderSettings::resolve("groq", None, None, |k| std::env::var(k).ok())?;
//! let classifier = Classifier::with_builtin_taxonomy(
//!     Arc::new(RigInvoker::new(settings)),
//!     ClassifierConfig::default(),
//! );
//!
//! let classification = classifier
//!     .classify("Dell Latitude laptops for new hires", Some("Dell"))
//!     .await?;
//! match classification.outcome {
//!     ValidationOutcome::Valid { result, low_confidence } => show(result, low_confidence),
//!     ValidationOutcome::Malformed { raw } => show_raw(raw),
//! }
//! ```

pub mod classifier;
pub mod error;
pub mod invoker;
pub mod providers;
pub mod types;

// Re-export main types for convenience
pub use classifier::{Classifier, ClassifierConfig};
pub use error::AiError;
pub use invoker::{ModelInvoker, RigInvoker, ScriptedInvoker};
pub use providers::{provider_catalog, ProviderInfo, ProviderSettings, DEFAULT_PROVIDER_ID};
pub use types::{Classification, ModelInfo, DECODING_TEMPERATURE};
