//! PO Classifier Core - taxonomy, prompt construction and response validation.
//!
//! This crate holds the deterministic half of the classification pipeline.
//! It performs no I/O: the model call lives in `po-classifier-ai`, and the
//! history buffer defined here is owned by whoever calls the pipeline.

pub mod constants;
pub mod errors;
pub mod history;
pub mod prompt;
pub mod response;
pub mod taxonomy;

pub use errors::Error;
pub use errors::Result;
pub use history::{History, HistoryEntry};
pub use prompt::{build_prompt, ClassificationRequest, InputStats, PromptBuilder};
pub use response::{validate, ClassificationResult, ValidationOutcome};
pub use taxonomy::{Taxonomy, TaxonomyRow};
