//! Core error types for the classifier.
//!
//! A malformed model response is not an error here: it is a
//! [`ValidationOutcome::Malformed`](crate::response::ValidationOutcome) value.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The PO description was blank after trimming.
    #[error("PO description must not be empty")]
    EmptyInput,

    #[error("Failed to parse taxonomy: {0}")]
    TaxonomyParse(String),

    /// The table breaks the L1/L2/L3 hierarchy or repeats a path.
    #[error("Taxonomy integrity violation: {0}")]
    TaxonomyIntegrity(String),
}
