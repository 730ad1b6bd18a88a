//! Taxonomy module - the fixed L1/L2/L3 classification table.
//!
//! The table is the only enumeration of valid classification targets.
//! Nothing else in the workspace hardcodes category values.

mod taxonomy_model;
mod taxonomy_table;

pub use taxonomy_model::TaxonomyRow;
pub use taxonomy_table::Taxonomy;
