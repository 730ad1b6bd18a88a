/// Reserved level value the model returns when it cannot decide
pub const NOT_SURE: &str = "Not sure";

/// Supplier value used when the caller leaves the field blank
pub const SUPPLIER_NOT_PROVIDED: &str = "Not provided";

/// L1 value recorded in history when the model response did not parse
pub const INVALID_JSON_SENTINEL: &str = "Invalid JSON";

/// Default number of history entries kept by the consumer
pub const MAX_HISTORY: usize = 20;

/// Header label of the first taxonomy column
pub const TAXONOMY_HEADER_L1: &str = "L1";

/// Column delimiter in taxonomy source text
pub const TAXONOMY_DELIMITER: char = '|';

/// Response keys the model must return
pub const RESPONSE_KEYS: [&str; 3] = ["L1", "L2", "L3"];
