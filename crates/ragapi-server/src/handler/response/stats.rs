//! Collection statistics response types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Size of the document collection.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CollectionStats {
    /// Name of the collection queried.
    pub collection_name: String,
    /// Number of documents stored in the collection.
    pub document_count: u64,
}
