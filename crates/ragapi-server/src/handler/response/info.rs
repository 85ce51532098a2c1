//! Service information response types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Service identity returned by the root endpoint.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ServiceInfo {
    /// Human-readable service name.
    pub name: String,
    /// Service version.
    pub version: String,
    /// Path of the interactive API documentation.
    pub docs: String,
}
