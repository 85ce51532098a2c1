//! Health monitoring response types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Liveness status.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HealthStatus {
    /// Always `healthy` while the process is serving requests.
    pub status: String,
}

impl HealthStatus {
    /// Returns the healthy status.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_owned(),
        }
    }
}
