use crate::middleware::{API_TITLE, OpenApiConfig};

/// Identity reported by the root endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiInfo {
    /// Human-readable service name.
    pub name: String,
    /// Service version.
    pub version: String,
    /// Path of the interactive documentation.
    pub docs: String,
}

impl ApiInfo {
    /// Returns the info for this build with the given documentation path.
    pub fn new(docs: impl Into<String>) -> Self {
        Self {
            name: API_TITLE.to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            docs: docs.into(),
        }
    }
}

impl Default for ApiInfo {
    fn default() -> Self {
        Self::from(&OpenApiConfig::default())
    }
}

impl From<&OpenApiConfig> for ApiInfo {
    fn from(config: &OpenApiConfig) -> Self {
        Self::new(config.scalar_ui.clone())
    }
}
