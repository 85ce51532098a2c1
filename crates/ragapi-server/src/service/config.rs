#[cfg(feature = "config")]
use clap::Args;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default values for configuration options.
mod defaults {
    /// Default language model used for answers.
    pub const MODEL_NAME: &str = "tinyllama";
}

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
#[builder(
    pattern = "owned",
    setter(into, prefix = "with"),
    build_fn(validate = "Self::validate")
)]
pub struct ServiceConfig {
    /// Name of the language model that generates answers.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "MODEL_NAME", default_value = defaults::MODEL_NAME)
    )]
    #[builder(default = "defaults::MODEL_NAME.to_owned()")]
    pub model_name: String,
}

impl ServiceConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        validate_model_name(&self.model_name)
    }
}

impl ServiceConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match &self.model_name {
            Some(model_name) => validate_model_name(model_name),
            None => Ok(()),
        }
    }
}

fn validate_model_name(model_name: &str) -> Result<(), String> {
    if model_name.trim().is_empty() {
        return Err("Model name cannot be empty".to_string());
    }
    Ok(())
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model_name: defaults::MODEL_NAME.to_owned(),
        }
    }
}
