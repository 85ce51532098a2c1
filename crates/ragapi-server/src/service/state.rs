use ragapi_core::{GenerationService, RetrievalService};

use crate::service::{ApiInfo, RagService, ServiceConfig};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    pub config: ServiceConfig,
    pub api_info: ApiInfo,

    // External services:
    pub retrieval: RetrievalService,

    // Internal services:
    pub rag: RagService,
}

impl ServiceState {
    /// Builds application state from already connected providers.
    pub fn new(
        config: ServiceConfig,
        retrieval: RetrievalService,
        generation: GenerationService,
    ) -> Self {
        let rag = RagService::new(retrieval.clone(), generation, config.model_name.clone());

        Self {
            config,
            api_info: ApiInfo::default(),
            retrieval,
            rag,
        }
    }

    /// Replaces the identity reported by the root endpoint.
    pub fn with_api_info(mut self, api_info: ApiInfo) -> Self {
        self.api_info = api_info;
        self
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(config: ServiceConfig);
impl_di!(api_info: ApiInfo);

// External services:
impl_di!(retrieval: RetrievalService);

// Internal services:
impl_di!(rag: RagService);
