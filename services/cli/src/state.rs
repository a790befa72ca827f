//! services/cli/src/state.rs
//!
//! Defines the application's shared state and how it is assembled from config.

use crate::adapters::{FileStorage, OpenAiContentAdapter, StubContentGenerator};
use crate::config::Config;
use async_openai::{config::OpenAIConfig, Client};
use commitly_core::ports::{BlobStorage, ContentGenerator};
use commitly_core::{Store, Tutor};
use std::sync::Arc;
use tracing::{info, warn};

/// Everything a command needs, created once at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub tutor: Tutor,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires the file-backed store and picks the content generator.
    ///
    /// The generator is chosen here, once: the OpenAI adapter when an API key is
    /// configured, the deterministic stub otherwise.
    pub fn from_config(config: Arc<Config>) -> Self {
        let storage: Arc<dyn BlobStorage> = Arc::new(FileStorage::new(config.data_dir.clone()));
        info!(dir = %config.data_dir.display(), "Using file storage");

        let generator: Arc<dyn ContentGenerator> = match &config.openai_api_key {
            Some(api_key) => {
                let client = Client::with_config(OpenAIConfig::new().with_api_key(api_key));
                info!(model = %config.content_model, "Using OpenAI content generator");
                Arc::new(OpenAiContentAdapter::new(client, config.content_model.clone()))
            }
            None => {
                warn!("OPENAI_API_KEY not set, using mock content");
                Arc::new(StubContentGenerator::new())
            }
        };

        Self::new(storage, generator, config)
    }

    pub fn new(
        storage: Arc<dyn BlobStorage>,
        generator: Arc<dyn ContentGenerator>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            store: Store::new(storage),
            tutor: Tutor::new(generator),
            config,
        }
    }
}
