//! Business logic services

pub mod assembler;
pub mod publisher;
pub mod renderer;
pub mod resolver;
pub mod scrapbook;
pub mod storage;

use std::sync::Arc;

use crate::{
    config::{ScrapbookConfig, StorageConfig},
    error::AppResult,
    repository::ContentStore,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub scrapbook: scrapbook::ScrapbookService,
}

impl Services {
    /// Create all services on top of the given content store. The object
    /// storage mirror is only set up when enabled in configuration.
    pub fn new(
        store: Arc<dyn ContentStore>,
        scrapbook_config: ScrapbookConfig,
        storage_config: &StorageConfig,
    ) -> AppResult<Self> {
        let mirror: Option<Arc<dyn storage::ObjectStore>> = if storage_config.enabled {
            tracing::info!(
                "Mirroring scrapbooks to {}/{}",
                storage_config.endpoint,
                storage_config.bucket
            );
            Some(Arc::new(storage::OpendalObjectStore::new(storage_config)?))
        } else {
            None
        };

        Ok(Self {
            scrapbook: scrapbook::ScrapbookService::new(store, scrapbook_config, mirror),
        })
    }
}
