//! Object storage client used to mirror generated scrapbooks

use async_trait::async_trait;
use opendal::{layers::TimeoutLayer, services::S3, Operator};
use std::time::Duration;

use crate::{
    config::StorageConfig,
    error::{AppError, AppResult},
};

/// Destination for best-effort copies of published files
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
        metadata: &[(&str, String)],
    ) -> AppResult<()>;
}

/// Object store backed by an OpenDAL operator. Production uses the S3
/// service, which signs requests and stores metadata as user metadata.
#[derive(Clone)]
pub struct OpendalObjectStore {
    operator: Operator,
}

impl OpendalObjectStore {
    /// S3-compatible bucket described by the storage config
    pub fn new(config: &StorageConfig) -> AppResult<Self> {
        let mut builder = S3::default()
            .endpoint(&config.endpoint)
            .bucket(&config.bucket)
            .region(&config.region);

        if let (Some(key_id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            builder = builder.access_key_id(key_id).secret_access_key(secret);
        }

        let operator = Operator::new(builder)
            .map_err(|e| AppError::Internal(format!("Failed to create storage client: {}", e)))?
            .layer(TimeoutLayer::new().with_timeout(Duration::from_secs(config.timeout_secs)))
            .finish();

        Ok(Self::from_operator(operator))
    }

    pub fn from_operator(operator: Operator) -> Self {
        Self { operator }
    }
}

#[async_trait]
impl ObjectStore for OpendalObjectStore {
    async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
        metadata: &[(&str, String)],
    ) -> AppResult<()> {
        let capability = self.operator.info().full_capability();

        let mut write = self.operator.write_with(key, body);
        if capability.write_with_content_type {
            write = write.content_type(content_type);
        }
        if capability.write_with_user_metadata {
            write = write.user_metadata(
                metadata
                    .iter()
                    .map(|(name, value)| (name.to_string(), value.clone())),
            );
        }

        write
            .await
            .map_err(|e| AppError::Publish(format!("Upload of {} failed: {}", key, e)))?;

        tracing::debug!("Uploaded {} to object storage", key);
        Ok(())
    }
}
