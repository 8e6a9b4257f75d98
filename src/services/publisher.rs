//! Publishing of generated scrapbooks.
//!
//! The local file is authoritative: if it cannot be written, publishing
//! fails. The object storage copy is best effort and its failures are only
//! logged.

use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    services::storage::ObjectStore,
};

/// Where a scrapbook ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    pub path: PathBuf,
    pub mirrored: bool,
}

#[derive(Clone)]
pub struct Publisher {
    output_dir: PathBuf,
    mirror: Option<Arc<dyn ObjectStore>>,
}

impl Publisher {
    pub fn new(output_dir: impl Into<PathBuf>, mirror: Option<Arc<dyn ObjectStore>>) -> Self {
        Self {
            output_dir: output_dir.into(),
            mirror,
        }
    }

    /// Local path of the scrapbook for `year`
    pub fn path_for(&self, year: i32) -> PathBuf {
        self.output_dir.join(format!("{}.html", year))
    }

    /// Object storage key of the scrapbook for `year`
    pub fn object_key(year: i32) -> String {
        format!("scrapbooks/{}.html", year)
    }

    /// Write `html` to `<output_dir>/<year>.html`, then mirror it.
    pub async fn publish(
        &self,
        year: i32,
        html: &str,
        generated_at: DateTime<Utc>,
    ) -> AppResult<PublishOutcome> {
        let path = self.path_for(year);
        write_replacing(&self.output_dir, &path, html.as_bytes()).await?;
        tracing::info!("Wrote scrapbook for {} to {}", year, path.display());

        let mirrored = match &self.mirror {
            None => false,
            Some(store) => {
                let key = Self::object_key(year);
                let metadata = [
                    ("year", year.to_string()),
                    ("generated-at", generated_at.to_rfc3339()),
                ];
                match store
                    .put(&key, html.as_bytes().to_vec(), "text/html; charset=utf-8", &metadata)
                    .await
                {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::warn!("Failed to mirror scrapbook {} to {}: {}", year, key, e);
                        false
                    }
                }
            }
        };

        Ok(PublishOutcome { path, mirrored })
    }

    /// Read back the published scrapbook for `year`
    pub async fn read(&self, year: i32) -> AppResult<String> {
        let path = self.path_for(year);
        match tokio::fs::read_to_string(&path).await {
            Ok(html) => Ok(html),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::NotFound(format!(
                "No scrapbook generated for {}",
                year
            ))),
            Err(e) => Err(AppError::Internal(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

/// Writes to a temp file of its own in `dir` and renames it over `path`.
/// An interrupted write leaves the previous file in place, and concurrent
/// writers of the same year never share a temp file.
async fn write_replacing(dir: &Path, path: &Path, contents: &[u8]) -> AppResult<()> {
    let dir = dir.to_owned();
    let path = path.to_owned();
    let contents = contents.to_vec();

    tokio::task::spawn_blocking(move || -> AppResult<()> {
        let failed = |source: std::io::Error| AppError::WriteFailed {
            path: path.clone(),
            source,
        };

        std::fs::create_dir_all(&dir).map_err(failed)?;
        let mut tmp = temp_file_builder().tempfile_in(&dir).map_err(failed)?;
        tmp.write_all(&contents).map_err(failed)?;
        tmp.persist(&path).map_err(|e| failed(e.error))?;
        Ok(())
    })
    .await
    .map_err(|e| AppError::Internal(format!("Scrapbook write task failed: {}", e)))?
}

fn temp_file_builder() -> tempfile::Builder<'static, 'static> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".scrapbook-").suffix(".tmp");
    // Published files stay world-readable
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }
    builder
}
