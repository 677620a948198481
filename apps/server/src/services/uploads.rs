//! Listing image uploads on local disk

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::config::StorageConfig;
use crate::metrics::LISTING_IMAGE_UPLOADS_TOTAL;
use crate::{Error, Result};

/// Writes uploaded images under the upload directory and hands back the public path
/// they are served from.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    public_path: String,
    max_file_size: usize,
    max_files: usize,
    allowed_extensions: Vec<String>,
}

impl UploadStore {
    pub fn from_config(config: &StorageConfig) -> Self {
        Self {
            dir: config.upload_dir.clone(),
            public_path: config.public_path.trim_end_matches('/').to_string(),
            max_file_size: config.max_file_size_bytes,
            max_files: config.max_files,
            allowed_extensions: config
                .allowed_extensions
                .iter()
                .map(|ext| ext.to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Rejects the `n`th file of a request once the per-request limit is passed.
    pub fn check_count(&self, n: usize) -> Result<()> {
        if n > self.max_files {
            LISTING_IMAGE_UPLOADS_TOTAL
                .with_label_values(&["rejected"])
                .inc();
            return Err(Error::UnsupportedUpload(format!(
                "Too many files: at most {} images per request",
                self.max_files
            )));
        }
        Ok(())
    }

    /// Lower-cased extension (with the dot) of an allowed file name.
    pub fn check_extension(&self, file_name: &str) -> Result<String> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_ascii_lowercase()));

        match ext {
            Some(ext) if self.allowed_extensions.contains(&ext) => Ok(ext),
            _ => {
                LISTING_IMAGE_UPLOADS_TOTAL
                    .with_label_values(&["rejected"])
                    .inc();
                Err(Error::UnsupportedUpload(format!(
                    "Only image files ({}) are allowed.",
                    self.allowed_extensions.join(", ")
                )))
            }
        }
    }

    pub fn check_size(&self, size: usize) -> Result<()> {
        if size > self.max_file_size {
            LISTING_IMAGE_UPLOADS_TOTAL
                .with_label_values(&["rejected"])
                .inc();
            return Err(Error::UnsupportedUpload(format!(
                "File too large: limit is {} bytes",
                self.max_file_size
            )));
        }
        Ok(())
    }

    /// Validate and write one image. Returns the path it is served under.
    pub async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<String> {
        let ext = self.check_extension(file_name)?;
        self.check_size(bytes.len())?;

        let stored = stored_file_name(&ext);
        tokio::fs::write(self.dir.join(&stored), bytes).await?;
        LISTING_IMAGE_UPLOADS_TOTAL
            .with_label_values(&["stored"])
            .inc();

        tracing::debug!(file = %stored, size = bytes.len(), "Stored listing image");
        Ok(format!("{}/{}", self.public_path, stored))
    }

    /// Remove files written earlier in a request that later failed.
    pub async fn discard(&self, public_paths: &[String]) {
        for public in public_paths {
            let Some(name) = public
                .rsplit('/')
                .next()
                .filter(|n| !n.is_empty() && *n != "." && *n != "..")
            else {
                continue;
            };
            if let Err(e) = tokio::fs::remove_file(self.dir.join(name)).await {
                tracing::warn!(file = %name, error = %e, "Failed to remove discarded upload");
            }
        }
    }
}

/// `<unix millis>-<uuid><ext>`; unique even for uploads in the same millisecond.
fn stored_file_name(ext: &str) -> String {
    format!(
        "{}-{}{}",
        chrono::Utc::now().timestamp_millis(),
        Uuid::new_v4().simple(),
        ext
    )
}
