use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::api::ClientConfig;
use crate::domain::{AppError, PendingDownload};
use crate::utils::numbered_file_name;

/// Where a converted spreadsheet ends up.
///
/// Resolves to `Ok(None)` when the user declined to save.
pub trait DownloadSink: Send + Sync {
    fn save(&self, download: PendingDownload) -> BoxFuture<'static, Result<Option<PathBuf>, AppError>>;
}

/// Asks for a location with a native save dialog pre-filled with the file name.
#[derive(Debug, Clone, Default)]
pub struct DialogSink;

impl DownloadSink for DialogSink {
    fn save(&self, download: PendingDownload) -> BoxFuture<'static, Result<Option<PathBuf>, AppError>> {
        async move {
            let path = rfd::AsyncFileDialog::new()
                .set_file_name(&download.file_name)
                .add_filter("Excel workbook", &["xlsx"])
                .save_file()
                .await
                .map(|handle| handle.path().to_path_buf());

            match path {
                Some(path) => {
                    write_file(&path, &download.contents).await?;
                    info!(path = %path.display(), "Saved converted spreadsheet");
                    Ok(Some(path))
                }
                None => {
                    debug!("Save dialog cancelled, discarding result");
                    Ok(None)
                }
            }
        }
        .boxed()
    }
}

/// Saves straight into a directory, never overwriting an existing file.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for DirectorySink {
    fn save(&self, download: PendingDownload) -> BoxFuture<'static, Result<Option<PathBuf>, AppError>> {
        let dir = self.dir.clone();
        async move {
            tokio::fs::create_dir_all(&dir).await.map_err(|e| {
                AppError::Io(format!("Failed to create {}: {}", dir.display(), e))
            })?;

            let (path, file) = create_unique(&dir, &download.file_name).await?;
            write_contents(file, &download.contents).await?;
            info!(path = %path.display(), "Saved converted spreadsheet");
            Ok(Some(path))
        }
        .boxed()
    }
}

/// Pick the sink the configuration asks for.
pub fn sink_for(config: &ClientConfig) -> Arc<dyn DownloadSink> {
    match &config.download_dir {
        Some(dir) => Arc::new(DirectorySink::new(dir.clone())),
        None => Arc::new(DialogSink),
    }
}

/// Atomically claim the first free `name`, `name (1)`, ... in `dir`.
async fn create_unique(dir: &Path, file_name: &str) -> Result<(PathBuf, File), AppError> {
    for n in 0u32.. {
        let path = dir.join(numbered_file_name(file_name, n));
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => {
                return Err(AppError::Io(format!(
                    "Failed to create {}: {}",
                    path.display(),
                    e
                )))
            }
        }
    }

    Err(AppError::Io(format!(
        "No free file name left for {} in {}",
        file_name,
        dir.display()
    )))
}

async fn write_file(path: &Path, contents: &[u8]) -> Result<(), AppError> {
    let file = File::create(path)
        .await
        .map_err(|e| AppError::Io(format!("Failed to create file: {}", e)))?;

    write_contents(file, contents).await
}

async fn write_contents(mut file: File, contents: &[u8]) -> Result<(), AppError> {
    file.write_all(contents)
        .await
        .map_err(|e| AppError::Io(format!("Write error: {}", e)))?;

    file.sync_all()
        .await
        .map_err(|e| AppError::Io(format!("Failed to sync file: {}", e)))?;

    Ok(())
}
