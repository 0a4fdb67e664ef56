use std::sync::Arc;

use bytes::Bytes;
use futures::future::BoxFuture;
use tracing::{debug, error, warn};

use super::ConversionService;
use crate::domain::{AppError, DownloadableResult, PendingDownload, SelectedFile, UploadPhase};

/// State machine behind the upload form.
///
/// Holds the selected file, whether a conversion request is outstanding, and
/// the converted result until it has been handed to a download sink.
pub struct UploadController {
    service: Arc<dyn ConversionService>,
    output_filename: String,
    selected: Option<SelectedFile>,
    busy: bool,
    result: Option<DownloadableResult>,
}

impl UploadController {
    pub fn new(service: Arc<dyn ConversionService>, output_filename: impl Into<String>) -> Self {
        Self {
            service,
            output_filename: output_filename.into(),
            selected: None,
            busy: false,
            result: None,
        }
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && !self.busy
    }

    pub fn phase(&self) -> UploadPhase {
        match (&self.selected, self.busy, &self.result) {
            (_, true, _) => UploadPhase::Submitting,
            (_, false, Some(_)) => UploadPhase::ResultAvailable,
            (Some(_), false, None) => UploadPhase::Ready,
            (None, false, None) => UploadPhase::Idle,
        }
    }

    /// Replace the selected file. Any result not yet saved is dropped.
    pub fn select_file(&mut self, file: SelectedFile) {
        debug!(file = %file.name, size = file.len(), "File selected");
        if file.is_empty() {
            warn!(file = %file.name, "Selected file is empty");
        }
        if self.result.take().is_some() {
            debug!("Discarding unsaved result after new selection");
        }
        self.selected = Some(file);
    }

    /// Start a conversion of the selected file.
    ///
    /// Returns `None` without touching any state when there is no file or a
    /// request is already outstanding. Otherwise marks the controller busy and
    /// returns the request; its outcome must be fed back through
    /// [`UploadController::complete_submit`].
    pub fn begin_submit(&mut self) -> Option<BoxFuture<'static, Result<Bytes, AppError>>> {
        let Some(file) = self.selected.clone() else {
            debug!("Submit ignored, no file selected");
            return None;
        };

        if self.busy {
            warn!("Submit ignored, a conversion is already in progress");
            return None;
        }

        self.busy = true;
        debug!(file = %file.name, "Submitting file for conversion");
        Some(self.service.convert(file))
    }

    /// Record the outcome of the request started by `begin_submit`.
    ///
    /// Failures are logged and otherwise dropped; the selection is kept either way.
    pub fn complete_submit(&mut self, outcome: Result<Bytes, AppError>) {
        self.busy = false;

        match outcome {
            Ok(contents) => {
                debug!(size = contents.len(), "Conversion succeeded");
                self.result = Some(DownloadableResult::new(contents));
            }
            Err(e) => {
                error!(error = %e, "Error uploading file");
            }
        }
    }

    /// Take the available result, if any, for saving under the output file name.
    ///
    /// Yields each result once; the controller holds nothing afterwards.
    pub fn take_download(&mut self) -> Option<PendingDownload> {
        self.result.take().map(|result| PendingDownload {
            file_name: self.output_filename.clone(),
            contents: result.into_bytes(),
        })
    }
}
