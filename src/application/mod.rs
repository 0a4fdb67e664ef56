pub mod download_sink;
pub mod upload_controller;

use bytes::Bytes;
use futures::future::BoxFuture;
use futures::FutureExt;

use crate::api::ConversionClient;
use crate::domain::{AppError, SelectedFile};

pub use download_sink::{sink_for, DownloadSink};
pub use upload_controller::UploadController;

/// Turns an uploaded PDF into spreadsheet bytes.
pub trait ConversionService: Send + Sync {
    fn convert(&self, file: SelectedFile) -> BoxFuture<'static, Result<Bytes, AppError>>;
}

impl ConversionService for ConversionClient {
    fn convert(&self, file: SelectedFile) -> BoxFuture<'static, Result<Bytes, AppError>> {
        let client = self.clone();
        async move {
            ConversionClient::convert(&client, &file)
                .await
                .map_err(|e| AppError::ConversionFailed(e.to_string()))
        }
        .boxed()
    }
}
