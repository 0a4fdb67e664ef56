use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use iced::Task;
use tracing::{debug, error, info};

use crate::api::{ClientConfig, ConversionClient};
use crate::application::{sink_for, DownloadSink, UploadController};
use crate::domain::{AppError, SelectedFile};
use crate::ui::{UploadMessage, UploadView};

pub struct UploadApp {
    controller: UploadController,
    sink: Arc<dyn DownloadSink>,
}

impl Default for UploadApp {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl UploadApp {
    pub fn new(config: ClientConfig) -> Self {
        let sink = sink_for(&config);
        let output_filename = config.output_filename.clone();
        let client = ConversionClient::new(config);

        Self {
            controller: UploadController::new(Arc::new(client), output_filename),
            sink,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(UploadMessage),
    /// Picked and loaded file, `None` when the dialog was cancelled
    FilePicked(Result<Option<SelectedFile>, AppError>),
    ConversionFinished(Result<Bytes, AppError>),
    /// Saved path, `None` when the save dialog was cancelled
    SaveFinished(Result<Option<PathBuf>, AppError>),
}

async fn pick_pdf() -> Result<Option<SelectedFile>, AppError> {
    let Some(handle) = rfd::AsyncFileDialog::new()
        .add_filter("PDF", &["pdf"])
        .pick_file()
        .await
    else {
        return Ok(None);
    };

    let path = handle.path().to_path_buf();
    let contents = tokio::fs::read(&path)
        .await
        .map_err(|e| AppError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    Ok(Some(SelectedFile::new(handle.file_name(), contents)))
}

pub fn update(app: &mut UploadApp, message: Message) -> Task<Message> {
    let task = match message {
        Message::UiMessage(UploadMessage::BrowsePressed) => {
            Task::perform(pick_pdf(), Message::FilePicked)
        }
        Message::UiMessage(UploadMessage::ConvertPressed) => match app.controller.begin_submit() {
            Some(request) => Task::perform(request, Message::ConversionFinished),
            None => Task::none(),
        },
        Message::FilePicked(result) => {
            match result {
                Ok(Some(file)) => app.controller.select_file(file),
                Ok(None) => debug!("File dialog cancelled"),
                Err(e) => error!(error = %e, "Failed to load selected file"),
            }
            Task::none()
        }
        Message::ConversionFinished(outcome) => {
            app.controller.complete_submit(outcome);
            Task::none()
        }
        Message::SaveFinished(result) => {
            match result {
                Ok(Some(path)) => info!(path = %path.display(), "Download complete"),
                Ok(None) => debug!("Download cancelled"),
                Err(e) => error!(error = %e, "Failed to save converted file"),
            }
            Task::none()
        }
    };

    debug!(phase = ?app.controller.phase(), "Form updated");

    // A result that just arrived is saved exactly once.
    match app.controller.take_download() {
        Some(download) => Task::batch([
            task,
            Task::perform(app.sink.save(download), Message::SaveFinished),
        ]),
        None => task,
    }
}

fn form(app: &UploadApp) -> UploadView<'_> {
    UploadView {
        file_name: app.controller.selected_file().map(|f| f.name.as_str()),
        is_uploading: app.controller.is_busy(),
        can_convert: app.controller.can_submit(),
    }
}

pub fn view(app: &UploadApp) -> iced::Element<'_, Message> {
    form(app).view().map(Message::UiMessage)
}
