use bytes::Bytes;

/// A file the user picked, held in memory until it is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub contents: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, contents: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

/// Converted spreadsheet returned by the service.
///
/// Not `Clone`: the only way to get the bytes out is [`DownloadableResult::into_bytes`],
/// so a result can be saved at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct DownloadableResult {
    contents: Bytes,
}

impl DownloadableResult {
    pub fn new(contents: Bytes) -> Self {
        Self { contents }
    }

    pub fn into_bytes(self) -> Bytes {
        self.contents
    }
}

/// A result handed over to a download sink, together with the name to save it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDownload {
    pub file_name: String,
    pub contents: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Ready,
    Submitting,
    ResultAvailable,
}
