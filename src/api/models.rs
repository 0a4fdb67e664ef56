use std::path::PathBuf;

use serde::Deserialize;
use url::Url;

use crate::domain::AppError;
use crate::utils::sanitize_filename;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/";
pub const DEFAULT_FIELD_NAME: &str = "pdf_file";
pub const DEFAULT_OUTPUT_FILENAME: &str = "Student_Marks.xlsx";

/// Path to an optional JSON config file.
pub const CONFIG_PATH_VAR: &str = "MARKS_UPLOADER_CONFIG";
pub const ENDPOINT_VAR: &str = "MARKS_UPLOADER_ENDPOINT";
pub const DOWNLOAD_DIR_VAR: &str = "MARKS_UPLOADER_DOWNLOAD_DIR";

/// Configuration for the conversion client and the download step
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Where the PDF is POSTed.
    pub endpoint: Url,
    /// Multipart field carrying the file.
    pub field_name: String,
    /// Name the converted spreadsheet is saved under.
    pub output_filename: String,
    /// Save straight into this directory instead of asking with a dialog.
    pub download_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            field_name: DEFAULT_FIELD_NAME.to_string(),
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
            download_dir: None,
        }
    }
}

impl ClientConfig {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| AppError::Config(e.to_string()))?;
        config.normalized()
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an optional JSON file plus per-field overrides,
    /// reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .map_err(|e| AppError::Config(format!("{}: {}", path, e)))?;
                Self::from_json(&json)?
            }
            None => Self::default(),
        };

        if let Some(endpoint) = lookup(ENDPOINT_VAR) {
            config.endpoint = Url::parse(&endpoint)
                .map_err(|e| AppError::Config(format!("{}: {}", ENDPOINT_VAR, e)))?;
        }

        if let Some(dir) = lookup(DOWNLOAD_DIR_VAR) {
            config.download_dir = Some(PathBuf::from(dir));
        }

        config.normalized()
    }

    fn normalized(mut self) -> Result<Self, AppError> {
        if !matches!(self.endpoint.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "endpoint must be http or https, got {}",
                self.endpoint
            )));
        }

        if self.field_name.trim().is_empty() {
            return Err(AppError::Config("field_name must not be empty".to_string()));
        }

        self.output_filename = sanitize_filename(&self.output_filename);
        if self.output_filename.is_empty() {
            self.output_filename = DEFAULT_OUTPUT_FILENAME.to_string();
        }

        Ok(self)
    }
}
