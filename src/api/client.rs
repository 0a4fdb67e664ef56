use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use thiserror::Error;
use tracing::debug;

use super::models::ClientConfig;
use crate::domain::SelectedFile;
use crate::utils::mime_for;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Server returned status {0}")]
    Status(reqwest::StatusCode),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// HTTP client for the PDF-to-spreadsheet conversion endpoint.
#[derive(Clone)]
pub struct ConversionClient {
    config: ClientConfig,
    client: Client,
}

impl ConversionClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn build_form(&self, file: &SelectedFile) -> Result<Form> {
        let body = Body::from(file.contents.clone());
        let part = Part::stream_with_length(body, file.len() as u64)
            .file_name(file.name.clone())
            .mime_str(mime_for(&file.name))?;

        Ok(Form::new().part(self.config.field_name.clone(), part))
    }

    /// POST the file as multipart form data and return the response body.
    ///
    /// Any 2xx status counts as success; the body is not inspected.
    pub async fn convert(&self, file: &SelectedFile) -> Result<Bytes> {
        let form = self.build_form(file)?;

        debug!(
            endpoint = %self.config.endpoint,
            file = %file.name,
            size = file.len(),
            "Uploading file for conversion"
        );

        let response = self
            .client
            .post(self.config.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let body = response.bytes().await?;
        debug!(status = %status, size = body.len(), "Conversion response received");

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use url::Url;

    fn client_for(url: &str) -> ConversionClient {
        ConversionClient::new(ClientConfig {
            endpoint: Url::parse(url).unwrap(),
            ..ClientConfig::default()
        })
    }

    #[tokio::test]
    async fn test_convert_posts_multipart_and_returns_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="pdf_file"; filename="report.pdf""#.to_string()),
                Matcher::Regex("Content-Type: application/pdf".to_string()),
                Matcher::Regex("%PDF-1.4 marks".to_string()),
            ]))
            .with_status(200)
            .with_header(
                "content-type",
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            )
            .with_body("X")
            .create_async()
            .await;

        let client = client_for(&format!("{}/", server.url()));
        let file = SelectedFile::new("report.pdf", &b"%PDF-1.4 marks"[..]);
        let body = client.convert(&file).await.unwrap();

        assert_eq!(body, Bytes::from_static(b"X"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_convert_sends_sized_body() {
        let contents = vec![b'7'; 64 * 1024];
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header("content-length", Matcher::Regex(r"^\d+$".to_string()))
            .match_body(Matcher::Regex("7{1024}".to_string()))
            .with_status(200)
            .with_body("X")
            .create_async()
            .await;

        let client = client_for(&format!("{}/", server.url()));
        let body = client
            .convert(&SelectedFile::new("big.pdf", contents))
            .await
            .unwrap();

        assert_eq!(&body[..], b"X");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_convert_uses_configured_field_name() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/convert")
            .match_body(Matcher::Regex(r#"name="upload"; filename="scan.bin""#.to_string()))
            .with_status(201)
            .with_body("ok")
            .create_async()
            .await;

        let client = ConversionClient::new(ClientConfig {
            endpoint: Url::parse(&format!("{}/convert", server.url())).unwrap(),
            field_name: "upload".to_string(),
            ..ClientConfig::default()
        });
        let body = client
            .convert(&SelectedFile::new("scan.bin", &b"raw"[..]))
            .await
            .unwrap();

        assert_eq!(&body[..], b"ok");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_convert_server_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let client = client_for(&format!("{}/", server.url()));
        let err = client
            .convert(&SelectedFile::new("report.pdf", &b"%PDF"[..]))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Status(s) if s.as_u16() == 500));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_convert_connection_refused() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(&format!("http://{}/", addr));
        let err = client
            .convert(&SelectedFile::new("report.pdf", &b"%PDF"[..]))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::RequestError(_)));
    }
}
