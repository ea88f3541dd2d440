//! Pinata IPFS pinning provider.

use crate::config::{explicit_or_env, PINATA_JWT_ENV_VARS};
use crate::error::{parse_retry_after, sanitize_error_message, GenPinError, Result};
use crate::pin::provider::PinProvider;
use crate::pin::types::{upload_file_name, PinnedFile, UPLOAD_FORMAT};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Instant;

const DEFAULT_UPLOADS_URL: &str = "https://uploads.pinata.cloud";
const DEFAULT_API_URL: &str = "https://api.pinata.cloud";

/// Builder for PinataProvider.
#[derive(Debug, Clone, Default)]
pub struct PinataProviderBuilder {
    jwt: Option<String>,
    uploads_url: Option<String>,
    api_url: Option<String>,
}

impl PinataProviderBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the JWT. Falls back to `PINATA_JWT` env var.
    pub fn jwt(mut self, jwt: impl Into<String>) -> Self {
        self.jwt = Some(jwt.into());
        self
    }

    /// Overrides the uploads origin.
    pub fn uploads_url(mut self, url: impl Into<String>) -> Self {
        self.uploads_url = Some(url.into());
        self
    }

    /// Overrides the management API origin (used by the health check).
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Builds the provider, resolving the JWT.
    pub fn build(self) -> Result<PinataProvider> {
        let jwt = explicit_or_env(self.jwt, &PINATA_JWT_ENV_VARS)
            .ok_or_else(|| GenPinError::Auth("PINATA_JWT not set and no JWT provided".into()))?;

        let trim = |url: Option<String>, default: &str| {
            url.unwrap_or_else(|| default.to_string())
                .trim_end_matches('/')
                .to_string()
        };

        Ok(PinataProvider {
            client: reqwest::Client::new(),
            jwt,
            uploads_url: trim(self.uploads_url, DEFAULT_UPLOADS_URL),
            api_url: trim(self.api_url, DEFAULT_API_URL),
        })
    }
}

/// Pinata pinning provider using the public file upload endpoint.
pub struct PinataProvider {
    client: reqwest::Client,
    jwt: String,
    uploads_url: String,
    api_url: String,
}

impl PinataProvider {
    /// Creates a new `PinataProviderBuilder`.
    pub fn builder() -> PinataProviderBuilder {
        PinataProviderBuilder::new()
    }

    async fn upload_impl(&self, data: Vec<u8>, sequence: u32) -> Result<PinnedFile> {
        if data.is_empty() {
            return Err(GenPinError::InvalidRequest(
                "refusing to upload an empty image".into(),
            ));
        }
        if sequence == 0 {
            return Err(GenPinError::InvalidRequest(
                "sequence numbers start at 1".into(),
            ));
        }

        let start = Instant::now();
        let file_name = upload_file_name(sequence);
        let size = data.len();

        let file_part = reqwest::multipart::Part::bytes(data)
            .file_name(file_name.clone())
            .mime_str(UPLOAD_FORMAT.mime_type())
            .map_err(|e| GenPinError::InvalidRequest(e.to_string()))?;

        let form = reqwest::multipart::Form::new()
            .text("network", "public")
            .text("name", file_name.clone())
            .part("file", file_part);

        tracing::debug!(sequence, file = %file_name, bytes = size, "uploading to Pinata");

        let response = self
            .client
            .post(format!("{}/v3/files", self.uploads_url))
            .bearer_auth(&self.jwt)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let text = response.text().await.unwrap_or_default();
            return Err(parse_error(status.as_u16(), &text, &headers));
        }

        let upload: PinataUploadResponse = response.json().await?;
        let file = upload.data;
        if file.cid.trim().is_empty() {
            return Err(GenPinError::UnexpectedResponse(
                "No CID in Pinata upload response".into(),
            ));
        }

        tracing::debug!(
            sequence,
            cid = %file.cid,
            elapsed = ?start.elapsed(),
            "Pinata accepted upload"
        );

        Ok(PinnedFile {
            cid: file.cid,
            name: file.name.unwrap_or(file_name),
            size: file.size,
        })
    }
}

fn parse_error(status: u16, text: &str, headers: &reqwest::header::HeaderMap) -> GenPinError {
    let text = sanitize_error_message(text);
    match status {
        401 | 403 => GenPinError::Auth(text),
        429 => {
            let retry_after = parse_retry_after(headers).map(std::time::Duration::from_secs);
            GenPinError::RateLimited { retry_after }
        }
        _ => GenPinError::Api {
            status,
            message: text,
        },
    }
}

#[async_trait]
impl PinProvider for PinataProvider {
    async fn upload(&self, data: Vec<u8>, sequence: u32) -> Result<PinnedFile> {
        self.upload_impl(data, sequence).await
    }

    fn name(&self) -> &str {
        "Pinata (IPFS)"
    }

    async fn health_check(&self) -> Result<()> {
        let response = self
            .client
            .get(format!("{}/data/testAuthentication", self.api_url))
            .bearer_auth(&self.jwt)
            .send()
            .await?;

        match response.status().as_u16() {
            401 | 403 => Err(GenPinError::Auth("Invalid Pinata JWT".into())),
            s if !(200..300).contains(&s) => Err(GenPinError::Api {
                status: s,
                message: "Health check failed".into(),
            }),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PinataUploadResponse {
    data: PinataFile,
}

#[derive(Debug, Deserialize)]
struct PinataFile {
    #[serde(default)]
    cid: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    size: Option<u64>,
}
