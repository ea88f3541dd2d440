//! Core types for pinning.

use crate::config::{explicit_or_env, PINATA_GATEWAY_ENV_VARS, PINATA_GATEWAY_TOKEN_ENV_VARS};
use crate::error::{GenPinError, Result};
use crate::image::ImageFormat;
use serde::{Deserialize, Serialize};

/// Format every pinned image is declared as.
pub const UPLOAD_FORMAT: ImageFormat = ImageFormat::Png;

/// Returns the file name an image is uploaded under.
pub fn upload_file_name(sequence: u32) -> String {
    format!("generated-image-{sequence}.{}", UPLOAD_FORMAT.extension())
}

/// A file accepted by the pinning service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedFile {
    /// Content identifier assigned by the service.
    pub cid: String,
    /// Name the file was stored under.
    pub name: String,
    /// Stored size in bytes, when reported.
    pub size: Option<u64>,
}

/// Gateway through which pinned content is served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gateway {
    host: String,
    token: String,
}

impl Gateway {
    /// Creates a gateway from a host (scheme and trailing slash are stripped) and access token.
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let host = host.into();
        let host = host
            .trim()
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/')
            .to_string();
        if host.is_empty() {
            return Err(GenPinError::InvalidRequest(
                "gateway host must not be empty".into(),
            ));
        }

        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(GenPinError::Auth(
                "gateway access token must not be empty".into(),
            ));
        }

        Ok(Self { host, token })
    }

    /// Resolves host and token, falling back to `PINATA_GATEWAY` / `PINATA_GATEWAY_TOKEN`.
    pub fn resolve(host: Option<String>, token: Option<String>) -> Result<Self> {
        let host = explicit_or_env(host, &PINATA_GATEWAY_ENV_VARS).ok_or_else(|| {
            GenPinError::InvalidRequest("PINATA_GATEWAY not set and no gateway host provided".into())
        })?;
        let token = explicit_or_env(token, &PINATA_GATEWAY_TOKEN_ENV_VARS).ok_or_else(|| {
            GenPinError::Auth("PINATA_GATEWAY_TOKEN not set and no gateway token provided".into())
        })?;
        Self::new(host, token)
    }

    /// Returns the gateway host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Builds the public URL for a CID.
    pub fn url(&self, cid: &str) -> String {
        format!(
            "https://{}/ipfs/{}?pinataGatewayToken={}",
            self.host, cid, self.token
        )
    }
}
