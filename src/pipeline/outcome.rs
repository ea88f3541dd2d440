//! Per-item outcome of a generate-then-upload cycle.

use crate::error::GenPinError;
use serde::{Deserialize, Serialize, Serializer};

/// Step of the cycle that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureStage {
    /// The image provider call.
    Generation,
    /// The pinning service call.
    Upload,
}

impl std::fmt::Display for FailureStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generation => write!(f, "generation"),
            Self::Upload => write!(f, "upload"),
        }
    }
}

/// Outcome recorded for exactly one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadResult {
    /// The image was generated and pinned.
    Uploaded {
        /// 1-based request position.
        sequence: u32,
        /// Content identifier returned by the pinning service.
        cid: String,
        /// Gateway URL serving the pinned image.
        gateway_url: String,
    },
    /// Generation or upload failed.
    Failed {
        /// 1-based request position.
        sequence: u32,
        /// Step that failed.
        stage: FailureStage,
        /// Human-readable error detail.
        error: String,
    },
}

impl UploadResult {
    pub(crate) fn failed(sequence: u32, stage: FailureStage, error: &GenPinError) -> Self {
        Self::Failed {
            sequence,
            stage,
            error: error.to_string(),
        }
    }

    /// 1-based request position.
    pub fn sequence(&self) -> u32 {
        match self {
            Self::Uploaded { sequence, .. } | Self::Failed { sequence, .. } => *sequence,
        }
    }

    /// True for `Uploaded`.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Uploaded { .. })
    }

    /// CID, present only on success.
    pub fn cid(&self) -> Option<&str> {
        match self {
            Self::Uploaded { cid, .. } => Some(cid),
            Self::Failed { .. } => None,
        }
    }

    /// Gateway URL, present only on success.
    pub fn gateway_url(&self) -> Option<&str> {
        match self {
            Self::Uploaded { gateway_url, .. } => Some(gateway_url),
            Self::Failed { .. } => None,
        }
    }

    /// Error detail, present only on failure.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Uploaded { .. } => None,
            Self::Failed { error, .. } => Some(error),
        }
    }
}

#[derive(Serialize)]
struct UploadResultRecord<'a> {
    success: bool,
    sequence: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    cid: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gateway_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stage: Option<FailureStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl Serialize for UploadResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let stage = match self {
            Self::Failed { stage, .. } => Some(*stage),
            Self::Uploaded { .. } => None,
        };
        UploadResultRecord {
            success: self.is_success(),
            sequence: self.sequence(),
            cid: self.cid(),
            gateway_url: self.gateway_url(),
            stage,
            error: self.error(),
        }
        .serialize(serializer)
    }
}
