//! Pin provider trait.

use crate::error::Result;
use crate::pin::types::PinnedFile;
use async_trait::async_trait;

/// Trait for content-addressed pinning services.
#[async_trait]
pub trait PinProvider: Send + Sync {
    /// Uploads image bytes as `generated-image-<sequence>.png` and returns the pinned file.
    async fn upload(&self, data: Vec<u8>, sequence: u32) -> Result<PinnedFile>;

    /// Returns the name of this provider for display.
    fn name(&self) -> &str;

    /// Checks if the service is reachable and the credentials are accepted.
    async fn health_check(&self) -> Result<()>;
}
