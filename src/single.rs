//! One-shot generation to a local file.

use crate::error::Result;
use crate::image::{GeneratedImage, GenerationRequest, ImageProvider};
use std::path::Path;

/// File written when no output path is given.
pub const DEFAULT_OUTPUT_FILE: &str = "nano_banana_image.png";

/// Prompt used when none is given.
pub const DEFAULT_PROMPT: &str = "A fantasy-style illustration of a golden banana, with magical \
                                  glowing runes, floating above a dark forest at twilight";

/// Generates one image and writes it to `path`.
///
/// Nothing is written unless the provider returns decoded image bytes.
pub async fn generate_to_file(
    provider: &dyn ImageProvider,
    request: &GenerationRequest,
    path: impl AsRef<Path>,
) -> Result<GeneratedImage> {
    let path = path.as_ref();
    let image = provider.generate(request).await?;
    image.save(path)?;
    tracing::info!(path = %path.display(), bytes = image.size(), "image saved");
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenPinError;
    use crate::image::{GenerationMetadata, ImageFormat};
    use async_trait::async_trait;

    struct StaticProvider(Option<Vec<u8>>);

    #[async_trait]
    impl ImageProvider for StaticProvider {
        async fn generate(&self, _request: &GenerationRequest) -> Result<GeneratedImage> {
            match &self.0 {
                Some(data) => Ok(GeneratedImage::new(
                    data.clone(),
                    ImageFormat::Png,
                    GenerationMetadata::default(),
                )),
                None => Err(GenPinError::NoImageData),
            }
        }

        fn name(&self) -> &str {
            "static"
        }

        async fn health_check(&self) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_writes_file_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_OUTPUT_FILE);
        let provider = StaticProvider(Some(vec![1, 2, 3]));

        let image = generate_to_file(&provider, &GenerationRequest::new(DEFAULT_PROMPT), &path)
            .await
            .unwrap();
        assert_eq!(image.size(), 3);
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_no_file_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_OUTPUT_FILE);
        let provider = StaticProvider(None);

        let err = generate_to_file(&provider, &GenerationRequest::new("A banana"), &path)
            .await
            .unwrap_err();
        assert!(matches!(err, GenPinError::NoImageData));
        assert!(!path.exists());
    }
}
