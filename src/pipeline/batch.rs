//! Sequential generate-then-upload batch.

use crate::image::{AspectRatio, GenerationRequest, ImageProvider};
use crate::pin::{Gateway, PinProvider};
use crate::pipeline::outcome::{FailureStage, UploadResult};
use crate::pipeline::report::BatchReport;
use crate::pipeline::sleeper::{Sleeper, TokioSleeper};
use crate::pipeline::variations::PromptVariations;
use std::time::Duration;

/// Pause between consecutive requests.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

/// Base prompt used when none is given.
pub const DEFAULT_BASE_PROMPT: &str = "A majestic dragon soaring through the clouds";

/// Number of images generated when no count is given.
pub const DEFAULT_COUNT: u32 = 5;

static TOKIO_SLEEPER: TokioSleeper = TokioSleeper;

/// Drives N generate-then-upload cycles one after another.
///
/// A failing item never stops the batch: each request yields exactly one
/// [`UploadResult`], and the report keeps request order.
pub struct BatchPipeline<'a> {
    generator: &'a dyn ImageProvider,
    pinner: &'a dyn PinProvider,
    gateway: Gateway,
    variations: PromptVariations,
    aspect_ratio: AspectRatio,
    delay: Duration,
    sleeper: &'a dyn Sleeper,
}

impl<'a> BatchPipeline<'a> {
    /// Creates a pipeline with the built-in variations, a square aspect ratio and a 2 s pause.
    pub fn new(
        generator: &'a dyn ImageProvider,
        pinner: &'a dyn PinProvider,
        gateway: Gateway,
    ) -> Self {
        Self {
            generator,
            pinner,
            gateway,
            variations: PromptVariations::builtin(),
            aspect_ratio: AspectRatio::Square,
            delay: DEFAULT_DELAY,
            sleeper: &TOKIO_SLEEPER,
        }
    }

    /// Replaces the style variations.
    pub fn with_variations(mut self, variations: PromptVariations) -> Self {
        self.variations = variations;
        self
    }

    /// Sets the aspect ratio sent with every request.
    pub fn with_aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.aspect_ratio = ratio;
        self
    }

    /// Sets the pause between requests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Replaces the wait implementation.
    pub fn with_sleeper(mut self, sleeper: &'a dyn Sleeper) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Runs `count` cycles for `base_prompt` and returns every outcome in request order.
    pub async fn run(&self, base_prompt: &str, count: u32) -> BatchReport {
        tracing::info!(count, base_prompt, "starting batch generation");

        let mut results = Vec::new();
        for index in 0..count {
            let sequence = index + 1;
            let prompt = self.variations.prompt_for(base_prompt, index as usize);
            tracing::info!(sequence, prompt = %prompt, "prompt for image");

            let request = GenerationRequest::new(prompt)
                .with_sequence(sequence)
                .with_aspect_ratio(self.aspect_ratio);
            results.push(self.process(&request).await);

            if sequence < count {
                tracing::info!(
                    delay = ?self.delay,
                    "waiting before next generation"
                );
                self.sleeper.sleep(self.delay).await;
            }
        }

        let report = BatchReport::new(base_prompt, results);
        tracing::info!(
            succeeded = report.success_count(),
            total = report.total(),
            "batch finished"
        );
        report
    }

    async fn process(&self, request: &GenerationRequest) -> UploadResult {
        let sequence = request.sequence;

        tracing::info!(sequence, provider = self.generator.name(), "generating image");
        let image = match self.generator.generate(request).await {
            Ok(image) => image,
            Err(e) => {
                tracing::error!(sequence, error = %e, "image generation failed");
                return UploadResult::failed(sequence, FailureStage::Generation, &e);
            }
        };

        tracing::info!(
            sequence,
            bytes = image.size(),
            provider = self.pinner.name(),
            "image generated, uploading"
        );
        match self.pinner.upload(image.into_bytes(), sequence).await {
            Ok(pinned) => {
                let gateway_url = self.gateway.url(&pinned.cid);
                tracing::info!(sequence, cid = %pinned.cid, url = %gateway_url, "upload successful");
                UploadResult::Uploaded {
                    sequence,
                    cid: pinned.cid,
                    gateway_url,
                }
            }
            Err(e) => {
                tracing::error!(sequence, error = %e, "upload failed");
                UploadResult::failed(sequence, FailureStage::Upload, &e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GenPinError, Result};
    use crate::image::{GeneratedImage, GenerationMetadata, ImageFormat};
    use crate::pin::PinnedFile;
    use crate::pipeline::variations::BUILTIN_VARIATIONS;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const PNG: [u8; 12] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];

    #[derive(Default)]
    struct FakeGenerator {
        requests: Mutex<Vec<GenerationRequest>>,
        failures: Mutex<HashMap<u32, GenPinError>>,
    }

    impl FakeGenerator {
        fn failing_at(sequence: u32, error: GenPinError) -> Self {
            let fake = Self::default();
            fake.failures.lock().unwrap().insert(sequence, error);
            fake
        }

        fn prompts(&self) -> Vec<String> {
            let requests = self.requests.lock().unwrap();
            requests.iter().map(|r| r.prompt.clone()).collect()
        }
    }

    #[async_trait]
    impl ImageProvider for FakeGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage> {
            self.requests.lock().unwrap().push(request.clone());
            if let Some(err) = self.failures.lock().unwrap().remove(&request.sequence) {
                return Err(err);
            }
            Ok(GeneratedImage::new(
                PNG.to_vec(),
                ImageFormat::Png,
                GenerationMetadata::default(),
            ))
        }

        fn name(&self) -> &str {
            "fake generator"
        }

        async fn health_check(&self) -> Result<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakePinner {
        uploads: Mutex<Vec<u32>>,
        failures: Mutex<HashMap<u32, GenPinError>>,
    }

    impl FakePinner {
        fn uploaded_sequences(&self) -> Vec<u32> {
            self.uploads.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PinProvider for FakePinner {
        async fn upload(&self, data: Vec<u8>, sequence: u32) -> Result<PinnedFile> {
            assert_eq!(data, PNG.to_vec());
            self.uploads.lock().unwrap().push(sequence);
            if let Some(err) = self.failures.lock().unwrap().remove(&sequence) {
                return Err(err);
            }
            Ok(PinnedFile {
                cid: format!("bafyfake{sequence}"),
                name: crate::pin::upload_file_name(sequence),
                size: Some(data.len() as u64),
            })
        }

        fn name(&self) -> &str {
            "fake pinner"
        }

        async fn health_check(&self) -> Result<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSleeper {
        naps: Mutex<Vec<Duration>>,
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.naps.lock().unwrap().push(duration);
        }
    }

    fn gateway() -> Gateway {
        Gateway::new("gw.example", "tok").unwrap()
    }

    fn assert_gateway_url(result: &UploadResult) {
        let cid = result.cid().unwrap();
        assert_eq!(
            result.gateway_url().unwrap(),
            format!("https://gw.example/ipfs/{cid}?pinataGatewayToken=tok")
        );
    }

    #[tokio::test]
    async fn test_two_dragons_succeed() {
        let generator = FakeGenerator::default();
        let pinner = FakePinner::default();
        let sleeper = RecordingSleeper::default();

        let report = BatchPipeline::new(&generator, &pinner, gateway())
            .with_sleeper(&sleeper)
            .run("A dragon", 2)
            .await;

        assert_eq!(
            generator.prompts(),
            vec![
                "A dragon, with vibrant neon colors and a cyberpunk aesthetic",
                "A dragon, in a minimalist style with pastel colors and soft lighting",
            ]
        );
        assert_eq!(report.success_count(), 2);
        assert!(report.to_string().contains("2/2"));
        for (i, result) in report.results.iter().enumerate() {
            assert_eq!(result.sequence(), i as u32 + 1);
            assert_gateway_url(result);
        }
        assert_eq!(*sleeper.naps.lock().unwrap(), vec![DEFAULT_DELAY]);
    }

    #[tokio::test]
    async fn test_generation_failure_skips_upload() {
        let generator = FakeGenerator::failing_at(2, GenPinError::NoCandidates);
        let pinner = FakePinner::default();
        let sleeper = RecordingSleeper::default();

        let report = BatchPipeline::new(&generator, &pinner, gateway())
            .with_sleeper(&sleeper)
            .run("A dragon", 3)
            .await;

        assert_eq!(report.total(), 3);
        assert_eq!(report.success_count(), 2);
        assert!(report.to_string().contains("2/3"));

        let failures: Vec<&UploadResult> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(
            failures[0],
            &UploadResult::Failed {
                sequence: 2,
                stage: FailureStage::Generation,
                error: "No candidates returned".into(),
            }
        );
        assert_eq!(pinner.uploaded_sequences(), vec![1, 3]);
        assert_eq!(sleeper.naps.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_upload_failure_is_recorded() {
        let generator = FakeGenerator::default();
        let pinner = FakePinner::default();
        pinner.failures.lock().unwrap().insert(
            1,
            GenPinError::Auth("invalid JWT".into()),
        );
        let sleeper = RecordingSleeper::default();

        let report = BatchPipeline::new(&generator, &pinner, gateway())
            .with_sleeper(&sleeper)
            .run("A dragon", 2)
            .await;

        assert_eq!(
            report.results[0],
            UploadResult::Failed {
                sequence: 1,
                stage: FailureStage::Upload,
                error: "authentication failed: invalid JWT".into(),
            }
        );
        assert!(report.results[1].is_success());
        assert_eq!(pinner.uploaded_sequences(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_zero_count() {
        let generator = FakeGenerator::default();
        let pinner = FakePinner::default();
        let sleeper = RecordingSleeper::default();

        let report = BatchPipeline::new(&generator, &pinner, gateway())
            .with_sleeper(&sleeper)
            .run("A dragon", 0)
            .await;

        assert!(report.results.is_empty());
        assert!(report.to_string().contains("0/0"));
        assert!(generator.prompts().is_empty());
        assert!(sleeper.naps.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_result_count_and_order_for_any_size() {
        for count in 0..12u32 {
            let generator = FakeGenerator::default();
            let pinner = FakePinner::default();
            let sleeper = RecordingSleeper::default();

            let report = BatchPipeline::new(&generator, &pinner, gateway())
                .with_sleeper(&sleeper)
                .with_delay(Duration::ZERO)
                .run("A cat", count)
                .await;

            let sequences: Vec<u32> = report.results.iter().map(|r| r.sequence()).collect();
            assert_eq!(sequences, (1..=count).collect::<Vec<_>>());
            assert_eq!(
                sleeper.naps.lock().unwrap().len(),
                count.saturating_sub(1) as usize
            );

            for (i, prompt) in generator.prompts().iter().enumerate() {
                assert_eq!(prompt, &format!("A cat, {}", BUILTIN_VARIATIONS[i % 5]));
            }
        }
    }

    #[tokio::test]
    async fn test_every_request_uses_configured_aspect_ratio() {
        let generator = FakeGenerator::default();
        let pinner = FakePinner::default();
        let sleeper = RecordingSleeper::default();

        BatchPipeline::new(&generator, &pinner, gateway())
            .with_sleeper(&sleeper)
            .run("A cat", 2)
            .await;
        assert!(generator
            .requests
            .lock()
            .unwrap()
            .iter()
            .all(|r| r.aspect_ratio == AspectRatio::Square));
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_sleeper_waits_between_requests() {
        let generator = FakeGenerator::default();
        let pinner = FakePinner::default();

        let start = tokio::time::Instant::now();
        let report = BatchPipeline::new(&generator, &pinner, gateway())
            .run("A dragon", 3)
            .await;

        assert_eq!(report.total(), 3);
        assert!(start.elapsed() >= 2 * DEFAULT_DELAY);
    }
}
