#![warn(missing_docs)]
//! GenPin - generate images with Gemini and pin them to IPFS through Pinata.
//!
//! # Quick Start - One image
//!
//! ```no_run
//! use genpin::{GeminiProvider, GenerationRequest};
//!
//! #[tokio::main]
//! async fn main() -> genpin::Result<()> {
//!     let provider = GeminiProvider::builder().build()?;
//!     let request = GenerationRequest::new("A golden banana with glowing runes");
//!     genpin::single::generate_to_file(&provider, &request, "nano_banana_image.png").await?;
//!     Ok(())
//! }
//! ```
//!
//! # Quick Start - Batch upload
//!
//! ```no_run
//! use genpin::{BatchPipeline, GeminiProvider, Gateway, PinataProvider};
//!
//! #[tokio::main]
//! async fn main() -> genpin::Result<()> {
//!     let generator = GeminiProvider::builder().build()?;
//!     let pinner = PinataProvider::builder().build()?;
//!     let gateway = Gateway::resolve(None, None)?;
//!
//!     let report = BatchPipeline::new(&generator, &pinner, gateway)
//!         .run("A majestic dragon soaring through the clouds", 5)
//!         .await;
//!     println!("{report}");
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! Builders take explicit values and fall back to the environment:
//! `GEMINI_API_KEY` (or `GOOGLE_API_KEY`), `PINATA_JWT`, `PINATA_GATEWAY`
//! and `PINATA_GATEWAY_TOKEN`. Missing values fail at build time.

pub mod config;
mod error;
pub mod image;
pub mod pin;
pub mod pipeline;
pub mod single;

// Re-export error types at crate root
pub use error::{GenPinError, Result};

pub use image::providers::{GeminiProvider, GeminiProviderBuilder, GEMINI_IMAGE_MODEL};
pub use image::{
    AspectRatio, GeneratedImage, GenerationMetadata, GenerationRequest, ImageFormat, ImageProvider,
};

pub use pin::providers::{PinataProvider, PinataProviderBuilder};
pub use pin::{Gateway, PinProvider, PinnedFile};

pub use pipeline::{
    BatchPipeline, BatchReport, FailureStage, PromptVariations, Sleeper, TokioSleeper,
    UploadResult,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{GenPinError, Result};
    pub use crate::image::providers::GeminiProvider;
    pub use crate::image::{GeneratedImage, GenerationRequest, ImageProvider};
    pub use crate::pin::providers::PinataProvider;
    pub use crate::pin::{Gateway, PinProvider};
    pub use crate::pipeline::{BatchPipeline, BatchReport, UploadResult};
}
