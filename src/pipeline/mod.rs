//! Batch generate-and-upload pipeline.

mod batch;
mod outcome;
mod report;
mod sleeper;
mod variations;

pub use batch::{BatchPipeline, DEFAULT_BASE_PROMPT, DEFAULT_COUNT, DEFAULT_DELAY};
pub use outcome::{FailureStage, UploadResult};
pub use report::BatchReport;
pub use sleeper::{Sleeper, TokioSleeper};
pub use variations::{PromptVariations, BUILTIN_VARIATIONS};
