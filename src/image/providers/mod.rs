//! Image generation providers.

mod gemini;

pub use gemini::{GeminiProvider, GeminiProviderBuilder, API_KEY_ENV_VARS, GEMINI_IMAGE_MODEL};
