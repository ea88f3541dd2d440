//! Style variations appended to a base prompt.

use crate::error::{GenPinError, Result};

/// Built-in style suffixes, applied in order and wrapped around.
pub const BUILTIN_VARIATIONS: [&str; 5] = [
    "with vibrant neon colors and a cyberpunk aesthetic",
    "in a minimalist style with pastel colors and soft lighting",
    "with dramatic dark tones and intense contrast, mysterious atmosphere",
    "in a whimsical cartoon style with bright cheerful colors",
    "with realistic photographic detail and natural lighting",
];

/// An ordered, non-empty list of style suffixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptVariations {
    variants: Vec<String>,
}

impl Default for PromptVariations {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PromptVariations {
    /// The five built-in variations.
    pub fn builtin() -> Self {
        Self {
            variants: BUILTIN_VARIATIONS.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Uses a custom list of suffixes. The list must not be empty.
    pub fn new<I, S>(variants: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let variants: Vec<String> = variants.into_iter().map(Into::into).collect();
        if variants.is_empty() {
            return Err(GenPinError::InvalidRequest(
                "at least one prompt variation is required".into(),
            ));
        }
        Ok(Self { variants })
    }

    /// Number of distinct variations.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Always false; construction rejects empty lists.
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Suffix for the 0-based request index.
    pub fn variant(&self, index: usize) -> &str {
        &self.variants[index % self.variants.len()]
    }

    /// Full prompt for the 0-based request index.
    pub fn prompt_for(&self, base: &str, index: usize) -> String {
        format!("{}, {}", base, self.variant(index))
    }

    /// The first `count` prompts derived from `base`.
    pub fn prompts(&self, base: &str, count: usize) -> Vec<String> {
        (0..count).map(|i| self.prompt_for(base, i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dragon_prompts() {
        let prompts = PromptVariations::builtin().prompts("A dragon", 2);
        assert_eq!(
            prompts,
            vec![
                "A dragon, with vibrant neon colors and a cyberpunk aesthetic",
                "A dragon, in a minimalist style with pastel colors and soft lighting",
            ]
        );
    }

    #[test]
    fn test_zero_count_is_empty() {
        assert!(PromptVariations::builtin().prompts("A dragon", 0).is_empty());
    }

    #[test]
    fn test_variant_wraps_around() {
        let variations = PromptVariations::builtin();
        for i in 0..23 {
            assert_eq!(variations.variant(i), BUILTIN_VARIATIONS[i % 5]);
        }
        assert_eq!(
            variations.prompt_for("A cat", 5),
            "A cat, with vibrant neon colors and a cyberpunk aesthetic"
        );
    }

    #[test]
    fn test_custom_variations() {
        let variations = PromptVariations::new(["in oil", "in ink"]).unwrap();
        assert_eq!(variations.len(), 2);
        assert_eq!(variations.prompts("A fox", 3), vec!["A fox, in oil", "A fox, in ink", "A fox, in oil"]);

        let empty: [&str; 0] = [];
        assert!(matches!(
            PromptVariations::new(empty),
            Err(GenPinError::InvalidRequest(_))
        ));
    }
}
