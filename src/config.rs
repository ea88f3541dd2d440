//! Environment-backed configuration lookups.

/// Pinata JWT, newest name first.
pub const PINATA_JWT_ENV_VARS: [&str; 2] = ["PINATA_JWT", "NEXT_PUBLIC_PINATA_JWT"];

/// Pinata gateway host.
pub const PINATA_GATEWAY_ENV_VARS: [&str; 2] = ["PINATA_GATEWAY", "NEXT_PUBLIC_PINATA_GATEWAY"];

/// Pinata gateway access token.
pub const PINATA_GATEWAY_TOKEN_ENV_VARS: [&str; 2] =
    ["PINATA_GATEWAY_TOKEN", "NEXT_PUBLIC_PINATA_GATEWAY_TOKEN"];

/// Returns the first of `names` that is set to a non-blank value.
pub(crate) fn env_lookup(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

/// Keeps an explicit value when it is non-blank, otherwise consults the environment.
pub(crate) fn explicit_or_env(explicit: Option<String>, names: &[&str]) -> Option<String> {
    explicit
        .filter(|value| !value.trim().is_empty())
        .or_else(|| env_lookup(names))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_value_wins() {
        let value = explicit_or_env(Some("jwt".into()), &["GENPIN_TEST_UNSET_VAR"]);
        assert_eq!(value.as_deref(), Some("jwt"));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        assert_eq!(explicit_or_env(Some("  ".into()), &["GENPIN_TEST_UNSET_VAR"]), None);
        assert_eq!(env_lookup(&["GENPIN_TEST_UNSET_VAR"]), None);
    }
}
