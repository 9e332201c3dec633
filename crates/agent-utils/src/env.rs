//! Environment variable helpers

/// Read an API key from the environment
///
/// Unset, blank, and placeholder values (`YOUR_API_KEY` and the like) all
/// read as `None`: a missing key means the feature is unavailable, not that
/// startup failed.
pub fn read_key(name: &str) -> Option<String> {
    normalize_key(std::env::var(name).ok())
}

/// Apply the [`read_key`] rules to a raw value
pub fn normalize_key(raw: Option<String>) -> Option<String> {
    let value = raw?.trim().to_string();
    if value.is_empty() || is_placeholder(&value) {
        return None;
    }
    Some(value)
}

fn is_placeholder(value: &str) -> bool {
    value.to_ascii_uppercase().starts_with("YOUR_")
}
