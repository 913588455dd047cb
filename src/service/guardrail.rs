//! Input URL normalization and rejection
//!
//! Runs before any fetch or judge work. The loopback check is a plain
//! substring match over the whole lowercased URL, so path and query
//! components can trigger it too.

use crate::model::{GuardrailConfig, NormalizedUrl};
use crate::service::error::GuardrailError;

/// Minimum accepted URL length, in characters, after trimming
pub const MIN_URL_LENGTH: usize = 8;

const LOOPBACK_MARKERS: &[&str] = &["localhost", "127.0.0.1", "0.0.0.0"];

/// Strip surrounding whitespace. Nothing else is rewritten.
pub fn normalize_url(raw: &str) -> &str {
    raw.trim()
}

/// Case-sensitive http(s) prefix check shared by guardrail, extractor and validator
pub fn has_http_scheme(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Normalize and check a raw URL with only the built-in rules
pub fn normalize_and_check(raw: &str) -> Result<NormalizedUrl, GuardrailError> {
    normalize_and_check_with(raw, &GuardrailConfig::default())
}

/// Normalize and check a raw URL, also rejecting configured deny terms
pub fn normalize_and_check_with(
    raw: &str,
    config: &GuardrailConfig,
) -> Result<NormalizedUrl, GuardrailError> {
    let url = normalize_url(raw);

    if url.chars().count() < MIN_URL_LENGTH {
        return Err(GuardrailError::TooShort);
    }

    if !has_http_scheme(url) {
        return Err(GuardrailError::UnsupportedScheme);
    }

    let lowered = url.to_lowercase();
    if LOOPBACK_MARKERS.iter().any(|m| lowered.contains(m)) {
        return Err(GuardrailError::Loopback);
    }

    if let Some(term) = config.denied_term(&lowered) {
        return Err(GuardrailError::DeniedTerm(term.to_string()));
    }

    Ok(NormalizedUrl::new_unchecked(url.to_string()))
}
