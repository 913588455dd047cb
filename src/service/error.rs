//! Error types for URL guardrails, verdict validation and verification

use thiserror::Error;

/// Input URL rejected by the guardrail (the caller's input is at fault)
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum GuardrailError {
    #[error("URL too short")]
    TooShort,

    #[error("URL must start with http:// or https://")]
    UnsupportedScheme,

    #[error("Localhost URLs are not allowed")]
    Loopback,

    #[error("URL contains denied term: {0}")]
    DeniedTerm(String),
}

/// Judge output rejected by the schema or the source allow-list
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("not valid JSON: {0}")]
    NotJson(#[from] serde_json::Error),

    #[error("not a JSON object")]
    NotAnObject,

    #[error("missing key: {0}")]
    MissingKey(&'static str),

    #[error("invalid verdict")]
    InvalidVerdict,

    #[error("invalid explanation")]
    InvalidExplanation,

    #[error("invalid sources array")]
    InvalidSourcesArray,

    #[error("source {index} must be an object")]
    SourceNotObject { index: usize },

    #[error("source {index} missing field: {field}")]
    SourceMissingField { index: usize, field: &'static str },

    #[error("source {index} url must be http(s)")]
    SourceUrlScheme { index: usize },

    #[error("source {index} note must be a string")]
    SourceNoteNotString { index: usize },

    #[error("source {index} url not in candidate links (or input url): {url}")]
    SourceNotAllowed { index: usize, url: String },

    #[error("invalid key_claims")]
    InvalidKeyClaims,

    #[error("invalid key_claims: claim {index} must be a non-empty string of at most 240 characters")]
    InvalidClaim { index: usize },

    #[error("failed to serialize canonical record: {0}")]
    Canonicalize(serde_json::Error),
}

/// Failure reported by a host collaborator. Passed through, never retried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CollaboratorError {
    #[error("page fetch failed: {0}")]
    Fetch(String),

    #[error("judge call failed: {0}")]
    Judge(String),
}

/// Error type for a verification request
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VerifyError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] GuardrailError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

impl VerifyError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, VerifyError::InvalidInput(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, VerifyError::Validation(_))
    }
}
