//! Strict validation of judge output
//!
//! The raw payload is parsed into a generic JSON tree and every rule is an
//! explicit gate. The first failing gate aborts; no partial record exists.
//! On success the parsed tree (not the raw bytes) is re-serialized in a
//! canonical form so independent replays store byte-identical values.

use serde_json::{Map, Value};

use crate::model::{CandidateLinks, NormalizedUrl, SourceCitation, Verdict, VerdictRecord};
use crate::service::error::ValidationError;
use crate::service::guardrail::has_http_scheme;

pub const KEY_VERDICT: &str = "verdict";
pub const KEY_EXPLANATION: &str = "explanation";
pub const KEY_SOURCES: &str = "sources";
pub const KEY_KEY_CLAIMS: &str = "key_claims";

const REQUIRED_KEYS: [&str; 4] = [KEY_VERDICT, KEY_EXPLANATION, KEY_SOURCES, KEY_KEY_CLAIMS];

/// Maximum explanation length in characters
pub const MAX_EXPLANATION_CHARS: usize = 1200;
/// Maximum number of cited sources
pub const MAX_SOURCES: usize = 5;
/// Maximum number of key claims
pub const MAX_KEY_CLAIMS: usize = 5;
/// Maximum length of a single key claim in characters
pub const MAX_CLAIM_CHARS: usize = 240;

/// Validate a raw judge payload against the verdict schema and the source allow-list.
///
/// Allow-list = `candidate_links` plus `input_url`, compared by exact string equality.
pub fn validate(
    raw_payload: &str,
    input_url: &NormalizedUrl,
    candidate_links: &CandidateLinks,
) -> Result<VerdictRecord, ValidationError> {
    let parsed: Value = serde_json::from_str(raw_payload)?;

    let obj = parsed.as_object().ok_or(ValidationError::NotAnObject)?;

    for key in REQUIRED_KEYS {
        if !obj.contains_key(key) {
            return Err(ValidationError::MissingKey(key));
        }
    }

    let verdict = validate_verdict(&obj[KEY_VERDICT])?;
    let explanation = validate_explanation(&obj[KEY_EXPLANATION])?;
    let sources = validate_sources(&obj[KEY_SOURCES], input_url, candidate_links)?;
    let key_claims = validate_key_claims(&obj[KEY_KEY_CLAIMS])?;

    let canonical = to_canonical_string(&parsed)?;

    Ok(VerdictRecord {
        verdict,
        explanation,
        sources,
        key_claims,
        canonical,
    })
}

fn validate_verdict(value: &Value) -> Result<Verdict, ValidationError> {
    value
        .as_str()
        .and_then(Verdict::from_literal)
        .ok_or(ValidationError::InvalidVerdict)
}

fn validate_explanation(value: &Value) -> Result<String, ValidationError> {
    match value.as_str() {
        Some(s) if (1..=MAX_EXPLANATION_CHARS).contains(&s.chars().count()) => Ok(s.to_string()),
        _ => Err(ValidationError::InvalidExplanation),
    }
}

fn validate_sources(
    value: &Value,
    input_url: &NormalizedUrl,
    candidate_links: &CandidateLinks,
) -> Result<Vec<SourceCitation>, ValidationError> {
    let items = match value.as_array() {
        Some(items) if items.len() <= MAX_SOURCES => items,
        _ => return Err(ValidationError::InvalidSourcesArray),
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| validate_source(index, item, input_url, candidate_links))
        .collect()
}

fn validate_source(
    index: usize,
    item: &Value,
    input_url: &NormalizedUrl,
    candidate_links: &CandidateLinks,
) -> Result<SourceCitation, ValidationError> {
    let source = item
        .as_object()
        .ok_or(ValidationError::SourceNotObject { index })?;

    let url = required_field(source, index, "url")?;
    let note = required_field(source, index, "note")?;

    let url = match url.as_str() {
        Some(u) if has_http_scheme(u) => u,
        _ => return Err(ValidationError::SourceUrlScheme { index }),
    };

    if !candidate_links.allows(url, input_url) {
        return Err(ValidationError::SourceNotAllowed {
            index,
            url: url.to_string(),
        });
    }

    let note = note
        .as_str()
        .ok_or(ValidationError::SourceNoteNotString { index })?;

    Ok(SourceCitation {
        url: url.to_string(),
        note: note.to_string(),
    })
}

fn required_field<'a>(
    source: &'a Map<String, Value>,
    index: usize,
    field: &'static str,
) -> Result<&'a Value, ValidationError> {
    source
        .get(field)
        .ok_or(ValidationError::SourceMissingField { index, field })
}

fn validate_key_claims(value: &Value) -> Result<Vec<String>, ValidationError> {
    let items = match value.as_array() {
        Some(items) if items.len() <= MAX_KEY_CLAIMS => items,
        _ => return Err(ValidationError::InvalidKeyClaims),
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item.as_str() {
            Some(s) if (1..=MAX_CLAIM_CHARS).contains(&s.chars().count()) => Ok(s.to_string()),
            _ => Err(ValidationError::InvalidClaim { index }),
        })
        .collect()
}

/// Minified JSON with object keys sorted at every depth and non-ASCII kept literal.
///
/// Unknown top-level or nested keys survive; only their order is fixed.
pub fn to_canonical_string(value: &Value) -> Result<String, ValidationError> {
    serde_json::to_string(&sort_keys(value)).map_err(ValidationError::Canonicalize)
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_keys(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}
