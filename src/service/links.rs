//! Candidate link extraction from raw HTML
//!
//! Literal and reproducible: no URL parsing, no scheme or host casing
//! normalization, no trailing-slash handling. Any party replaying the same
//! HTML gets the same list.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{CandidateLinks, MAX_CANDIDATE_LINKS};
use crate::service::guardrail::has_http_scheme;

/// `href="..."` or `href='...'`, attribute name case-insensitive, value up to the matching quote
static HREF_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i:href)=(?:"([^"]*)"|'([^']*)')"#).expect("href pattern is valid")
});

/// Extract absolute http(s) links in first-occurrence order, de-duplicated,
/// capped at [`MAX_CANDIDATE_LINKS`].
pub fn extract_links(html: &str) -> CandidateLinks {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for caps in HREF_PATTERN.captures_iter(html) {
        let Some(value) = caps.get(1).or_else(|| caps.get(2)) else {
            continue;
        };

        let href = value.as_str().trim();

        // keep only absolute http(s)
        if !has_http_scheme(href) {
            continue;
        }

        if !seen.insert(href) {
            continue;
        }

        out.push(href.to_string());
        if out.len() == MAX_CANDIDATE_LINKS {
            break;
        }
    }

    CandidateLinks::from_vec(out)
}
