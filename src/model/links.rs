//! Candidate link set extracted from a page

use serde::Serialize;

use super::NormalizedUrl;

/// Maximum number of candidate links carried into a prompt.
pub const MAX_CANDIDATE_LINKS: usize = 12;

/// Ordered, de-duplicated absolute http(s) links in first-occurrence order.
///
/// Built once per request by `service::links::extract_links`. The same
/// instance feeds both the prompt and the source allow-list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CandidateLinks(Vec<String>);

impl CandidateLinks {
    pub(crate) fn from_vec(links: Vec<String>) -> Self {
        Self(links)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Allow-set membership: exact string equality against the links or the input URL.
    pub fn allows(&self, url: &str, input_url: &NormalizedUrl) -> bool {
        url == input_url.as_str() || self.0.iter().any(|l| l == url)
    }
}
