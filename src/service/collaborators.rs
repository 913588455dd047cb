//! Host collaborator contracts
//!
//! Page fetching, the consensus judge and storage belong to the host. The
//! service only depends on these traits.

use async_trait::async_trait;

use crate::model::{LastVerification, NormalizedUrl};
use crate::service::error::CollaboratorError;

/// Representation requested from the page fetcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchMode {
    Text,
    Html,
}

impl FetchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchMode::Text => "text",
            FetchMode::Html => "html",
        }
    }
}

/// Fetches page content. The host guarantees every party sees the same
/// content for the same URL within one verification round.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(
        &self,
        url: &NormalizedUrl,
        mode: FetchMode,
    ) -> Result<String, CollaboratorError>;
}

/// Produces model output already accepted by the host's agreement round.
/// The returned string is untrusted until validated.
#[async_trait]
pub trait ConsensusJudge: Send + Sync {
    async fn judge(
        &self,
        prompt: &str,
        task: &str,
        criteria: &str,
    ) -> Result<String, CollaboratorError>;
}

/// Storage handle keyed by normalized URL, values are canonical records
pub trait ResultStore: Send + Sync {
    fn get(&self, url: &NormalizedUrl) -> Option<String>;

    /// Store a canonical record and remember it as the last verification
    fn set(&self, url: &NormalizedUrl, canonical: String);

    fn last(&self) -> LastVerification;
}
