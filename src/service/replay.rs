//! Offline replay of a recorded verification round
//!
//! A bundle holds the URL plus the collaborator outputs observed during a
//! round. Replaying it runs the real pipeline against those outputs, so
//! independent parties can check they derive the same canonical record.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::NormalizedUrl;
use crate::service::collaborators::{ConsensusJudge, FetchMode, PageFetcher};
use crate::service::error::CollaboratorError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ReplayError {
    #[error("Failed to read replay bundle: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse replay bundle: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Recorded inputs of one verification round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayBundle {
    /// URL as submitted, before normalization
    pub url: String,
    /// Page content fetched in text mode
    #[serde(default)]
    pub text: String,
    /// Page content fetched in html mode
    #[serde(default)]
    pub html: String,
    /// Raw judge output
    pub payload: String,
}

impl ReplayBundle {
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Collaborators serving this bundle's recorded outputs
    pub fn collaborators(&self) -> (ReplayFetcher, ReplayJudge) {
        (
            ReplayFetcher {
                url: self.url.trim().to_string(),
                text: self.text.clone(),
                html: self.html.clone(),
            },
            ReplayJudge {
                payload: self.payload.clone(),
            },
        )
    }
}

/// Serves recorded page content for the recorded URL only
#[derive(Debug, Clone)]
pub struct ReplayFetcher {
    url: String,
    text: String,
    html: String,
}

#[async_trait]
impl PageFetcher for ReplayFetcher {
    async fn fetch(
        &self,
        url: &NormalizedUrl,
        mode: FetchMode,
    ) -> Result<String, CollaboratorError> {
        if url.as_str() != self.url {
            return Err(CollaboratorError::Fetch(format!(
                "no recorded {} content for {}",
                mode.as_str(),
                url
            )));
        }
        Ok(match mode {
            FetchMode::Text => self.text.clone(),
            FetchMode::Html => self.html.clone(),
        })
    }
}

/// Returns the recorded judge output regardless of prompt
#[derive(Debug, Clone)]
pub struct ReplayJudge {
    payload: String,
}

#[async_trait]
impl ConsensusJudge for ReplayJudge {
    async fn judge(
        &self,
        _prompt: &str,
        _task: &str,
        _criteria: &str,
    ) -> Result<String, CollaboratorError> {
        Ok(self.payload.clone())
    }
}
