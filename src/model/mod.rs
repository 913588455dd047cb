pub mod config;
pub mod input_url;
pub mod links;
pub mod verdict;

pub use config::{Config, GuardrailConfig};
pub use input_url::NormalizedUrl;
pub use links::{CandidateLinks, MAX_CANDIDATE_LINKS};
pub use verdict::{LastVerification, SourceCitation, Verdict, VerdictRecord};
