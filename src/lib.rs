//! Fact-check pipeline core
//!
//! Turns an untrusted judge payload into a schema-valid canonical record and
//! extracts a bounded candidate link set from raw HTML. Page fetching, the
//! consensus judge and persistent storage are host collaborators, see
//! [`service::collaborators`].

pub mod model;
pub mod service;

pub use model::{
    CandidateLinks, Config, GuardrailConfig, LastVerification, NormalizedUrl, SourceCitation,
    Verdict, VerdictRecord,
};
pub use service::{
    CollaboratorError, FactCheckService, GuardrailError, InMemoryResultStore, ValidationError,
    VerifyError, build_prompt, extract_links, normalize_and_check, validate,
};
