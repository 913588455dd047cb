pub mod collaborators;
pub mod error;
pub mod guardrail;
pub mod links;
pub mod prompts;
pub mod replay;
pub mod store;
pub mod validation;
pub mod verification;

pub use collaborators::{ConsensusJudge, FetchMode, PageFetcher, ResultStore};
pub use error::{CollaboratorError, GuardrailError, ValidationError, VerifyError};
pub use guardrail::{normalize_and_check, normalize_and_check_with};
pub use links::extract_links;
pub use prompts::build_prompt;
pub use replay::{ReplayBundle, ReplayError};
pub use store::InMemoryResultStore;
pub use validation::validate;
pub use verification::FactCheckService;
