//! Verification pipeline
//!
//! Guardrail → fetch (text, html) → link extraction → prompt → judge →
//! validation → storage write. Any error aborts before the write.

use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::model::{GuardrailConfig, LastVerification};
use crate::service::collaborators::{ConsensusJudge, FetchMode, PageFetcher, ResultStore};
use crate::service::error::VerifyError;
use crate::service::guardrail::normalize_and_check_with;
use crate::service::links::extract_links;
use crate::service::prompts::{JUDGE_CRITERIA, JUDGE_TASK, build_prompt};
use crate::service::validation::validate;

/// Fact-check service exposing `verify`, `get` and `get_last`
pub struct FactCheckService {
    fetcher: Arc<dyn PageFetcher>,
    judge: Arc<dyn ConsensusJudge>,
    store: Arc<dyn ResultStore>,
    guardrail: GuardrailConfig,
}

impl FactCheckService {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        judge: Arc<dyn ConsensusJudge>,
        store: Arc<dyn ResultStore>,
        guardrail: GuardrailConfig,
    ) -> Self {
        if !guardrail.deny.is_empty() {
            tracing::info!(deny = ?guardrail.deny, "Guardrail deny terms configured");
        }
        Self {
            fetcher,
            judge,
            store,
            guardrail,
        }
    }

    /// Verify a URL and store its canonical record.
    ///
    /// Returns the canonical record. Nothing is written when any step fails.
    pub async fn verify(&self, raw_url: &str) -> Result<String, VerifyError> {
        let url = match normalize_and_check_with(raw_url, &self.guardrail) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(url = %raw_url.trim(), error = %e, "URL rejected by guardrail");
                return Err(e.into());
            }
        };

        let start_time = std::time::Instant::now();

        let article_text = self.fetcher.fetch(&url, FetchMode::Text).await?;
        let article_html = self.fetcher.fetch(&url, FetchMode::Html).await?;

        let candidate_links = extract_links(&article_html);
        tracing::debug!(
            url = %url,
            host = ?url.host(),
            text_length = article_text.len(),
            html_sha256 = %fingerprint(&article_html),
            candidate_links = candidate_links.len(),
            "Fetched page and extracted candidate links"
        );

        let prompt = build_prompt(&url, &article_text, &candidate_links);
        let prompt_length = prompt.len();

        let payload = self.judge.judge(&prompt, JUDGE_TASK, JUDGE_CRITERIA).await?;

        let record = match validate(&payload, &url, &candidate_links) {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(
                    url = %url,
                    prompt_length = prompt_length,
                    payload_length = payload.len(),
                    error = %e,
                    "Judge output failed validation"
                );
                return Err(e.into());
            }
        };

        let canonical = record.into_canonical();
        self.store.set(&url, canonical.clone());

        tracing::info!(
            url = %url,
            elapsed_ms = start_time.elapsed().as_millis(),
            candidate_links = candidate_links.len(),
            html_sha256 = %fingerprint(&article_html),
            record_sha256 = %fingerprint(&canonical),
            "Verification stored"
        );

        Ok(canonical)
    }

    /// Stored canonical record for a URL, or an empty string
    pub fn get(&self, raw_url: &str) -> String {
        match normalize_and_check_with(raw_url, &self.guardrail) {
            Ok(url) => self.store.get(&url).unwrap_or_default(),
            Err(e) => {
                tracing::debug!(url = %raw_url.trim(), error = %e, "Lookup for rejected URL");
                String::new()
            }
        }
    }

    /// Most recently verified URL and record
    pub fn get_last(&self) -> LastVerification {
        self.store.last()
    }
}

/// SHA-256 hex digest, used only in log fields
fn fingerprint(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::model::NormalizedUrl;
    use crate::service::error::CollaboratorError;
    use crate::service::store::InMemoryResultStore;

    const ARTICLE_HTML: &str = r#"<a href="https://src1.com/x">x</a><a href="https://src1.com/x">dup</a><a href="/relative">r</a>"#;

    struct StaticFetcher {
        calls: Mutex<Vec<FetchMode>>,
    }

    impl StaticFetcher {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PageFetcher for StaticFetcher {
        async fn fetch(
            &self,
            _url: &NormalizedUrl,
            mode: FetchMode,
        ) -> Result<String, CollaboratorError> {
            self.calls.lock().unwrap().push(mode);
            Ok(match mode {
                FetchMode::Text => "Article body.".to_string(),
                FetchMode::Html => ARTICLE_HTML.to_string(),
            })
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl PageFetcher for FailingFetcher {
        async fn fetch(
            &self,
            _url: &NormalizedUrl,
            _mode: FetchMode,
        ) -> Result<String, CollaboratorError> {
            Err(CollaboratorError::Fetch("timeout".to_string()))
        }
    }

    struct FixedJudge {
        payload: String,
        prompts: Mutex<Vec<String>>,
    }

    impl FixedJudge {
        fn new(payload: &str) -> Self {
            Self {
                payload: payload.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ConsensusJudge for FixedJudge {
        async fn judge(
            &self,
            prompt: &str,
            task: &str,
            criteria: &str,
        ) -> Result<String, CollaboratorError> {
            assert_eq!(task, JUDGE_TASK);
            assert_eq!(criteria, JUDGE_CRITERIA);
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.payload.clone())
        }
    }

    fn service(
        fetcher: Arc<dyn PageFetcher>,
        judge: Arc<FixedJudge>,
        store: Arc<InMemoryResultStore>,
    ) -> FactCheckService {
        FactCheckService::new(fetcher, judge, store, GuardrailConfig::default())
    }

    const GOOD_PAYLOAD: &str = r#"{"verdict":"True","explanation":"Matches the cited study.","sources":[{"url":"https://src1.com/x","note":"n"}],"key_claims":["A claim"]}"#;

    #[tokio::test]
    async fn test_verify_stores_canonical_record() {
        let fetcher = Arc::new(StaticFetcher::new());
        let judge = Arc::new(FixedJudge::new(GOOD_PAYLOAD));
        let store = Arc::new(InMemoryResultStore::new());
        let svc = service(fetcher.clone(), judge.clone(), store.clone());

        let result = svc.verify("  https://example.com/a ").await.unwrap();
        assert_eq!(
            result,
            r#"{"explanation":"Matches the cited study.","key_claims":["A claim"],"sources":[{"note":"n","url":"https://src1.com/x"}],"verdict":"True"}"#
        );

        assert_eq!(
            *fetcher.calls.lock().unwrap(),
            vec![FetchMode::Text, FetchMode::Html]
        );
        let prompts = judge.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("- https://src1.com/x\n"));
        assert!(!prompts[0].contains("/relative"));

        assert_eq!(svc.get("https://example.com/a"), result);
        assert_eq!(svc.get(" https://example.com/a\t"), result);
        let last = svc.get_last();
        assert_eq!(last.url, "https://example.com/a");
        assert_eq!(last.result, result);
    }

    #[tokio::test]
    async fn test_disallowed_source_writes_nothing() {
        let payload = r#"{"verdict":"True","explanation":"e","sources":[{"url":"https://other.com","note":"n"}],"key_claims":[]}"#;
        let store = Arc::new(InMemoryResultStore::new());
        let svc = service(
            Arc::new(StaticFetcher::new()),
            Arc::new(FixedJudge::new(payload)),
            store.clone(),
        );

        let err = svc.verify("https://example.com/a").await.unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("https://other.com"));
        assert!(store.is_empty());
        assert_eq!(svc.get("https://example.com/a"), "");
        assert_eq!(svc.get_last(), LastVerification::default());
    }

    #[tokio::test]
    async fn test_guardrail_rejects_before_fetch() {
        let fetcher = Arc::new(StaticFetcher::new());
        let judge = Arc::new(FixedJudge::new(GOOD_PAYLOAD));
        let svc = service(
            fetcher.clone(),
            judge.clone(),
            Arc::new(InMemoryResultStore::new()),
        );

        for url in [
            "http://localhost:8080/x",
            "http://127.0.0.1/x",
            "https://evil.com/localhost-news",
            "example.com",
        ] {
            let err = svc.verify(url).await.unwrap_err();
            assert!(err.is_invalid_input(), "{url}");
        }
        assert!(fetcher.calls.lock().unwrap().is_empty());
        assert!(judge.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_configured_deny_term() {
        let svc = FactCheckService::new(
            Arc::new(StaticFetcher::new()),
            Arc::new(FixedJudge::new(GOOD_PAYLOAD)),
            Arc::new(InMemoryResultStore::new()),
            GuardrailConfig {
                deny: vec!["example.com".to_string()],
            },
        );
        let err = svc.verify("https://example.com/a").await.unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(svc.get("https://example.com/a"), "");
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let store = Arc::new(InMemoryResultStore::new());
        let svc = service(
            Arc::new(FailingFetcher),
            Arc::new(FixedJudge::new(GOOD_PAYLOAD)),
            store.clone(),
        );
        let err = svc.verify("https://example.com/a").await.unwrap_err();
        assert!(matches!(
            err,
            VerifyError::Collaborator(CollaboratorError::Fetch(_))
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_reverification_overwrites() {
        let store = Arc::new(InMemoryResultStore::new());
        let first = service(
            Arc::new(StaticFetcher::new()),
            Arc::new(FixedJudge::new(GOOD_PAYLOAD)),
            store.clone(),
        );
        first.verify("https://example.com/a").await.unwrap();

        let payload = r#"{"verdict":"Not enough data","explanation":"Unclear.","sources":[],"key_claims":[]}"#;
        let second = service(
            Arc::new(StaticFetcher::new()),
            Arc::new(FixedJudge::new(payload)),
            store.clone(),
        );
        let result = second.verify("https://example.com/a").await.unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(second.get("https://example.com/a"), result);
        assert!(result.contains(r#""verdict":"Not enough data""#));
    }

    #[test]
    fn test_fingerprint_is_stable() {
        assert_eq!(
            fingerprint("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
