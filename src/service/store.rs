//! In-memory result store

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use crate::model::{LastVerification, NormalizedUrl};
use crate::service::collaborators::ResultStore;

#[derive(Debug, Default)]
struct StoreState {
    results: BTreeMap<NormalizedUrl, String>,
    last: LastVerification,
}

/// Thread-safe [`ResultStore`] kept in process memory.
///
/// A write replaces the record and the last-verification pair under one lock,
/// so readers never observe one without the other.
#[derive(Debug, Default)]
pub struct InMemoryResultStore {
    state: RwLock<StoreState>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .results
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultStore for InMemoryResultStore {
    fn get(&self, url: &NormalizedUrl) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .results
            .get(url)
            .cloned()
    }

    fn set(&self, url: &NormalizedUrl, canonical: String) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.last = LastVerification {
            url: url.to_string(),
            result: canonical.clone(),
        };
        state.results.insert(url.clone(), canonical);
    }

    fn last(&self) -> LastVerification {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last
            .clone()
    }
}
