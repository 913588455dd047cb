//! Validated verdict records

use std::fmt;

use serde::{Deserialize, Serialize};

/// Overall verdict for an article. Literals are exact-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "True")]
    True,
    #[serde(rename = "False")]
    False,
    #[serde(rename = "Misleading")]
    Misleading,
    #[serde(rename = "Not enough data")]
    NotEnoughData,
}

impl Verdict {
    pub const ALL: [Verdict; 4] = [
        Verdict::True,
        Verdict::False,
        Verdict::Misleading,
        Verdict::NotEnoughData,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::True => "True",
            Verdict::False => "False",
            Verdict::Misleading => "Misleading",
            Verdict::NotEnoughData => "Not enough data",
        }
    }

    /// Case- and punctuation-sensitive lookup.
    pub fn from_literal(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cited source. `url` is always a member of the request's allow-set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceCitation {
    pub url: String,
    pub note: String,
}

/// A fully validated verdict together with its canonical serialization.
///
/// Only `service::validation::validate` builds one, so holding a value means
/// every schema and allow-list rule passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictRecord {
    pub(crate) verdict: Verdict,
    pub(crate) explanation: String,
    pub(crate) sources: Vec<SourceCitation>,
    pub(crate) key_claims: Vec<String>,
    pub(crate) canonical: String,
}

impl VerdictRecord {
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn sources(&self) -> &[SourceCitation] {
        &self.sources
    }

    pub fn key_claims(&self) -> &[String] {
        &self.key_claims
    }

    /// Minified canonical JSON, the value written to storage.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn into_canonical(self) -> String {
        self.canonical
    }
}

/// Most recently verified URL and its canonical record.
///
/// Both fields are empty strings before the first successful verification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastVerification {
    pub url: String,
    pub result: String,
}
