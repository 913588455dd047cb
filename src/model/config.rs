use serde::Deserialize;
use std::fs;
use std::path::Path;

const ENV_CONFIG_PATH: &str = "TRUTH_SERUM_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Guardrail configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuardrailConfig {
    /// Extra substrings rejected on top of the built-in loopback markers.
    /// Matched case-insensitively anywhere in the URL.
    #[serde(default)]
    pub deny: Vec<String>,
}

impl GuardrailConfig {
    /// Return the first configured term found in an already lowercased URL
    pub fn denied_term(&self, lowered_url: &str) -> Option<&str> {
        self.deny
            .iter()
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
            .find(|d| lowered_url.contains(&d.to_lowercase()))
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub guardrail: GuardrailConfig,
}

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub guardrail: GuardrailConfig,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let guardrail = Self::load_config_file(&config_path)
            .map(|cf| cf.guardrail)
            .unwrap_or_default();

        Self { guardrail }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => Self::parse_config(&contents, path),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    fn parse_config(contents: &str, path: &Path) -> Option<ConfigFile> {
        let contents = contents.trim();
        if contents.is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Some(ConfigFile::default());
        }

        match serde_yaml::from_str::<ConfigFile>(contents) {
            Ok(config) => {
                tracing::info!(
                    path = %path.display(),
                    deny_terms = config.guardrail.deny.len(),
                    "Loaded configuration from file"
                );
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                None
            }
        }
    }
}
