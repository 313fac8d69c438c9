//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain types after
//! validation.
//!
//! Example configuration:
//!
//! ```toml
//! arbiter = "claude-opus-4.5"
//!
//! [[analyzers]]
//! name = "brand-compliance"
//! model = "claude-sonnet-4.5"
//! weight = 1.5
//! expertise = ["brand colors", "typography", "logo usage"]
//!
//! [provider]
//! base_url = "https://api.openai.com/v1"
//! api_key_env = "DOC_COUNCIL_API_KEY"
//!
//! [behavior]
//! call_timeout_secs = 120
//! ```

use council_application::ReviewParams;
use council_domain::{AnalyzerSpec, DomainError, Model, Roster};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// One analyzer entry from the `[[analyzers]]` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnalyzerConfig {
    /// Unique role name
    pub name: String,
    /// Model identifier, e.g. "claude-sonnet-4.5" or "gpt-5.2"
    pub model: String,
    /// Authority weight in synthesis
    pub weight: f64,
    /// Expertise areas fed into the analyzer's prompt
    pub expertise: Vec<String>,
}

impl Default for FileAnalyzerConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            model: Model::default().to_string(),
            weight: 1.0,
            expertise: Vec::new(),
        }
    }
}

/// Reasoning backend settings (`[provider]` section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL of an OpenAI-compatible endpoint
    pub base_url: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "DOC_COUNCIL_API_KEY".to_string(),
        }
    }
}

/// Pipeline behavior settings (`[behavior]` section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    /// Timeout for each individual backend call, in seconds
    pub call_timeout_secs: u64,
}

impl Default for FileBehaviorConfig {
    fn default() -> Self {
        Self {
            call_timeout_secs: 120,
        }
    }
}

/// A problem detected while validating the configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    /// Which config field is affected, e.g. "analyzers[1].weight"
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model that arbitrates debates; defaults to claude-opus-4.5
    pub arbiter: Option<String>,
    /// Council roster; the built-in default roster is used when empty
    pub analyzers: Vec<FileAnalyzerConfig>,
    /// Reasoning backend settings
    pub provider: FileProviderConfig,
    /// Pipeline behavior settings
    pub behavior: FileBehaviorConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks empty analyzer names, duplicate names, non-positive weights,
    /// and degenerate behavior settings.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let mut seen = HashSet::new();
        for (i, analyzer) in self.analyzers.iter().enumerate() {
            if analyzer.name.trim().is_empty() {
                issues.push(ConfigIssue {
                    field: format!("analyzers[{i}].name"),
                    message: "analyzer name must not be empty".to_string(),
                });
            } else if !seen.insert(analyzer.name.clone()) {
                issues.push(ConfigIssue {
                    field: format!("analyzers[{i}].name"),
                    message: format!("duplicate analyzer name '{}'", analyzer.name),
                });
            }

            if analyzer.weight <= 0.0 || !analyzer.weight.is_finite() {
                issues.push(ConfigIssue {
                    field: format!("analyzers[{i}].weight"),
                    message: format!("weight must be positive, got {}", analyzer.weight),
                });
            }
        }

        if self.behavior.call_timeout_secs == 0 {
            issues.push(ConfigIssue {
                field: "behavior.call_timeout_secs".to_string(),
                message: "timeout must be at least 1 second".to_string(),
            });
        }

        if self.provider.api_key_env.trim().is_empty() {
            issues.push(ConfigIssue {
                field: "provider.api_key_env".to_string(),
                message: "api_key_env must name an environment variable".to_string(),
            });
        }

        issues
    }

    /// Build the council roster. An empty `[[analyzers]]` array means the
    /// built-in default roster.
    pub fn to_roster(&self) -> Result<Roster, DomainError> {
        if self.analyzers.is_empty() {
            return Ok(Roster::default_roster());
        }

        let analyzers = self
            .analyzers
            .iter()
            .map(|a| {
                AnalyzerSpec::new(a.name.clone(), Model::from(a.model.as_str()))
                    .with_expertise(a.expertise.iter().cloned())
                    .with_weight(a.weight)
            })
            .collect();
        Roster::new(analyzers)
    }

    /// Arbiter model, falling back to the built-in default
    pub fn parse_arbiter(&self) -> Model {
        self.arbiter
            .as_deref()
            .map(Model::from)
            .unwrap_or(Model::ClaudeOpus45)
    }

    /// Run parameters derived from the `[behavior]` section
    pub fn review_params(&self) -> ReviewParams {
        ReviewParams::default()
            .with_call_timeout(Duration::from_secs(self.behavior.call_timeout_secs))
    }
}
