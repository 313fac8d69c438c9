//! Model value object representing a reasoning backend

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Reasoning model backing an analyzer or the debate arbiter (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // Claude models
    ClaudeSonnet45,
    ClaudeHaiku45,
    ClaudeOpus45,
    // GPT models
    Gpt52,
    Gpt5Mini,
    Gpt41,
    // Gemini models
    Gemini3Pro,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::ClaudeSonnet45 => "claude-sonnet-4.5",
            Model::ClaudeHaiku45 => "claude-haiku-4.5",
            Model::ClaudeOpus45 => "claude-opus-4.5",
            Model::Gpt52 => "gpt-5.2",
            Model::Gpt5Mini => "gpt-5-mini",
            Model::Gpt41 => "gpt-4.1",
            Model::Gemini3Pro => "gemini-3-pro-preview",
            Model::Custom(s) => s,
        }
    }
}

impl Default for Model {
    /// Returns the default analyzer model
    fn default() -> Self {
        Model::ClaudeSonnet45
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Model {
    /// Every string names a model; unknown identifiers become [`Model::Custom`]
    fn from(s: &str) -> Self {
        match s {
            "claude-sonnet-4.5" => Model::ClaudeSonnet45,
            "claude-haiku-4.5" => Model::ClaudeHaiku45,
            "claude-opus-4.5" => Model::ClaudeOpus45,
            "gpt-5.2" => Model::Gpt52,
            "gpt-5-mini" => Model::Gpt5Mini,
            "gpt-4.1" => Model::Gpt41,
            "gemini-3-pro-preview" => Model::Gemini3Pro,
            other => Model::Custom(other.to_string()),
        }
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::from(s))
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        for name in ["claude-sonnet-4.5", "gpt-5.2", "gemini-3-pro-preview"] {
            let model: Model = name.parse().unwrap();
            assert_eq!(model.to_string(), name);
        }
    }

    #[test]
    fn test_custom_model() {
        let model: Model = "in-house-reviewer-v2".parse().unwrap();
        assert_eq!(model, Model::Custom("in-house-reviewer-v2".to_string()));
        assert_eq!(model.to_string(), "in-house-reviewer-v2");
    }

    #[test]
    fn test_from_str_ref_matches_parse() {
        assert_eq!(Model::from("gpt-5.2"), Model::Gpt52);
        assert_eq!(
            Model::from("in-house-reviewer-v2"),
            Model::Custom("in-house-reviewer-v2".to_string())
        );
    }
}
