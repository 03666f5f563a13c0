use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Stemming language. Stopwords are always the combined English/French set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    French,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "french" | "fr" => Ok(Language::French),
            other => Err(format!("unsupported stemming language: {other}")),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => f.write_str("english"),
            Language::French => f.write_str("french"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub language: Language,
    /// Compute per-document term frequencies on the rayon pool during a build.
    pub parallel_build: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { language: Language::English, parallel_build: true }
    }
}
