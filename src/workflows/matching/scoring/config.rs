use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a requested skill token is tested against a candidate's skills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillMatchMode {
    /// Token is a substring of the joined skill text, so "C" also hits "C#".
    #[default]
    Substring,
    /// Token must equal one of the candidate's skills.
    Exact,
}

impl SkillMatchMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Substring => "substring",
            Self::Exact => "exact",
        }
    }
}

impl FromStr for SkillMatchMode {
    type Err = UnknownSkillMatchMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "substring" | "contains" => Ok(Self::Substring),
            "exact" | "token" => Ok(Self::Exact),
            _ => Err(UnknownSkillMatchMode(value.to_string())),
        }
    }
}

impl fmt::Display for SkillMatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown skill match mode '{0}' (expected 'substring' or 'exact')")]
pub struct UnknownSkillMatchMode(pub String);

/// Knobs for the matcher. Point weights are fixed; only the skill test varies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    pub skill_match: SkillMatchMode,
}
