use super::domain::{MatchRequirement, RateRange};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

const RANGE_SEPARATORS: [char; 3] = ['～', '〜', '~'];

/// Raw project form input as submitted by a requester.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchForm {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub required_skills: Option<SkillInput>,
    #[serde(default)]
    pub preferred_skills: Option<SkillInput>,
    pub location: String,
    /// Text such as `75万～90万`.
    #[serde(default)]
    pub rate_range: Option<String>,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub start_period: Option<String>,
    /// Text such as `140h～180h`.
    #[serde(default)]
    pub billing_time: Option<String>,
}

/// Skill tokens either as the comma-separated text of the form or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillInput {
    Text(String),
    List(Vec<String>),
}

impl SkillInput {
    pub fn tokens(&self) -> Vec<String> {
        match self {
            SkillInput::Text(text) => split_skill_tokens(text),
            SkillInput::List(items) => items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

impl From<&str> for SkillInput {
    fn from(value: &str) -> Self {
        SkillInput::Text(value.to_string())
    }
}

/// Requirement input that cannot be turned into skill tokens at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequirementError {
    #[error("{field} must be supplied (use an empty string for no skills)")]
    MissingSkills { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateRangeParseError {
    #[error("rate range '{0}' is missing a '～' separator")]
    MissingSeparator(String),
    #[error("rate range bound '{0}' is not a number")]
    InvalidBound(String),
}

impl TryFrom<MatchForm> for MatchRequirement {
    type Error = RequirementError;

    fn try_from(form: MatchForm) -> Result<Self, Self::Error> {
        let required_skills = form
            .required_skills
            .as_ref()
            .map(SkillInput::tokens)
            .ok_or(RequirementError::MissingSkills {
                field: "required_skills",
            })?;
        let preferred_skills = form
            .preferred_skills
            .as_ref()
            .map(SkillInput::tokens)
            .ok_or(RequirementError::MissingSkills {
                field: "preferred_skills",
            })?;

        let rate_range = match form.rate_range.as_deref().map(parse_rate_range) {
            None | Some(Ok(None)) => None,
            Some(Ok(Some(range))) => {
                if !range.is_well_formed() {
                    warn!(
                        min = range.min,
                        max = range.max,
                        "rate range is inverted; rate factor disabled"
                    );
                }
                Some(range)
            }
            Some(Err(err)) => {
                warn!(error = %err, "ignoring malformed rate range");
                None
            }
        };

        let start_period = form
            .start_period
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .and_then(|value| match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(err) => {
                    warn!(value, error = %err, "ignoring unreadable start period");
                    None
                }
            });

        let billing_time = form
            .billing_time
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Ok(MatchRequirement {
            project_name: form.project_name.unwrap_or_default().trim().to_string(),
            required_skills,
            preferred_skills,
            location: form.location,
            rate_range,
            start_period,
            billing_time,
        })
    }
}

/// Splits comma-separated skill text into trimmed, non-empty tokens.
pub fn split_skill_tokens(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses `"<min>万～<max>万"`. Blank text means no constraint.
///
/// Inverted bounds parse successfully; the matcher ignores them.
pub fn parse_rate_range(raw: &str) -> Result<Option<RateRange>, RateRangeParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let (min, max) = trimmed
        .split_once(RANGE_SEPARATORS)
        .ok_or_else(|| RateRangeParseError::MissingSeparator(trimmed.to_string()))?;

    let min =
        parse_man_yen(min).ok_or_else(|| RateRangeParseError::InvalidBound(min.to_string()))?;
    let max =
        parse_man_yen(max).ok_or_else(|| RateRangeParseError::InvalidBound(max.to_string()))?;

    Ok(Some(RateRange::new(min, max)))
}

/// Reads a man-yen amount such as `75`, `75万`, `75.5万円`, or `７５万`.
pub fn parse_man_yen(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let number = trimmed
        .strip_suffix("万円")
        .or_else(|| trimmed.strip_suffix('万'))
        .unwrap_or(trimmed)
        .trim();

    narrow_numeral(number)
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Full-width digits, period and minus sign mapped to their ASCII forms.
fn narrow_numeral(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '０'..='９' => char::from(b'0' + (ch as u32 - '０' as u32) as u8),
            '．' => '.',
            '－' | '−' => '-',
            other => other,
        })
        .collect()
}
