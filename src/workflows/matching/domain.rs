use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single engineer on the roster, normalized from whatever source supplied it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: String,
    pub skills: Vec<String>,
    pub role: String,
    /// Desired monthly rate in man-yen (10,000 JPY). `None` when the source
    /// value was missing or could not be read as a number.
    pub desired_rate: Option<f64>,
    pub work_condition: String,
    /// ISO date text, carried through untouched.
    pub available_from: String,
}

impl CandidateRecord {
    /// Skills rendered back into the comma-separated form they were authored in.
    pub fn skill_text(&self) -> String {
        self.skills.join(", ")
    }
}

/// Inclusive rate bounds in man-yen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateRange {
    pub min: f64,
    pub max: f64,
}

impl RateRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inverted or non-finite bounds disable the rate factor entirely.
    pub fn is_well_formed(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    pub fn contains(&self, rate: f64) -> bool {
        self.min <= rate && rate <= self.max
    }
}

/// Structured project query that the matcher scores the roster against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRequirement {
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    pub location: String,
    #[serde(default)]
    pub rate_range: Option<RateRange>,
    #[serde(default)]
    pub start_period: Option<NaiveDate>,
    #[serde(default)]
    pub billing_time: Option<String>,
}

impl MatchRequirement {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            project_name: String::new(),
            required_skills: Vec::new(),
            preferred_skills: Vec::new(),
            location: location.into(),
            rate_range: None,
            start_period: None,
            billing_time: None,
        }
    }

    pub fn with_required<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_preferred<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rate_range(mut self, min: f64, max: f64) -> Self {
        self.rate_range = Some(RateRange::new(min, max));
        self
    }

    /// The rate range only when it can actually be applied.
    pub(crate) fn usable_rate_range(&self) -> Option<RateRange> {
        self.rate_range.filter(RateRange::is_well_formed)
    }
}

/// Factors that can contribute to a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFactor {
    RequiredSkill,
    PreferredSkill,
    RateRange,
    WorkCondition,
}

impl MatchFactor {
    pub const fn label(self) -> &'static str {
        match self {
            Self::RequiredSkill => "Required skill",
            Self::PreferredSkill => "Preferred skill",
            Self::RateRange => "Rate range",
            Self::WorkCondition => "Work condition",
        }
    }
}

/// One awarded contribution, kept so a ranking can be audited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: MatchFactor,
    pub points: i32,
    pub notes: String,
}

/// A roster entry annotated with its score for one ranking request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub candidate: CandidateRecord,
    pub match_score: i32,
    pub components: Vec<ScoreComponent>,
}
