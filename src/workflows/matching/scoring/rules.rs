use super::super::domain::{
    CandidateRecord, MatchFactor, MatchRequirement, RateRange, ScoreComponent,
};
use super::config::{MatcherConfig, SkillMatchMode};

pub(crate) const REQUIRED_SKILL_POINTS: i32 = 20;
pub(crate) const PREFERRED_SKILL_POINTS: i32 = 10;
pub(crate) const RATE_RANGE_POINTS: i32 = 20;
pub(crate) const WORK_CONDITION_POINTS: i32 = 20;

/// Requirement data resolved once per ranking rather than once per candidate.
pub(crate) struct PreparedRequirement<'a> {
    required: Vec<&'a str>,
    preferred: Vec<&'a str>,
    rate_range: Option<RateRange>,
    location: &'a str,
}

impl<'a> PreparedRequirement<'a> {
    pub(crate) fn new(requirement: &'a MatchRequirement) -> Self {
        Self {
            required: usable_tokens(&requirement.required_skills),
            preferred: usable_tokens(&requirement.preferred_skills),
            rate_range: requirement.usable_rate_range(),
            location: &requirement.location,
        }
    }
}

fn usable_tokens(tokens: &[String]) -> Vec<&str> {
    tokens
        .iter()
        .map(|token| token.trim())
        .filter(|token| !token.is_empty())
        .collect()
}

pub(crate) fn score_candidate(
    candidate: &CandidateRecord,
    requirement: &PreparedRequirement<'_>,
    config: &MatcherConfig,
) -> (Vec<ScoreComponent>, i32) {
    let mut components = Vec::new();
    let mut total_score = 0;
    let skill_text = candidate.skill_text();

    for token in &requirement.required {
        if has_skill(candidate, &skill_text, token, config.skill_match) {
            components.push(ScoreComponent {
                factor: MatchFactor::RequiredSkill,
                points: REQUIRED_SKILL_POINTS,
                notes: format!("required skill '{token}' matched"),
            });
            total_score += REQUIRED_SKILL_POINTS;
        }
    }

    for token in &requirement.preferred {
        if has_skill(candidate, &skill_text, token, config.skill_match) {
            components.push(ScoreComponent {
                factor: MatchFactor::PreferredSkill,
                points: PREFERRED_SKILL_POINTS,
                notes: format!("preferred skill '{token}' matched"),
            });
            total_score += PREFERRED_SKILL_POINTS;
        }
    }

    if let (Some(range), Some(rate)) = (requirement.rate_range, candidate.desired_rate) {
        if range.contains(rate) {
            components.push(ScoreComponent {
                factor: MatchFactor::RateRange,
                points: RATE_RANGE_POINTS,
                notes: format!(
                    "desired rate {rate}万 within {}万～{}万",
                    range.min, range.max
                ),
            });
            total_score += RATE_RANGE_POINTS;
        }
    }

    if candidate.work_condition == requirement.location {
        components.push(ScoreComponent {
            factor: MatchFactor::WorkCondition,
            points: WORK_CONDITION_POINTS,
            notes: format!("work condition '{}' matches", candidate.work_condition),
        });
        total_score += WORK_CONDITION_POINTS;
    }

    (components, total_score)
}

fn has_skill(
    candidate: &CandidateRecord,
    skill_text: &str,
    token: &str,
    mode: SkillMatchMode,
) -> bool {
    match mode {
        SkillMatchMode::Substring => skill_text.contains(token),
        SkillMatchMode::Exact => candidate.skills.iter().any(|skill| skill.trim() == token),
    }
}
