//! Talent matching: scores a roster against a project requirement and ranks it.
//!
//! Each candidate earns 20 points per required skill found in their skill text,
//! 10 per preferred skill, 20 when their desired rate falls inside the requested
//! range, and 20 when their work condition equals the requested location. Bad
//! rate data on either side only withholds the rate points.

pub mod domain;
pub mod requirement;
pub mod router;
pub(crate) mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    CandidateRecord, MatchFactor, MatchRequirement, RateRange, ScoreComponent, ScoredCandidate,
};
pub use requirement::{
    parse_man_yen, parse_rate_range, split_skill_tokens, MatchForm, RateRangeParseError,
    RequirementError, SkillInput,
};
pub use router::{matching_router, MatchRequest};
pub use scoring::{rank, Matcher, MatcherConfig, SkillMatchMode, UnknownSkillMatchMode};
pub use service::{MatchReport, MatchingError, MatchingService};
