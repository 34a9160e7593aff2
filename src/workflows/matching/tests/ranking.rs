use super::common::*;
use crate::workflows::matching::domain::{MatchRequirement, RateRange};
use crate::workflows::matching::rank;

#[test]
fn rank_orders_by_score_descending() {
    let ranked = rank(&roster(), &aws_requirement());

    assert_eq!(names(&ranked), vec!["OR", "Y.O", "K.T"]);
    let scores: Vec<_> = ranked.iter().map(|scored| scored.match_score).collect();
    assert_eq!(scores, vec![70, 40, 20]);
}

#[test]
fn rank_returns_a_permutation_of_the_roster() {
    let roster = roster();
    let ranked = rank(&roster, &aws_requirement());

    assert_eq!(ranked.len(), roster.len());
    for candidate in &roster {
        assert!(ranked.iter().any(|scored| &scored.candidate == candidate));
    }
}

#[test]
fn rank_is_idempotent() {
    let roster = roster();
    let requirement = aws_requirement();

    assert_eq!(rank(&roster, &requirement), rank(&roster, &requirement));
}

#[test]
fn empty_roster_ranks_to_empty() {
    assert!(rank(&[], &aws_requirement()).is_empty());
}

#[test]
fn empty_skill_lists_only_score_location() {
    let roster = vec![
        candidate("A", &["AWS"], Some(70.0), "onsite"),
        candidate("B", &["Go"], Some(80.0), "remote"),
        candidate("C", &[], None, "fully remote"),
    ];
    let requirement = MatchRequirement::new("remote");

    let ranked = rank(&roster, &requirement);

    assert_eq!(names(&ranked), vec!["B", "A", "C"]);
    let scores: Vec<_> = ranked.iter().map(|scored| scored.match_score).collect();
    assert_eq!(scores, vec![20, 0, 0]);
}

#[test]
fn equal_scores_keep_roster_order() {
    let roster = vec![
        candidate("first", &["Go"], None, "onsite"),
        candidate("second", &["Go", "Rust"], None, "onsite"),
        candidate("third", &["Go"], None, "onsite"),
    ];
    let requirement = MatchRequirement::new("remote").with_required(["Go"]);

    let ranked = rank(&roster, &requirement);

    assert_eq!(names(&ranked), vec!["first", "second", "third"]);

    let requirement = requirement.with_preferred(["Rust"]);
    let ranked = rank(&roster, &requirement);
    assert_eq!(names(&ranked), vec!["second", "first", "third"]);
}

#[test]
fn adding_a_required_token_never_lowers_scores() {
    let roster = roster();
    let base = MatchRequirement::new("fully remote").with_required(["AWS"]);
    let extended = MatchRequirement::new("fully remote").with_required(["AWS", "Python"]);

    let before = rank(&roster, &base);
    let after = rank(&roster, &extended);

    for scored in &before {
        let later = after
            .iter()
            .find(|other| other.candidate.name == scored.candidate.name)
            .expect("same candidate present");
        assert!(later.match_score >= scored.match_score);
    }
}

#[test]
fn malformed_rate_range_only_drops_rate_points() {
    let roster = roster();
    let mut requirement = aws_requirement();
    let well_formed = rank(&roster, &requirement);

    requirement.rate_range = Some(RateRange::new(90.0, 70.0));
    let inverted = rank(&roster, &requirement);

    requirement.rate_range = Some(RateRange::new(f64::NAN, 90.0));
    let not_a_number = rank(&roster, &requirement);

    for ranked in [&inverted, &not_a_number] {
        for scored in ranked.iter() {
            let original = well_formed
                .iter()
                .find(|other| other.candidate.name == scored.candidate.name)
                .expect("same candidate present");
            assert_eq!(scored.match_score, original.match_score - 20);
        }
    }
}
