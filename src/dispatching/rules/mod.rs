//! Built-in ranking rules.
//!
//! # Categories
//!
//! - **Curriculum position**: NOMINAL, EARLY, ADVANCE-DIST, ADVANCE-FIRST
//! - **Graph**: DEPENDENTS, PREREQS, SUMMER-UNLOCK
//! - **Course attributes**: REQUIRED, ELECTIVE, DIFFICULTY, FEWEST-CREDITS,
//!   MOST-CREDITS
//!
//! Each rule scores one criterion. The weighted combinations used by the
//! balanced and load-balanced strategies rebuild the composite priority
//! score from these criteria; see [`crate::dispatching::strategies`].
//!
//! # Score Convention
//! All rules return lower scores for courses that should be taken sooner.

use super::{RankingContext, RankingRule, RuleScore};
use crate::models::Course;

// ======================== Curriculum position ========================

/// Nominal term match.
///
/// Courses whose nominal term is exactly the term being filled come first.
#[derive(Debug, Clone, Copy)]
pub struct NominalTerm;

impl RankingRule for NominalTerm {
    fn name(&self) -> &'static str {
        "NOMINAL"
    }

    fn evaluate(&self, course: &Course, context: &RankingContext) -> RuleScore {
        if course.expected_semester == context.current_term {
            -1.0
        } else {
            0.0
        }
    }

    fn description(&self) -> &'static str {
        "Nominal Term Match"
    }
}

/// Early nominal placement.
///
/// Score is `expected_semester - 10`, so weighting it by 10 reproduces the
/// `10 × (10 − expected_semester)` bonus of the composite priority.
#[derive(Debug, Clone, Copy)]
pub struct EarlyPlacement;

impl RankingRule for EarlyPlacement {
    fn name(&self) -> &'static str {
        "EARLY"
    }

    fn evaluate(&self, course: &Course, _context: &RankingContext) -> RuleScore {
        course.expected_semester as f64 - 10.0
    }

    fn description(&self) -> &'static str {
        "Earliest Nominal Term"
    }
}

/// Look-ahead distance.
///
/// `max(0, expected_semester − current_term)`; penalizes courses pulled
/// far ahead of their nominal term.
#[derive(Debug, Clone, Copy)]
pub struct AdvanceDistance;

impl RankingRule for AdvanceDistance {
    fn name(&self) -> &'static str {
        "ADVANCE-DIST"
    }

    fn evaluate(&self, course: &Course, context: &RankingContext) -> RuleScore {
        course.expected_semester.saturating_sub(context.current_term) as f64
    }

    fn description(&self) -> &'static str {
        "Advance Study Distance"
    }
}

/// Advance-study courses before on-time ones.
#[derive(Debug, Clone, Copy)]
pub struct AdvanceFirst;

impl RankingRule for AdvanceFirst {
    fn name(&self) -> &'static str {
        "ADVANCE-FIRST"
    }

    fn evaluate(&self, course: &Course, context: &RankingContext) -> RuleScore {
        if course.is_advance_at(context.current_term) {
            -1.0
        } else {
            0.0
        }
    }

    fn description(&self) -> &'static str {
        "Advance Study First"
    }
}

// ======================== Graph rules ========================

/// Most dependents.
///
/// Prioritizes courses that unlock the most other courses.
#[derive(Debug, Clone, Copy)]
pub struct MostDependents;

impl RankingRule for MostDependents {
    fn name(&self) -> &'static str {
        "DEPENDENTS"
    }

    fn evaluate(&self, course: &Course, context: &RankingContext) -> RuleScore {
        -(context.dependents(&course.code) as f64)
    }

    fn description(&self) -> &'static str {
        "Most Dependent Courses"
    }
}

/// Most prerequisites.
///
/// Rewards courses deep in a prerequisite chain.
#[derive(Debug, Clone, Copy)]
pub struct MostPrerequisites;

impl RankingRule for MostPrerequisites {
    fn name(&self) -> &'static str {
        "PREREQS"
    }

    fn evaluate(&self, course: &Course, _context: &RankingContext) -> RuleScore {
        -(course.prerequisites.len() as f64)
    }

    fn description(&self) -> &'static str {
        "Most Prerequisites"
    }
}

/// Summer unlock value.
///
/// Advance-study courses that unlock at least one other course go first.
/// Used by the summer packer.
#[derive(Debug, Clone, Copy)]
pub struct SummerUnlock;

impl RankingRule for SummerUnlock {
    fn name(&self) -> &'static str {
        "SUMMER-UNLOCK"
    }

    fn evaluate(&self, course: &Course, context: &RankingContext) -> RuleScore {
        if course.is_advance_at(context.current_term) && context.dependents(&course.code) > 0 {
            -1.0
        } else {
            0.0
        }
    }

    fn description(&self) -> &'static str {
        "Unlocking Advance Study"
    }
}

// ======================== Course attributes ========================

/// Required courses before electives.
#[derive(Debug, Clone, Copy)]
pub struct RequiredFirst;

impl RankingRule for RequiredFirst {
    fn name(&self) -> &'static str {
        "REQUIRED"
    }

    fn evaluate(&self, course: &Course, _context: &RankingContext) -> RuleScore {
        if course.is_required {
            -1.0
        } else {
            0.0
        }
    }

    fn description(&self) -> &'static str {
        "Required First"
    }
}

/// Electives before required courses.
#[derive(Debug, Clone, Copy)]
pub struct ElectiveFirst;

impl RankingRule for ElectiveFirst {
    fn name(&self) -> &'static str {
        "ELECTIVE"
    }

    fn evaluate(&self, course: &Course, _context: &RankingContext) -> RuleScore {
        if course.is_required {
            0.0
        } else {
            -1.0
        }
    }

    fn description(&self) -> &'static str {
        "Elective First"
    }
}

/// Lowest difficulty first.
#[derive(Debug, Clone, Copy)]
pub struct Difficulty;

impl RankingRule for Difficulty {
    fn name(&self) -> &'static str {
        "DIFFICULTY"
    }

    fn evaluate(&self, course: &Course, _context: &RankingContext) -> RuleScore {
        course.effective_difficulty() as f64
    }

    fn description(&self) -> &'static str {
        "Lowest Difficulty"
    }
}

/// Fewest credits first.
#[derive(Debug, Clone, Copy)]
pub struct FewestCredits;

impl RankingRule for FewestCredits {
    fn name(&self) -> &'static str {
        "FEWEST-CREDITS"
    }

    fn evaluate(&self, course: &Course, _context: &RankingContext) -> RuleScore {
        course.credits as f64
    }

    fn description(&self) -> &'static str {
        "Fewest Credits"
    }
}

/// Most credits first.
#[derive(Debug, Clone, Copy)]
pub struct MostCredits;

impl RankingRule for MostCredits {
    fn name(&self) -> &'static str {
        "MOST-CREDITS"
    }

    fn evaluate(&self, course: &Course, _context: &RankingContext) -> RuleScore {
        -(course.credits as f64)
    }

    fn description(&self) -> &'static str {
        "Most Credits"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(term: u32) -> RankingContext {
        RankingContext::new(term)
            .with_dependents("hub", 4)
            .with_dependents("leaf", 0)
    }

    #[test]
    fn test_nominal_term() {
        let on_time = Course::new("a", 3).with_expected_semester(2);
        let later = Course::new("b", 3).with_expected_semester(3);
        assert!(NominalTerm.evaluate(&on_time, &ctx(2)) < NominalTerm.evaluate(&later, &ctx(2)));
    }

    #[test]
    fn test_early_placement() {
        let early = Course::new("a", 3).with_expected_semester(1);
        let late = Course::new("b", 3).with_expected_semester(7);
        assert!(EarlyPlacement.evaluate(&early, &ctx(1)) < EarlyPlacement.evaluate(&late, &ctx(1)));
        assert!((EarlyPlacement.evaluate(&early, &ctx(1)) + 9.0).abs() < 1e-10);
    }

    #[test]
    fn test_advance_distance() {
        let course = Course::new("a", 3).with_expected_semester(5);
        assert!((AdvanceDistance.evaluate(&course, &ctx(2)) - 3.0).abs() < 1e-10);
        // Behind schedule is not negative.
        assert!((AdvanceDistance.evaluate(&course, &ctx(7)) - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_advance_first() {
        let ahead = Course::new("a", 3).with_expected_semester(4);
        let on_time = Course::new("b", 3).with_expected_semester(2);
        assert!(AdvanceFirst.evaluate(&ahead, &ctx(2)) < AdvanceFirst.evaluate(&on_time, &ctx(2)));
    }

    #[test]
    fn test_most_dependents() {
        let hub = Course::new("hub", 3);
        let leaf = Course::new("leaf", 3);
        assert!(MostDependents.evaluate(&hub, &ctx(1)) < MostDependents.evaluate(&leaf, &ctx(1)));
    }

    #[test]
    fn test_most_prerequisites() {
        let deep = Course::new("a", 3).with_prerequisite("x").with_prerequisite("y");
        let root = Course::new("b", 3);
        assert!(MostPrerequisites.evaluate(&deep, &ctx(1)) < MostPrerequisites.evaluate(&root, &ctx(1)));
    }

    #[test]
    fn test_summer_unlock() {
        let ahead_hub = Course::new("hub", 3).with_expected_semester(5);
        let on_time_hub = Course::new("hub", 3).with_expected_semester(2);
        let ahead_leaf = Course::new("leaf", 3).with_expected_semester(5);
        let c = ctx(2);
        assert!(SummerUnlock.evaluate(&ahead_hub, &c) < SummerUnlock.evaluate(&on_time_hub, &c));
        assert!(SummerUnlock.evaluate(&ahead_hub, &c) < SummerUnlock.evaluate(&ahead_leaf, &c));
    }

    #[test]
    fn test_required_and_elective() {
        let req = Course::new("a", 3).required();
        let elec = Course::new("b", 3);
        assert!(RequiredFirst.evaluate(&req, &ctx(1)) < RequiredFirst.evaluate(&elec, &ctx(1)));
        assert!(ElectiveFirst.evaluate(&elec, &ctx(1)) < ElectiveFirst.evaluate(&req, &ctx(1)));
    }

    #[test]
    fn test_credits_and_difficulty() {
        let small_easy = Course::new("a", 2).with_difficulty(1);
        let big_hard = Course::new("b", 5).with_difficulty(5);
        let c = ctx(1);
        assert!(FewestCredits.evaluate(&small_easy, &c) < FewestCredits.evaluate(&big_hard, &c));
        assert!(MostCredits.evaluate(&big_hard, &c) < MostCredits.evaluate(&small_easy, &c));
        assert!(Difficulty.evaluate(&small_easy, &c) < Difficulty.evaluate(&big_hard, &c));
    }
}
