//! Rule engines for the planner's selection strategies.
//!
//! | Strategy | Mode | Rules |
//! |----------|------|-------|
//! | balanced | weighted | composite priority |
//! | load-balanced | weighted | composite priority − 10 × difficulty |
//! | fast | sequential | NOMINAL → DEPENDENTS → REQUIRED → EARLY |
//! | summer | sequential | SUMMER-UNLOCK → DEPENDENTS → ADVANCE-FIRST → FEWEST-CREDITS → ELECTIVE → DIFFICULTY |
//! | first term | sequential | REQUIRED → MOST-CREDITS |
//!
//! Composite priority (higher = sooner):
//!
//! ```text
//! 2000·[expected = current] + 1000·[required] + 100·dependents
//!   + 50·prerequisites + 10·(10 − expected) − 20·max(0, expected − current)
//! ```
//!
//! Every engine ends with ascending course code.

use super::rules;
use super::{EvaluationMode, RuleEngine};
use crate::config::{PriorityWeights, Strategy};

/// Engine computing the composite priority score.
pub fn composite(weights: &PriorityWeights) -> RuleEngine {
    RuleEngine::new()
        .with_mode(EvaluationMode::Weighted)
        .with_weighted_rule(rules::NominalTerm, weights.nominal_term)
        .with_weighted_rule(rules::RequiredFirst, weights.required)
        .with_weighted_rule(rules::MostDependents, weights.dependents)
        .with_weighted_rule(rules::MostPrerequisites, weights.prerequisites)
        .with_weighted_rule(rules::EarlyPlacement, weights.early_placement)
        .with_weighted_rule(rules::AdvanceDistance, weights.advance_penalty)
}

/// Engine for the load-balanced strategy: composite priority discounted by
/// difficulty.
pub fn load_balanced(weights: &PriorityWeights) -> RuleEngine {
    composite(weights).with_weighted_rule(rules::Difficulty, weights.difficulty)
}

/// Engine for the fast strategy. Ignores the composite score.
pub fn fast() -> RuleEngine {
    RuleEngine::new()
        .with_rule(rules::NominalTerm)
        .with_tie_breaker(rules::MostDependents)
        .with_tie_breaker(rules::RequiredFirst)
        .with_tie_breaker(rules::EarlyPlacement)
}

/// Engine for regular terms under the given strategy.
pub fn for_strategy(strategy: Strategy, weights: &PriorityWeights) -> RuleEngine {
    match strategy {
        Strategy::Balanced => composite(weights),
        Strategy::Fast => fast(),
        Strategy::LoadBalanced => load_balanced(weights),
    }
}

/// Engine for summer terms.
pub fn summer() -> RuleEngine {
    RuleEngine::new()
        .with_rule(rules::SummerUnlock)
        .with_tie_breaker(rules::MostDependents)
        .with_tie_breaker(rules::AdvanceFirst)
        .with_tie_breaker(rules::FewestCredits)
        .with_tie_breaker(rules::ElectiveFirst)
        .with_tie_breaker(rules::Difficulty)
}

/// Engine for the fixed first term: required first, then larger courses.
pub fn first_term() -> RuleEngine {
    RuleEngine::new()
        .with_rule(rules::RequiredFirst)
        .with_tie_breaker(rules::MostCredits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::RankingContext;
    use crate::models::Course;

    fn codes(ranked: &[&Course]) -> Vec<String> {
        ranked.iter().map(|c| c.code.clone()).collect()
    }

    #[test]
    fn test_composite_priority_values() {
        let weights = PriorityWeights::default();
        let engine = composite(&weights);
        let ctx = RankingContext::new(2).with_dependents("X", 3);

        // 2000 + 1000 + 300 + 50 + 10·(10−2) − 0 = 3430
        let course = Course::new("X", 3)
            .required()
            .with_expected_semester(2)
            .with_prerequisite("P");
        assert!((engine.priority(&course, &ctx) - 3430.0).abs() < 1e-10);

        // 0 + 0 + 0 + 0 + 10·(10−5) − 20·3 = -10
        let ahead = Course::new("Y", 3).with_expected_semester(5);
        assert!((engine.priority(&ahead, &ctx) - (-10.0)).abs() < 1e-10);
    }

    #[test]
    fn test_balanced_order() {
        let weights = PriorityWeights::default();
        let engine = for_strategy(Strategy::Balanced, &weights);
        let ctx = RankingContext::new(1);

        let elective_now = Course::new("E1", 3).with_expected_semester(1);
        let required_later = Course::new("R2", 3).required().with_expected_semester(2);
        let required_now = Course::new("R1", 3).required().with_expected_semester(1);

        let ranked = engine.rank(vec![&elective_now, &required_later, &required_now], &ctx);
        assert_eq!(codes(&ranked), vec!["R1", "E1", "R2"]);
    }

    #[test]
    fn test_load_balanced_discounts_difficulty() {
        let weights = PriorityWeights::default();
        let ctx = RankingContext::new(1);
        let hard = Course::new("A", 3).with_difficulty(5);
        let easy = Course::new("B", 3).with_difficulty(1);

        // Balanced: tie → by code.
        let balanced = for_strategy(Strategy::Balanced, &weights).rank(vec![&hard, &easy], &ctx);
        assert_eq!(codes(&balanced), vec!["A", "B"]);

        let load = for_strategy(Strategy::LoadBalanced, &weights).rank(vec![&hard, &easy], &ctx);
        assert_eq!(codes(&load), vec!["B", "A"]);
    }

    #[test]
    fn test_fast_order() {
        let ctx = RankingContext::new(1)
            .with_dependents("HUB", 5)
            .with_dependents("NOW", 0);
        let hub_later = Course::new("HUB", 3).with_expected_semester(2);
        let now = Course::new("NOW", 3).with_expected_semester(1);
        let req_later = Course::new("REQ", 3).required().with_expected_semester(3);
        let elec_later = Course::new("ELE", 3).with_expected_semester(2);

        let ranked = fast().rank(vec![&elec_later, &req_later, &hub_later, &now], &ctx);
        assert_eq!(codes(&ranked), vec!["NOW", "HUB", "REQ", "ELE"]);
    }

    #[test]
    fn test_summer_order() {
        let ctx = RankingContext::new(2)
            .with_dependents("UNLOCK", 1)
            .with_dependents("HUB", 3);
        let unlock = Course::new("UNLOCK", 3).with_expected_semester(4);
        // More dependents but on time: loses to an unlocking advance course.
        let hub = Course::new("HUB", 3).with_expected_semester(2);
        let small = Course::new("SMALL", 2).with_expected_semester(4);
        let big = Course::new("BIG", 4).with_expected_semester(4);

        let ranked = summer().rank(vec![&big, &small, &hub, &unlock], &ctx);
        assert_eq!(codes(&ranked), vec!["UNLOCK", "HUB", "SMALL", "BIG"]);
    }

    #[test]
    fn test_summer_elective_then_difficulty() {
        let ctx = RankingContext::new(2);
        let req = Course::new("A", 3).required().with_expected_semester(2);
        let hard = Course::new("B", 3).with_difficulty(4).with_expected_semester(2);
        let easy = Course::new("C", 3).with_difficulty(2).with_expected_semester(2);

        let ranked = summer().rank(vec![&req, &hard, &easy], &ctx);
        assert_eq!(codes(&ranked), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_first_term_order() {
        let ctx = RankingContext::new(1);
        let small_req = Course::new("A", 2).required();
        let big_req = Course::new("B", 4).required();
        let big_elec = Course::new("C", 5);

        let ranked = first_term().rank(vec![&big_elec, &small_req, &big_req], &ctx);
        assert_eq!(codes(&ranked), vec!["B", "A", "C"]);
    }
}
