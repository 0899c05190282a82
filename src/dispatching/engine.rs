//! Rule engine for multi-criteria course ranking.
//!
//! Composes ranking rules with configurable evaluation modes and
//! tie-breaking strategies.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;
use std::sync::Arc;

use super::{RankingContext, RankingRule, RuleScore};
use crate::models::Course;

/// How multiple rules are combined.
#[derive(Debug, Clone, Default)]
pub enum EvaluationMode {
    /// Apply rules in sequence; use next rule only on ties.
    #[default]
    Sequential,
    /// Compute weighted sum of all rule scores.
    Weighted,
}

#[derive(Clone)]
struct WeightedRule {
    rule: Arc<dyn RankingRule>,
    weight: f64,
}

/// A composable rule engine for course prioritization.
///
/// Supports sequential multi-layer evaluation (primary rule → tie-breaker)
/// and weighted combination modes. Both modes finish with ascending course
/// code, so orderings are reproducible.
///
/// # Example
/// ```
/// use u_curriculum::dispatching::{RankingContext, RuleEngine};
/// use u_curriculum::dispatching::rules;
/// use u_curriculum::models::Course;
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::RequiredFirst)
///     .with_tie_breaker(rules::FewestCredits);
///
/// let a = Course::new("A", 4);
/// let b = Course::new("B", 3).required();
/// let ranked = engine.rank(vec![&a, &b], &RankingContext::new(1));
/// assert_eq!(ranked[0].code, "B");
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<WeightedRule>,
    mode: EvaluationMode,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            mode: EvaluationMode::Sequential,
            epsilon: 1e-9,
        }
    }

    /// Adds a primary rule (weight 1.0).
    pub fn with_rule<R: RankingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight: 1.0,
        });
        self
    }

    /// Adds a weighted rule.
    pub fn with_weighted_rule<R: RankingRule + 'static>(mut self, rule: R, weight: f64) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight,
        });
        self
    }

    /// Adds a tie-breaking rule (weight 0.0, used only in Sequential mode).
    pub fn with_tie_breaker<R: RankingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight: 0.0,
        });
        self
    }

    /// Sets the evaluation mode.
    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sorts courses by priority (highest priority first).
    ///
    /// Returns indices into the given slice.
    pub fn sort_indices(&self, courses: &[&Course], context: &RankingContext) -> Vec<usize> {
        if courses.is_empty() {
            return Vec::new();
        }

        let mut indices: Vec<usize> = (0..courses.len()).collect();

        match &self.mode {
            EvaluationMode::Sequential => {
                indices.sort_by(|&a, &b| self.compare_sequential(courses[a], courses[b], context));
            }
            EvaluationMode::Weighted => {
                let scores: Vec<f64> = courses
                    .iter()
                    .map(|c| self.weighted_score(c, context))
                    .collect();
                indices.sort_by(|&a, &b| {
                    if (scores[a] - scores[b]).abs() > self.epsilon {
                        scores[a].partial_cmp(&scores[b]).unwrap_or(Ordering::Equal)
                    } else {
                        courses[a].code.cmp(&courses[b].code)
                    }
                });
            }
        }

        indices
    }

    /// Returns the courses reordered by priority.
    pub fn rank<'a>(&self, courses: Vec<&'a Course>, context: &RankingContext) -> Vec<&'a Course> {
        self.sort_indices(&courses, context)
            .into_iter()
            .map(|i| courses[i])
            .collect()
    }

    /// Evaluates a single course and returns the weighted score of each rule.
    pub fn evaluate(&self, course: &Course, context: &RankingContext) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|wr| wr.rule.evaluate(course, context) * wr.weight)
            .collect()
    }

    /// Sum of weighted rule scores (lower = sooner).
    pub fn weighted_score(&self, course: &Course, context: &RankingContext) -> f64 {
        self.rules
            .iter()
            .map(|wr| wr.rule.evaluate(course, context) * wr.weight)
            .sum()
    }

    /// Priority in the "higher = sooner" convention: the negated weighted score.
    pub fn priority(&self, course: &Course, context: &RankingContext) -> f64 {
        -self.weighted_score(course, context)
    }

    fn compare_sequential(&self, a: &Course, b: &Course, context: &RankingContext) -> Ordering {
        for wr in &self.rules {
            let score_a = wr.rule.evaluate(a, context);
            let score_b = wr.rule.evaluate(b, context);

            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal);
            }
        }

        a.code.cmp(&b.code)
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self
                    .rules
                    .iter()
                    .map(|r| format!("{}(w={})", r.rule.name(), r.weight))
                    .collect::<Vec<_>>(),
            )
            .field("mode", &self.mode)
            .finish()
    }
}
