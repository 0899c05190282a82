//! Ranking rules and rule engine for course selection.
//!
//! Provides priority-based ranking rules (nominal term, dependents,
//! difficulty, ...) and a composable rule engine for multi-criteria course
//! prioritization. [`strategies`] assembles the engines used by the planner.
//!
//! # Usage
//!
//! ```
//! use u_curriculum::dispatching::{RankingContext, RuleEngine};
//! use u_curriculum::dispatching::rules;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::NominalTerm)
//!     .with_tie_breaker(rules::MostDependents);
//!
//! let context = RankingContext::new(1);
//! // let ranked = engine.rank(ready, &context);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod context;
mod engine;
pub mod rules;
pub mod strategies;

pub use context::RankingContext;
pub use engine::{EvaluationMode, RuleEngine};

use crate::models::Course;
use std::fmt::Debug;

/// Score returned by a ranking rule.
///
/// Lower scores = higher priority (taken sooner).
pub type RuleScore = f64;

/// A ranking rule that evaluates course priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules should return smaller values
/// for courses that should be taken first.
pub trait RankingRule: Send + Sync + Debug {
    /// Rule name (e.g., "REQUIRED", "DEPENDENTS").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a course given the current ranking context.
    ///
    /// Returns a score where lower = higher priority.
    fn evaluate(&self, course: &Course, context: &RankingContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
