//! Greedy term packing and plan orchestration.
//!
//! # Algorithm
//!
//! `Planner` walks the terms in order. Each term it asks the readiness
//! evaluator for the legal courses, ranks them with the strategy's rule
//! engine and hands them to a packer. `TermPacker` fills regular terms up to
//! the credit cap; `SummerPacker` fills the optional summer terms from a
//! wider look-ahead under credit and course-count caps. Neither is optimal;
//! both are single-pass greedy heuristics.
//!
//! `compare_strategies` runs the named presets side by side.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Martello & Toth (1990), "Knapsack Problems"

mod compare;
mod packer;
mod planner;

pub use compare::{compare_strategies, StrategyComparison};
pub use packer::{SummerPacker, TermPacker, SUMMER_LOOKAHEAD, SUMMER_PRACTICAL_MAX_CREDITS};
pub use planner::{CreditBounds, PlanOutcome, Planner, StopReason};
