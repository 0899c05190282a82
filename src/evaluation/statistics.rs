//! Plan quality metrics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total / regular / summer terms | Term counts |
//! | Required / elective credits | Credit split over scheduled courses |
//! | Avg credits per term | Total credits / term count |
//! | Load balance | Min, max and population std-dev of regular-term credits |
//! | Advance-study courses | Courses scheduled before their nominal term |
//! | Completion time | `ceil(last regular term / 2)` years |
//! | Remaining courses | Curriculum courses neither scheduled, completed nor discharged |

use serde::Serialize;

use crate::graph::CurriculumGraph;
use crate::models::{year_of, Plan};
use crate::readiness::PlanState;

/// Credit spread over regular terms.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalance {
    /// Lightest regular term (0 without regular terms).
    pub min_credits: u32,
    /// Heaviest regular term.
    pub max_credits: u32,
    /// Population standard deviation (0 with fewer than two regular terms).
    pub standard_deviation: f64,
}

/// Aggregate plan statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStatistics {
    /// All terms.
    pub total_semesters: usize,
    /// Regular terms.
    pub regular_semesters: usize,
    /// Summer terms.
    pub summer_semesters: usize,
    /// Credits over all terms.
    pub total_credits: u32,
    /// Credits of required courses.
    pub required_credits: u32,
    /// Credits of electives.
    pub elective_credits: u32,
    /// Total credits / total terms.
    pub average_credits_per_semester: f64,
    /// Regular-term credits / regular terms.
    pub average_credits_per_regular_semester: f64,
    /// Courses scheduled ahead of their nominal term.
    pub advanced_study_courses: usize,
    /// Years until the last regular term.
    pub completion_time_in_years: u32,
    /// Regular-term load spread.
    pub load_balance: LoadBalance,
    /// Curriculum courses still outstanding.
    pub remaining_courses: usize,
}

impl PlanStatistics {
    /// Computes statistics for a plan.
    ///
    /// # Arguments
    /// * `plan` - The finished plan.
    /// * `graph` - Graph of the curriculum the plan was built from.
    /// * `completed` - Courses completed before the plan starts.
    pub fn calculate<S: AsRef<str>>(plan: &Plan, graph: &CurriculumGraph, completed: &[S]) -> Self {
        let mut stats = Self {
            total_semesters: plan.len(),
            ..Default::default()
        };

        let mut regular_credits = Vec::new();
        for term in &plan.terms {
            stats.total_credits = stats.total_credits.saturating_add(term.credit_total);
            if term.is_regular() {
                regular_credits.push(term.credit_total);
            }

            for course in &term.courses {
                if course.is_required {
                    stats.required_credits = stats.required_credits.saturating_add(course.credits);
                } else {
                    stats.elective_credits = stats.elective_credits.saturating_add(course.credits);
                }
                if course.is_advance_at(term.index) {
                    stats.advanced_study_courses += 1;
                }
            }
        }

        stats.regular_semesters = regular_credits.len();
        stats.summer_semesters = stats.total_semesters - stats.regular_semesters;

        if stats.total_semesters > 0 {
            stats.average_credits_per_semester =
                stats.total_credits as f64 / stats.total_semesters as f64;
        }

        if !regular_credits.is_empty() {
            let sum: f64 = regular_credits.iter().map(|&c| c as f64).sum();
            let mean = sum / regular_credits.len() as f64;
            stats.average_credits_per_regular_semester = mean;

            stats.load_balance.min_credits = regular_credits.iter().copied().min().unwrap_or(0);
            stats.load_balance.max_credits = regular_credits.iter().copied().max().unwrap_or(0);

            if regular_credits.len() > 1 {
                let variance = regular_credits
                    .iter()
                    .map(|&c| (c as f64 - mean).powi(2))
                    .sum::<f64>()
                    / regular_credits.len() as f64;
                stats.load_balance.standard_deviation = variance.sqrt();
            }
        }

        let last_regular = plan.regular_terms().map(|t| t.index).max().unwrap_or(0);
        stats.completion_time_in_years = year_of(last_regular);

        let mut state = PlanState::from_completed(completed, graph.courses());
        for course in plan.terms.iter().flat_map(|t| t.courses.iter()) {
            state.admit(course);
        }
        stats.remaining_courses = graph
            .unique_courses()
            .filter(|c| !state.is_settled(c))
            .count();

        stats
    }

    /// Whether every curriculum course is accounted for.
    pub fn is_complete(&self) -> bool {
        self.remaining_courses == 0
    }
}
