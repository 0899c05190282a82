//! Side-by-side comparison of planner presets.
//!
//! Each preset runs as an independent planner with its own graph and state,
//! so the runs go through Rayon's thread pool with no shared mutable data.

use rayon::prelude::*;
use serde::Serialize;

use super::Planner;
use crate::config::{PlannerConfig, PlannerPreset};
use crate::error::Result;
use crate::evaluation::PlanStatistics;
use crate::models::Curriculum;

/// Summary of one preset's run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyComparison {
    /// Preset that produced the run.
    pub preset: PlannerPreset,
    /// Display name of the preset.
    pub name: &'static str,
    /// Whether the plan validated without errors.
    pub is_valid: bool,
    /// Plan statistics.
    pub statistics: PlanStatistics,
}

/// Runs every [`PlannerPreset`] on top of `base` in parallel.
///
/// Results come back in [`PlannerPreset::ALL`] order.
///
/// # Errors
/// Fails if any preset configuration is invalid.
pub fn compare_strategies<S: AsRef<str> + Sync>(
    curriculum: &Curriculum,
    completed: &[S],
    base: &PlannerConfig,
) -> Result<Vec<StrategyComparison>> {
    PlannerPreset::ALL[..]
        .par_iter()
        .map(|preset| -> Result<StrategyComparison> {
            let outcome = Planner::new(preset.apply(base)).plan(curriculum, completed)?;
            Ok(StrategyComparison {
                preset: *preset,
                name: preset.name(),
                is_valid: outcome.is_valid(),
                statistics: outcome.validation.statistics,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Course;

    fn curriculum() -> Curriculum {
        Curriculum::new(vec![
            Course::new("A", 3).required(),
            Course::new("B", 3).required().with_expected_semester(2).with_prerequisite("A"),
            Course::new("C", 3).with_expected_semester(3),
            Course::new("D", 3).required().with_expected_semester(4).with_prerequisite("B"),
        ])
    }

    #[test]
    fn test_presets_in_order() {
        let results = compare_strategies(&curriculum(), &[] as &[&str], &PlannerConfig::new()).unwrap();
        let presets: Vec<PlannerPreset> = results.iter().map(|r| r.preset).collect();
        assert_eq!(presets, PlannerPreset::ALL.to_vec());
        assert_eq!(results[0].name, "traditional");
    }

    #[test]
    fn test_advance_study_finishes_no_later() {
        let results = compare_strategies(&curriculum(), &[] as &[&str], &PlannerConfig::new()).unwrap();
        let traditional = &results[0].statistics;
        let advance = &results[1].statistics;

        assert_eq!(traditional.remaining_courses, 0);
        assert_eq!(advance.remaining_courses, 0);
        assert!(advance.regular_semesters <= traditional.regular_semesters);
    }

    #[test]
    fn test_invalid_base_config() {
        let base = PlannerConfig::new().with_max_terms(0);
        assert!(compare_strategies(&curriculum(), &[] as &[&str], &base).is_err());
    }
}
