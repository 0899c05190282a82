//! Planner configuration.
//!
//! [`PlannerConfig`] is an immutable value passed into every planning call.
//! It can be built with `with_*` methods or deserialized from the camelCase
//! option object used by host applications:
//!
//! ```
//! use u_curriculum::config::{PlannerConfig, Strategy};
//!
//! let config: PlannerConfig = serde_json::from_str(
//!     r#"{"strategy": "load-balanced", "maxCreditsPerSemester": 18, "includeSummerSemesters": false}"#,
//! ).unwrap();
//! assert_eq!(config.strategy, Strategy::LoadBalanced);
//! assert_eq!(config.max_credits_per_semester, Some(18));
//! assert!(config.enable_advanced_study);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

/// Factor applied to the regular-term credit cap when overload is allowed.
pub const OVERLOAD_FACTOR: f64 = 1.2;

/// Effective regular-term credit ceiling.
#[inline]
pub fn credit_ceiling(max_credits: u32, allow_overload: bool) -> f64 {
    if allow_overload {
        max_credits as f64 * OVERLOAD_FACTOR
    } else {
        max_credits as f64
    }
}

/// Course selection strategy for regular terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Descending composite priority.
    #[default]
    Balanced,
    /// Nominal term, unlocking power, required-first, earliest nominal term.
    Fast,
    /// Composite priority discounted by difficulty.
    LoadBalanced,
}

impl Strategy {
    /// Stable name used in logs and serialized output.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Balanced => "balanced",
            Strategy::Fast => "fast",
            Strategy::LoadBalanced => "load-balanced",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Weights of the composite priority score.
///
/// Higher score = schedule sooner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PriorityWeights {
    /// Bonus when the nominal term equals the current term.
    pub nominal_term: f64,
    /// Bonus for required courses.
    pub required: f64,
    /// Per dependent course.
    pub dependents: f64,
    /// Per prerequisite.
    pub prerequisites: f64,
    /// Per step of `(10 - expected_semester)`.
    pub early_placement: f64,
    /// Penalty per term of look-ahead.
    pub advance_penalty: f64,
    /// Penalty per difficulty point (load-balanced strategy only).
    pub difficulty: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            nominal_term: 2000.0,
            required: 1000.0,
            dependents: 100.0,
            prerequisites: 50.0,
            early_placement: 10.0,
            advance_penalty: 20.0,
            difficulty: 10.0,
        }
    }
}

/// Options for one planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlannerConfig {
    /// Regular-term selection strategy.
    pub strategy: Strategy,
    /// Credit cap per regular term. `None` = derived from the curriculum.
    pub max_credits_per_semester: Option<u32>,
    /// Credit floor per regular term. `None` = derived from the curriculum.
    pub min_credits_per_semester: Option<u32>,
    /// Term index the plan starts at.
    pub current_semester: u32,
    /// Allow taking courses ahead of their nominal term.
    pub enable_advanced_study: bool,
    /// Look-ahead window for advance study, in terms.
    pub advance_window: u32,
    /// Insert summer terms when a regular term has nothing ready.
    pub include_summer_semesters: bool,
    /// Allow regular terms up to 120% of the credit cap.
    pub allow_overload: bool,
    /// Pack term 1 from its nominal courses before the main loop.
    pub fixed_first_semester: bool,
    /// Credit cap for the fixed first term.
    pub first_term_credit_cap: u32,
    /// Credit cap per summer term.
    pub max_summer_credits: u32,
    /// Course cap per summer term.
    pub max_summer_courses: usize,
    /// Safety bound on loop iterations.
    pub max_terms: u32,
    /// Composite priority weights.
    pub weights: PriorityWeights,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Balanced,
            max_credits_per_semester: None,
            min_credits_per_semester: None,
            current_semester: 1,
            enable_advanced_study: true,
            advance_window: 4,
            include_summer_semesters: true,
            allow_overload: false,
            fixed_first_semester: false,
            first_term_credit_cap: 25,
            max_summer_credits: 12,
            max_summer_courses: 4,
            max_terms: 16,
            weights: PriorityWeights::default(),
        }
    }
}

impl PlannerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON option object. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Overrides the regular-term credit cap.
    pub fn with_max_credits(mut self, max_credits: u32) -> Self {
        self.max_credits_per_semester = Some(max_credits);
        self
    }

    /// Overrides the regular-term credit floor.
    pub fn with_min_credits(mut self, min_credits: u32) -> Self {
        self.min_credits_per_semester = Some(min_credits);
        self
    }

    /// Sets the starting term.
    pub fn with_current_semester(mut self, semester: u32) -> Self {
        self.current_semester = semester;
        self
    }

    /// Enables or disables advance study.
    pub fn with_advanced_study(mut self, enabled: bool) -> Self {
        self.enable_advanced_study = enabled;
        self
    }

    /// Sets the advance-study window.
    pub fn with_advance_window(mut self, window: u32) -> Self {
        self.advance_window = window;
        self
    }

    /// Enables or disables summer terms.
    pub fn with_summer(mut self, enabled: bool) -> Self {
        self.include_summer_semesters = enabled;
        self
    }

    /// Enables or disables overload.
    pub fn with_overload(mut self, allowed: bool) -> Self {
        self.allow_overload = allowed;
        self
    }

    /// Enables or disables the fixed first term.
    pub fn with_fixed_first_semester(mut self, enabled: bool) -> Self {
        self.fixed_first_semester = enabled;
        self
    }

    /// Sets the summer caps.
    pub fn with_summer_limits(mut self, max_credits: u32, max_courses: usize) -> Self {
        self.max_summer_credits = max_credits;
        self.max_summer_courses = max_courses;
        self
    }

    /// Sets the loop safety bound.
    pub fn with_max_terms(mut self, max_terms: u32) -> Self {
        self.max_terms = max_terms;
        self
    }

    /// Sets the priority weights.
    pub fn with_weights(mut self, weights: PriorityWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Look-ahead window in effect: the configured window when advance study
    /// is enabled, zero otherwise.
    pub fn effective_window(&self) -> u32 {
        if self.enable_advanced_study {
            self.advance_window
        } else {
            0
        }
    }

    /// Rejects option values that make planning meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.current_semester == 0 {
            return Err(PlanError::InvalidConfig(
                "currentSemester must be at least 1".into(),
            ));
        }
        if self.max_credits_per_semester == Some(0) {
            return Err(PlanError::InvalidConfig(
                "maxCreditsPerSemester must be positive".into(),
            ));
        }
        if let (Some(min), Some(max)) = (self.min_credits_per_semester, self.max_credits_per_semester)
        {
            if min > max {
                return Err(PlanError::InvalidConfig(format!(
                    "minCreditsPerSemester ({min}) exceeds maxCreditsPerSemester ({max})"
                )));
            }
        }
        if self.include_summer_semesters && (self.max_summer_courses == 0 || self.max_summer_credits == 0)
        {
            return Err(PlanError::InvalidConfig(
                "summer terms need positive maxSummerCredits and maxSummerCourses".into(),
            ));
        }
        if self.max_terms == 0 {
            return Err(PlanError::InvalidConfig("maxTerms must be positive".into()));
        }
        Ok(())
    }
}

/// Named configuration presets compared by the strategy comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlannerPreset {
    /// Nominal order only: no advance study, no summer, balanced ranking.
    Traditional,
    /// Advance study, no summer, balanced ranking.
    AdvanceStudy,
    /// Advance study with summer terms, fast ranking.
    AdvanceStudyWithSummer,
}

impl PlannerPreset {
    /// All presets in comparison order.
    pub const ALL: [PlannerPreset; 3] = [
        PlannerPreset::Traditional,
        PlannerPreset::AdvanceStudy,
        PlannerPreset::AdvanceStudyWithSummer,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            PlannerPreset::Traditional => "traditional",
            PlannerPreset::AdvanceStudy => "advance-study",
            PlannerPreset::AdvanceStudyWithSummer => "advance-study-with-summer",
        }
    }

    /// Applies the preset on top of a base configuration.
    pub fn apply(&self, base: &PlannerConfig) -> PlannerConfig {
        let config = base.clone();
        match self {
            PlannerPreset::Traditional => config
                .with_advanced_study(false)
                .with_summer(false)
                .with_strategy(Strategy::Balanced),
            PlannerPreset::AdvanceStudy => config
                .with_advanced_study(true)
                .with_summer(false)
                .with_strategy(Strategy::Balanced),
            PlannerPreset::AdvanceStudyWithSummer => config
                .with_advanced_study(true)
                .with_summer(true)
                .with_strategy(Strategy::Fast),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::default();
        assert_eq!(config.strategy, Strategy::Balanced);
        assert_eq!(config.current_semester, 1);
        assert_eq!(config.advance_window, 4);
        assert_eq!(config.max_terms, 16);
        assert!(config.max_credits_per_semester.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = PlannerConfig::from_json_str(
            r#"{"strategy": "fast", "allowOverload": true, "currentSemester": 3}"#,
        )
        .unwrap();
        assert_eq!(config.strategy, Strategy::Fast);
        assert!(config.allow_overload);
        assert_eq!(config.current_semester, 3);
        assert_eq!(config.max_summer_credits, 12);
        assert!((config.weights.required - 1000.0).abs() < 1e-10);
    }

    #[test]
    fn test_from_json_rejects_unknown_strategy() {
        let err = PlannerConfig::from_json_str(r#"{"strategy": "random"}"#).unwrap_err();
        assert!(matches!(err, PlanError::Json(_)));
    }

    #[test]
    fn test_validate_rejects_zero_cap() {
        let err = PlannerConfig::new().with_max_credits(0).validate().unwrap_err();
        assert!(matches!(err, PlanError::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let config = PlannerConfig::new().with_max_credits(12).with_min_credits(15);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_summer_caps_only_when_enabled() {
        let config = PlannerConfig::new().with_summer_limits(0, 0);
        assert!(config.validate().is_err());
        assert!(config.with_summer(false).validate().is_ok());
    }

    #[test]
    fn test_effective_window() {
        let config = PlannerConfig::new().with_advance_window(2);
        assert_eq!(config.effective_window(), 2);
        assert_eq!(config.with_advanced_study(false).effective_window(), 0);
    }

    #[test]
    fn test_presets() {
        let base = PlannerConfig::new().with_max_credits(20);

        let traditional = PlannerPreset::Traditional.apply(&base);
        assert!(!traditional.enable_advanced_study);
        assert!(!traditional.include_summer_semesters);
        assert_eq!(traditional.max_credits_per_semester, Some(20));

        let summer = PlannerPreset::AdvanceStudyWithSummer.apply(&base);
        assert!(summer.enable_advanced_study);
        assert!(summer.include_summer_semesters);
        assert_eq!(summer.strategy, Strategy::Fast);
    }

    #[test]
    fn test_credit_ceiling() {
        assert!((credit_ceiling(20, false) - 20.0).abs() < 1e-10);
        assert!((credit_ceiling(20, true) - 24.0).abs() < 1e-10);
    }

    #[test]
    fn test_strategy_serde_names() {
        assert_eq!(
            serde_json::to_value(Strategy::LoadBalanced).unwrap(),
            serde_json::json!("load-balanced")
        );
        assert_eq!(Strategy::Fast.to_string(), "fast");
    }
}
