//! Plan validator.
//!
//! Replays the plan term by term in chronological order, independently of
//! the planner's own state, and checks:
//! 1. Prerequisites completed in a strictly earlier term (or before the plan)
//! 2. Corequisites in the same term or completed earlier
//! 3. Regular-term credit floor and ceiling, summer credit cap
//! 4. Difficult-course concentration and regular-term credit spread
//! 5. Look-ahead distance of every course (summer terms reach
//!    `SUMMER_LOOKAHEAD` terms further)
//!
//! Structural curriculum issues are folded into the same result.

use tracing::debug;

use super::{IssueKind, PlanIssue, PlanStatistics, ValidationResult};
use crate::config::{credit_ceiling, PlannerConfig};
use crate::graph::CurriculumGraph;
use crate::models::{Plan, Term};
use crate::readiness::PlanState;
use crate::scheduler::SUMMER_LOOKAHEAD;
use crate::validation::{validate_curriculum, CurriculumIssue, CurriculumIssueKind};

/// Checks a finished plan against credit and dependency rules.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanValidator {
    /// Regular-term credit cap.
    pub max_credits: u32,
    /// Regular-term credit floor.
    pub min_credits: u32,
    /// Whether terms up to 120% of the cap are tolerated.
    pub allow_overload: bool,
    /// Summer-term credit cap.
    pub max_summer_credits: u32,
    /// Look-ahead window in terms.
    pub advance_window: u32,
}

impl PlanValidator {
    /// Difficulty at which a course counts as difficult.
    pub const DIFFICULT_THRESHOLD: u8 = 4;
    /// Difficult courses tolerated per regular term.
    pub const MAX_DIFFICULT_PER_TERM: usize = 2;
    /// Tolerated credit gap between the heaviest and lightest regular term.
    pub const MAX_CREDIT_SPREAD: u32 = 8;

    /// Creates a validator with the given regular-term bounds.
    pub fn new(max_credits: u32, min_credits: u32) -> Self {
        Self {
            max_credits,
            min_credits,
            allow_overload: false,
            max_summer_credits: 12,
            advance_window: 4,
        }
    }

    /// Creates a validator matching a planner configuration.
    pub fn from_config(config: &PlannerConfig, max_credits: u32, min_credits: u32) -> Self {
        Self {
            max_credits,
            min_credits,
            allow_overload: config.allow_overload,
            max_summer_credits: config.max_summer_credits,
            advance_window: config.effective_window(),
        }
    }

    /// Tolerates overload up to 120% of the cap.
    pub fn with_overload(mut self, allowed: bool) -> Self {
        self.allow_overload = allowed;
        self
    }

    /// Sets the summer credit cap.
    pub fn with_summer_cap(mut self, max_credits: u32) -> Self {
        self.max_summer_credits = max_credits;
        self
    }

    /// Sets the look-ahead window.
    pub fn with_advance_window(mut self, window: u32) -> Self {
        self.advance_window = window;
        self
    }

    /// Validates a plan.
    ///
    /// # Arguments
    /// * `plan` - The plan to check.
    /// * `graph` - Graph of the curriculum the plan was built from.
    /// * `completed` - Courses completed before the plan starts.
    pub fn validate<S: AsRef<str>>(
        &self,
        plan: &Plan,
        graph: &CurriculumGraph,
        completed: &[S],
    ) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if let Err(issues) = validate_curriculum(graph.courses()) {
            for issue in issues {
                let plan_issue = structural_issue(&issue);
                if plan_issue.kind == IssueKind::CyclicPrerequisites {
                    errors.push(plan_issue);
                } else {
                    warnings.push(plan_issue);
                }
            }
        }

        let terms = plan.chronological();
        let mut state = PlanState::from_completed(completed, graph.courses());
        for term in &terms {
            state = self.check_dependencies(term, state, graph, &mut errors, &mut warnings);
        }

        self.check_credits(&terms, &mut errors, &mut warnings);
        self.check_load_balance(&terms, &mut warnings);
        self.check_advance_study(&terms, &mut warnings);

        let statistics = PlanStatistics::calculate(plan, graph, completed);
        let is_valid = errors.is_empty();
        debug!(
            is_valid,
            errors = errors.len(),
            warnings = warnings.len(),
            "plan validated"
        );

        ValidationResult {
            is_valid,
            errors,
            warnings,
            statistics,
        }
    }

    /// Checks one term against the courses completed before it and returns
    /// the state after the term.
    fn check_dependencies(
        &self,
        term: &Term,
        before: PlanState,
        graph: &CurriculumGraph,
        errors: &mut Vec<PlanIssue>,
        warnings: &mut Vec<PlanIssue>,
    ) -> PlanState {
        let mut after = before.clone();
        for course in &term.courses {
            after.admit(course);
        }

        for course in &term.courses {
            let missing: Vec<String> = course
                .prerequisites
                .iter()
                .filter(|p| !before.is_taken(p))
                .cloned()
                .collect();
            if !missing.is_empty() {
                errors.push(
                    PlanIssue::new(
                        IssueKind::MissingPrerequisites,
                        format!(
                            "{} in {} is missing prerequisites: {}",
                            course.code,
                            term.term_ref(),
                            missing.join(", ")
                        ),
                    )
                    .at(term.term_ref())
                    .for_course(course.code.clone())
                    .with_related(missing),
                );
            }

            let missing: Vec<String> = course
                .corequisites
                .iter()
                .filter(|q| !covers(&after, graph, q))
                .cloned()
                .collect();
            if !missing.is_empty() {
                warnings.push(
                    PlanIssue::new(
                        IssueKind::MissingCorequisites,
                        format!(
                            "{} in {} is missing corequisites: {}",
                            course.code,
                            term.term_ref(),
                            missing.join(", ")
                        ),
                    )
                    .at(term.term_ref())
                    .for_course(course.code.clone())
                    .with_related(missing),
                );
            }
        }

        after
    }

    fn check_credits(
        &self,
        terms: &[&Term],
        errors: &mut Vec<PlanIssue>,
        warnings: &mut Vec<PlanIssue>,
    ) {
        let ceiling = credit_ceiling(self.max_credits, self.allow_overload);

        for term in terms {
            let credits = term.credit_total;
            if term.is_summer() {
                if credits > self.max_summer_credits {
                    warnings.push(
                        PlanIssue::new(
                            IssueKind::ExcessiveSummerCredits,
                            format!(
                                "{}: {} credits exceeds the summer cap of {}",
                                term.term_ref(),
                                credits,
                                self.max_summer_credits
                            ),
                        )
                        .at(term.term_ref()),
                    );
                }
                continue;
            }

            if credits < self.min_credits {
                warnings.push(
                    PlanIssue::new(
                        IssueKind::InsufficientCredits,
                        format!(
                            "{}: {} credits is below the minimum of {}",
                            term.term_ref(),
                            credits,
                            self.min_credits
                        ),
                    )
                    .at(term.term_ref()),
                );
            }

            if credits > self.max_credits {
                if self.allow_overload && credits as f64 <= ceiling {
                    warnings.push(
                        PlanIssue::new(
                            IssueKind::CreditOverload,
                            format!(
                                "{}: {} credits exceeds the cap of {} (overload)",
                                term.term_ref(),
                                credits,
                                self.max_credits
                            ),
                        )
                        .at(term.term_ref()),
                    );
                } else {
                    errors.push(
                        PlanIssue::new(
                            IssueKind::ExcessiveCredits,
                            format!(
                                "{}: {} credits exceeds the maximum of {}",
                                term.term_ref(),
                                credits,
                                ceiling.floor() as u32
                            ),
                        )
                        .at(term.term_ref()),
                    );
                }
            }
        }
    }

    fn check_load_balance(&self, terms: &[&Term], warnings: &mut Vec<PlanIssue>) {
        let regular: Vec<&&Term> = terms.iter().filter(|t| t.is_regular()).collect();

        for term in &regular {
            let difficult: Vec<String> = term
                .courses
                .iter()
                .filter(|c| c.effective_difficulty() >= Self::DIFFICULT_THRESHOLD)
                .map(|c| c.code.clone())
                .collect();
            if difficult.len() > Self::MAX_DIFFICULT_PER_TERM {
                warnings.push(
                    PlanIssue::new(
                        IssueKind::TooManyDifficultCourses,
                        format!(
                            "{} has {} difficult courses",
                            term.term_ref(),
                            difficult.len()
                        ),
                    )
                    .at(term.term_ref())
                    .with_related(difficult),
                );
            }
        }

        if regular.len() > 1 {
            let max = regular.iter().map(|t| t.credit_total).max().unwrap_or(0);
            let min = regular.iter().map(|t| t.credit_total).min().unwrap_or(0);
            if max - min > Self::MAX_CREDIT_SPREAD {
                warnings.push(PlanIssue::new(
                    IssueKind::UnbalancedLoadDistribution,
                    format!(
                        "regular terms range from {min} to {max} credits (difference {})",
                        max - min
                    ),
                ));
            }
        }
    }

    fn check_advance_study(&self, terms: &[&Term], warnings: &mut Vec<PlanIssue>) {
        for term in terms {
            let mut horizon = term.index.saturating_add(self.advance_window);
            if term.is_summer() {
                horizon = horizon.saturating_add(SUMMER_LOOKAHEAD);
            }
            for course in &term.courses {
                if course.expected_semester > horizon {
                    warnings.push(
                        PlanIssue::new(
                            IssueKind::ExcessiveAdvanceStudy,
                            format!(
                                "{} (nominal term {}) is scheduled in {}, beyond the {}-term window",
                                course.code,
                                course.expected_semester,
                                term.term_ref(),
                                self.advance_window
                            ),
                        )
                        .at(term.term_ref())
                        .for_course(course.code.clone()),
                    );
                }
            }
        }
    }
}

/// Whether a code is completed or discharged in the given state.
fn covers(state: &PlanState, graph: &CurriculumGraph, code: &str) -> bool {
    state.is_taken(code)
        || state.is_discharged(code)
        || graph.course(code).is_some_and(|c| state.is_settled(c))
}

fn structural_issue(issue: &CurriculumIssue) -> PlanIssue {
    let kind = match issue.kind {
        CurriculumIssueKind::CyclicDependency => IssueKind::CyclicPrerequisites,
        CurriculumIssueKind::DuplicateCode => IssueKind::DuplicateCourse,
        CurriculumIssueKind::UnknownPrerequisite
        | CurriculumIssueKind::UnknownCorequisite
        | CurriculumIssueKind::UnknownEquivalent => IssueKind::UnknownReference,
        CurriculumIssueKind::ZeroCredits | CurriculumIssueKind::DifficultyOutOfRange => {
            IssueKind::InvalidCourseData
        }
    };

    let mut plan_issue = PlanIssue::new(kind, issue.message.clone());
    if let Some(first) = issue.courses.first() {
        plan_issue = plan_issue.for_course(first.clone());
    }
    plan_issue.with_related(issue.courses.clone())
}
