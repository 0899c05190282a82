//! Post-hoc plan evaluation.
//!
//! Re-checks a finished plan independently of the planner's bookkeeping,
//! computes aggregate statistics and derives advisory recommendations.
//!
//! # Issue severity
//!
//! | Kind | Severity |
//! |------|----------|
//! | `MISSING_PREREQUISITES` | error |
//! | `EXCESSIVE_CREDITS` | error |
//! | `CYCLIC_PREREQUISITES` | error |
//! | everything else | warning |
//!
//! Errors set `is_valid = false`; warnings never do.

mod recommend;
mod statistics;
mod validator;

pub use recommend::{recommend, Recommendation, RecommendationKind, RecommendationPriority};
pub use statistics::{LoadBalance, PlanStatistics};
pub use validator::PlanValidator;

use serde::Serialize;

use crate::models::TermRef;

/// Category of a plan issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueKind {
    /// A prerequisite is not completed in a strictly earlier term.
    MissingPrerequisites,
    /// A corequisite is neither in the same term nor completed earlier.
    MissingCorequisites,
    /// Regular term above the hard credit ceiling.
    ExcessiveCredits,
    /// Regular term above the cap, within the overload allowance.
    CreditOverload,
    /// Regular term below the credit floor.
    InsufficientCredits,
    /// Summer term above its credit cap.
    ExcessiveSummerCredits,
    /// More than two difficulty ≥ 4 courses in one regular term.
    TooManyDifficultCourses,
    /// Heaviest and lightest regular terms differ by more than 8 credits.
    UnbalancedLoadDistribution,
    /// Course scheduled further ahead than the look-ahead window.
    ExcessiveAdvanceStudy,
    /// Prerequisite cycle in the curriculum.
    CyclicPrerequisites,
    /// Relation to a code missing from the curriculum.
    UnknownReference,
    /// Two curriculum records share a code.
    DuplicateCourse,
    /// Zero credits or difficulty out of range.
    InvalidCourseData,
}

impl IssueKind {
    /// Stable identifier, e.g. `"MISSING_PREREQUISITES"`.
    pub fn code(&self) -> &'static str {
        match self {
            IssueKind::MissingPrerequisites => "MISSING_PREREQUISITES",
            IssueKind::MissingCorequisites => "MISSING_COREQUISITES",
            IssueKind::ExcessiveCredits => "EXCESSIVE_CREDITS",
            IssueKind::CreditOverload => "CREDIT_OVERLOAD",
            IssueKind::InsufficientCredits => "INSUFFICIENT_CREDITS",
            IssueKind::ExcessiveSummerCredits => "EXCESSIVE_SUMMER_CREDITS",
            IssueKind::TooManyDifficultCourses => "TOO_MANY_DIFFICULT_COURSES",
            IssueKind::UnbalancedLoadDistribution => "UNBALANCED_LOAD_DISTRIBUTION",
            IssueKind::ExcessiveAdvanceStudy => "EXCESSIVE_ADVANCE_STUDY",
            IssueKind::CyclicPrerequisites => "CYCLIC_PREREQUISITES",
            IssueKind::UnknownReference => "UNKNOWN_REFERENCE",
            IssueKind::DuplicateCourse => "DUPLICATE_COURSE",
            IssueKind::InvalidCourseData => "INVALID_COURSE_DATA",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A typed violation found in a plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanIssue {
    /// Issue category.
    pub kind: IssueKind,
    /// Term the issue was found in, if any.
    pub term: Option<TermRef>,
    /// Course the issue is about, if any.
    pub course: Option<String>,
    /// Other codes involved (missing prerequisites, cycle members, ...).
    pub related: Vec<String>,
    /// Human-readable description.
    pub message: String,
}

impl PlanIssue {
    /// Creates an issue with no location.
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            term: None,
            course: None,
            related: Vec::new(),
            message: message.into(),
        }
    }

    /// Sets the term.
    pub fn at(mut self, term: TermRef) -> Self {
        self.term = Some(term);
        self
    }

    /// Sets the course.
    pub fn for_course(mut self, code: impl Into<String>) -> Self {
        self.course = Some(code.into());
        self
    }

    /// Sets the related codes.
    pub fn with_related(mut self, related: Vec<String>) -> Self {
        self.related = related;
        self
    }
}

/// Result of validating a plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// No errors were found.
    pub is_valid: bool,
    /// Plan-invalidating violations.
    pub errors: Vec<PlanIssue>,
    /// Advisory findings.
    pub warnings: Vec<PlanIssue>,
    /// Aggregate plan statistics.
    pub statistics: PlanStatistics,
}

impl ValidationResult {
    /// Whether an error of the given kind was raised.
    pub fn has_error(&self, kind: IssueKind) -> bool {
        self.errors.iter().any(|i| i.kind == kind)
    }

    /// Whether a warning of the given kind was raised.
    pub fn has_warning(&self, kind: IssueKind) -> bool {
        self.warnings.iter().any(|i| i.kind == kind)
    }

    /// All issues, errors first.
    pub fn issues(&self) -> impl Iterator<Item = &PlanIssue> {
        self.errors.iter().chain(self.warnings.iter())
    }
}
