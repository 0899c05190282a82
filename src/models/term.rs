//! Term and plan (solution) models.
//!
//! A plan is the ordered list of terms emitted by the planner. Regular terms
//! are numbered 1, 2, 3, ...; a summer term inserted after regular term `t`
//! sits at position `t + 0.5`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::Course;

/// Regular or summer term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermKind {
    /// Regular semester.
    Regular,
    /// Summer session following the regular term with the same index.
    Summer,
}

/// Identifies a term within a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TermRef {
    /// Regular term index (a summer term carries the index it follows).
    pub index: u32,
    /// Term kind.
    pub kind: TermKind,
}

impl TermRef {
    /// Position on the plan timeline: `index`, or `index + 0.5` for summer.
    pub fn position(&self) -> f64 {
        match self.kind {
            TermKind::Regular => self.index as f64,
            TermKind::Summer => self.index as f64 + 0.5,
        }
    }
}

impl std::fmt::Display for TermRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TermKind::Regular => write!(f, "term {}", self.index),
            TermKind::Summer => write!(f, "summer {}.5", self.index),
        }
    }
}

/// Load metrics for one term.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermLoad {
    /// Sum of credits.
    pub total_credits: u32,
    /// Number of required courses.
    pub required_count: usize,
    /// Number of elective courses.
    pub elective_count: usize,
    /// Mean difficulty (0.0 for an empty term).
    pub average_difficulty: f64,
}

impl TermLoad {
    /// Computes load metrics for a course list.
    pub fn from_courses(courses: &[Course]) -> Self {
        let required_count = courses.iter().filter(|c| c.is_required).count();
        let average_difficulty = if courses.is_empty() {
            0.0
        } else {
            let sum: u32 = courses.iter().map(|c| c.effective_difficulty() as u32).sum();
            sum as f64 / courses.len() as f64
        };

        Self {
            total_credits: courses.iter().fold(0u32, |acc, c| acc.saturating_add(c.credits)),
            required_count,
            elective_count: courses.len() - required_count,
            average_difficulty,
        }
    }
}

/// One scheduling period of a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    /// Regular term index (summer terms carry the index they follow).
    pub index: u32,
    /// Term kind.
    pub kind: TermKind,
    /// Academic year: `ceil(index / 2)`.
    pub year: u32,
    /// Scheduled courses in admission order.
    pub courses: Vec<Course>,
    /// Sum of course credits.
    pub credit_total: u32,
    /// Load metrics.
    pub load: TermLoad,
    /// Packed by the fixed-first-term rule instead of the ranker.
    #[serde(default)]
    pub is_fixed: bool,
}

impl Term {
    /// Creates a regular term.
    pub fn regular(index: u32, courses: Vec<Course>) -> Self {
        Self::build(index, TermKind::Regular, courses)
    }

    /// Creates a summer term following regular term `after_index`.
    pub fn summer(after_index: u32, courses: Vec<Course>) -> Self {
        Self::build(after_index, TermKind::Summer, courses)
    }

    fn build(index: u32, kind: TermKind, courses: Vec<Course>) -> Self {
        let load = TermLoad::from_courses(&courses);
        Self {
            index,
            kind,
            year: year_of(index),
            credit_total: load.total_credits,
            courses,
            load,
            is_fixed: false,
        }
    }

    /// Marks the term as fixed.
    pub fn fixed(mut self) -> Self {
        self.is_fixed = true;
        self
    }

    /// Reference to this term.
    pub fn term_ref(&self) -> TermRef {
        TermRef {
            index: self.index,
            kind: self.kind,
        }
    }

    /// Position on the plan timeline.
    pub fn position(&self) -> f64 {
        self.term_ref().position()
    }

    /// Whether this is a regular term.
    #[inline]
    pub fn is_regular(&self) -> bool {
        self.kind == TermKind::Regular
    }

    /// Whether this is a summer term.
    #[inline]
    pub fn is_summer(&self) -> bool {
        self.kind == TermKind::Summer
    }

    /// Course codes in admission order.
    pub fn codes(&self) -> Vec<&str> {
        self.courses.iter().map(|c| c.code.as_str()).collect()
    }
}

/// Academic year of a regular term index.
#[inline]
pub fn year_of(index: u32) -> u32 {
    index.div_ceil(2)
}

/// An ordered sequence of terms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan {
    /// Terms in chronological order.
    pub terms: Vec<Term>,
}

impl Plan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a term.
    pub fn push(&mut self, term: Term) {
        self.terms.push(term);
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the plan has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms sorted chronologically (regular `t` before summer `t.5`).
    pub fn chronological(&self) -> Vec<&Term> {
        let mut terms: Vec<&Term> = self.terms.iter().collect();
        terms.sort_by_key(|t| t.term_ref());
        terms
    }

    /// Regular terms only.
    pub fn regular_terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.iter().filter(|t| t.is_regular())
    }

    /// Summer terms only.
    pub fn summer_terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.iter().filter(|t| t.is_summer())
    }

    /// All scheduled course codes.
    pub fn scheduled_codes(&self) -> HashSet<&str> {
        self.terms
            .iter()
            .flat_map(|t| t.courses.iter().map(|c| c.code.as_str()))
            .collect()
    }

    /// Total credits over all terms.
    pub fn total_credits(&self) -> u32 {
        self.terms
            .iter()
            .fold(0u32, |acc, t| acc.saturating_add(t.credit_total))
    }
}
