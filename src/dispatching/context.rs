//! Ranking context for rule evaluation.

use std::collections::HashMap;

use crate::graph::CurriculumGraph;

/// Planning state passed to ranking rules.
///
/// Holds the term being filled and the dependent count of every course.
/// Counts are taken from the full curriculum graph once per run; the term
/// is moved forward with [`RankingContext::at_term`].
#[derive(Debug, Clone, Default)]
pub struct RankingContext {
    /// Term index being filled.
    pub current_term: u32,
    /// Direct dependents per course (code → count).
    pub dependent_counts: HashMap<String, usize>,
}

impl RankingContext {
    /// Creates a context for the given term with no graph data.
    pub fn new(current_term: u32) -> Self {
        Self {
            current_term,
            ..Default::default()
        }
    }

    /// Creates a context carrying the graph's dependent counts.
    pub fn from_graph(graph: &CurriculumGraph, current_term: u32) -> Self {
        Self {
            current_term,
            dependent_counts: graph.dependent_counts(),
        }
    }

    /// Returns the same context moved to another term.
    pub fn at_term(&self, current_term: u32) -> Self {
        Self {
            current_term,
            dependent_counts: self.dependent_counts.clone(),
        }
    }

    /// Sets the dependent count for a course.
    pub fn with_dependents(mut self, code: impl Into<String>, count: usize) -> Self {
        self.dependent_counts.insert(code.into(), count);
        self
    }

    /// Dependent count for a course (0 if unknown).
    #[inline]
    pub fn dependents(&self, code: &str) -> usize {
        self.dependent_counts.get(code).copied().unwrap_or(0)
    }
}
