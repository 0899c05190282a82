//! Greedy term packers.
//!
//! # Algorithm
//!
//! Single pass over the ranked course list:
//! 1. Skip courses already taken or discharged (possibly by an earlier
//!    bundle in the same pass).
//! 2. Build the bundle: the course plus every corequisite not yet taken.
//! 3. Admit the whole bundle if it fits the remaining capacity; otherwise
//!    skip the course. No partial bundles, no backtracking.
//!
//! Every admitted course is written through [`PlanState::admit`], which
//! also discharges its equivalents.
//!
//! # Complexity
//! O(n · q) where n = ranked courses, q = corequisites per course.
//!
//! # Reference
//! Martello & Toth (1990), "Knapsack Problems", Ch. 2.4 (greedy algorithms)

use std::collections::HashSet;

use crate::config::credit_ceiling;
use crate::graph::CurriculumGraph;
use crate::models::Course;
use crate::readiness::{ready_courses, AdvancePolicy, PlanState};

/// Credit cap above which practical courses are kept out of summer terms.
pub const SUMMER_PRACTICAL_MAX_CREDITS: u32 = 2;

/// Look-ahead of the summer packer, in terms past the current one.
pub const SUMMER_LOOKAHEAD: u32 = 2;

/// Capacity of one packing pass.
#[derive(Debug, Clone, Copy)]
struct Capacity {
    credits: f64,
    courses: Option<usize>,
}

/// Regular-term packer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermPacker {
    /// Credit cap.
    pub max_credits: u32,
    /// Allow up to 120% of the cap.
    pub allow_overload: bool,
}

impl TermPacker {
    /// Creates a packer with the given credit cap.
    pub fn new(max_credits: u32) -> Self {
        Self {
            max_credits,
            allow_overload: false,
        }
    }

    /// Enables or disables overload.
    pub fn with_overload(mut self, allowed: bool) -> Self {
        self.allow_overload = allowed;
        self
    }

    /// Effective credit ceiling.
    pub fn ceiling(&self) -> f64 {
        credit_ceiling(self.max_credits, self.allow_overload)
    }

    /// Packs one term from a ranked course list.
    ///
    /// Returns the admitted courses in admission order.
    pub fn pack(&self, ranked: &[&Course], graph: &CurriculumGraph, state: &mut PlanState) -> Vec<Course> {
        pack_greedy(
            ranked,
            graph,
            state,
            Capacity {
                credits: self.ceiling(),
                courses: None,
            },
        )
    }
}

/// Summer-term packer.
///
/// Looks [`SUMMER_LOOKAHEAD`] terms past the current one and keeps
/// practical courses out unless they are small. Bounded by both a credit
/// cap and a course-count cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummerPacker {
    /// Credit cap.
    pub max_credits: u32,
    /// Course-count cap.
    pub max_courses: usize,
}

impl SummerPacker {
    /// Creates a summer packer.
    pub fn new(max_credits: u32, max_courses: usize) -> Self {
        Self {
            max_credits,
            max_courses,
        }
    }

    /// Summer candidates after regular term `term`, in curriculum order.
    pub fn candidates<'a>(
        &self,
        graph: &'a CurriculumGraph,
        state: &PlanState,
        term: u32,
        policy: &AdvancePolicy,
    ) -> Vec<&'a Course> {
        ready_courses(
            graph.unique_courses(),
            state,
            term.saturating_add(SUMMER_LOOKAHEAD),
            policy,
        )
        .into_iter()
        .map(|r| r.course)
        .filter(|c| !c.is_practical || c.credits <= SUMMER_PRACTICAL_MAX_CREDITS)
        .collect()
    }

    /// Packs one summer term from a ranked candidate list.
    pub fn pack(&self, ranked: &[&Course], graph: &CurriculumGraph, state: &mut PlanState) -> Vec<Course> {
        pack_greedy(
            ranked,
            graph,
            state,
            Capacity {
                credits: self.max_credits as f64,
                courses: Some(self.max_courses),
            },
        )
    }
}

fn pack_greedy(
    ranked: &[&Course],
    graph: &CurriculumGraph,
    state: &mut PlanState,
    capacity: Capacity,
) -> Vec<Course> {
    let mut admitted: Vec<Course> = Vec::new();
    let mut admitted_codes: HashSet<String> = HashSet::new();
    let mut credits: u32 = 0;

    for &course in ranked {
        if capacity.courses.is_some_and(|max| admitted.len() >= max) {
            break;
        }
        if state.is_settled(course) {
            continue;
        }

        let Some(members) = bundle(course, graph, state, &admitted_codes) else {
            continue;
        };
        let bundle_credits = members
            .iter()
            .fold(0u32, |acc, c| acc.saturating_add(c.credits));

        if credits.saturating_add(bundle_credits) as f64 > capacity.credits {
            continue;
        }
        if capacity
            .courses
            .is_some_and(|max| admitted.len() + members.len() > max)
        {
            continue;
        }

        credits = credits.saturating_add(bundle_credits);
        for member in members {
            state.admit(member);
            admitted_codes.insert(member.code.clone());
            admitted.push(member.clone());
        }
    }

    admitted
}

/// The course plus its outstanding corequisites.
///
/// Corequisites that are unknown, already taken or discharged are left out.
/// Returns `None` when a bundled corequisite's prerequisites are not
/// completed before this term.
fn bundle<'a>(
    course: &'a Course,
    graph: &'a CurriculumGraph,
    state: &PlanState,
    admitted_now: &HashSet<String>,
) -> Option<Vec<&'a Course>> {
    let mut members = vec![course];

    for code in &course.corequisites {
        let Some(coreq) = graph.course(code) else {
            continue;
        };
        if coreq.code == course.code
            || state.is_settled(coreq)
            || members.iter().any(|m| m.code == coreq.code)
        {
            continue;
        }
        let prerequisites_met = coreq
            .prerequisites
            .iter()
            .all(|p| state.is_taken(p) && !admitted_now.contains(p));
        if !prerequisites_met {
            return None;
        }
        members.push(coreq);
    }

    Some(members)
}
