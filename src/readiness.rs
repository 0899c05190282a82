//! Readiness evaluation.
//!
//! Decides which courses may legally be taken at a given term, given what
//! has been completed so far and the advance-study policy. Ordering is left
//! to the ranker.

use std::collections::HashSet;

use crate::models::Course;

/// Mutable bookkeeping owned by one planning run.
///
/// `taken` only grows. `discharged` holds codes whose requirement is met
/// through an equivalent; a discharged course is never scheduled itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanState {
    taken: HashSet<String>,
    discharged: HashSet<String>,
}

impl PlanState {
    /// Seeds the state from the caller's completed-course list.
    ///
    /// Equivalents of completed courses are discharged as well.
    pub fn from_completed<S: AsRef<str>>(completed: &[S], courses: &[Course]) -> Self {
        let mut state = Self {
            taken: completed.iter().map(|c| c.as_ref().to_string()).collect(),
            discharged: HashSet::new(),
        };
        for course in courses {
            if state.taken.contains(&course.code) {
                state.discharge_equivalents(course);
            }
        }
        state
    }

    /// Whether the course has been completed.
    #[inline]
    pub fn is_taken(&self, code: &str) -> bool {
        self.taken.contains(code)
    }

    /// Whether the course's requirement is met through an equivalent.
    #[inline]
    pub fn is_discharged(&self, code: &str) -> bool {
        self.discharged.contains(code)
    }

    /// Whether the course no longer needs scheduling: taken, discharged,
    /// or one of its equivalents is taken.
    pub fn is_settled(&self, course: &Course) -> bool {
        self.is_taken(&course.code)
            || self.is_discharged(&course.code)
            || course.equivalents.iter().any(|eq| self.is_taken(eq))
    }

    /// Records a course as completed and discharges its equivalents.
    pub fn admit(&mut self, course: &Course) {
        self.taken.insert(course.code.clone());
        self.discharge_equivalents(course);
    }

    fn discharge_equivalents(&mut self, course: &Course) {
        for eq in &course.equivalents {
            if !self.taken.contains(eq) {
                self.discharged.insert(eq.clone());
            }
        }
    }

    /// Completed course codes.
    pub fn taken(&self) -> &HashSet<String> {
        &self.taken
    }

    /// Discharged course codes.
    pub fn discharged(&self) -> &HashSet<String> {
        &self.discharged
    }
}

/// Advance-study gate on a course's nominal term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvancePolicy {
    /// Whether advance study is allowed.
    pub enabled: bool,
    /// Look-ahead window in terms.
    pub window: u32,
}

impl AdvancePolicy {
    /// Default look-ahead: two years.
    pub const DEFAULT_WINDOW: u32 = 4;

    /// Advance study allowed within `window` terms.
    pub fn enabled(window: u32) -> Self {
        Self {
            enabled: true,
            window,
        }
    }

    /// Nominal order only.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            window: 0,
        }
    }

    /// Highest nominal term admissible at `term`.
    #[inline]
    pub fn horizon(&self, term: u32) -> u32 {
        if self.enabled {
            term.saturating_add(self.window)
        } else {
            term
        }
    }

    /// Whether the nominal-term gate admits the course at `term`.
    #[inline]
    pub fn admits(&self, course: &Course, term: u32) -> bool {
        course.expected_semester <= self.horizon(term)
    }
}

impl Default for AdvancePolicy {
    fn default() -> Self {
        Self::enabled(Self::DEFAULT_WINDOW)
    }
}

/// A course that may be taken now.
#[derive(Debug, Clone, Copy)]
pub struct ReadyCourse<'a> {
    /// The course record.
    pub course: &'a Course,
    /// Taken ahead of its nominal term.
    pub is_advance_study: bool,
}

/// Whether a single course is ready at `term`.
///
/// Ready iff it is not settled, every prerequisite is taken, and the
/// advance-study gate admits it.
pub fn is_ready(course: &Course, state: &PlanState, term: u32, policy: &AdvancePolicy) -> bool {
    !state.is_settled(course)
        && course.prerequisites.iter().all(|p| state.is_taken(p))
        && policy.admits(course, term)
}

/// Filters the curriculum down to the courses ready at `term`.
///
/// Keeps curriculum order; no priority ordering is applied.
pub fn ready_courses<'a>(
    courses: impl IntoIterator<Item = &'a Course>,
    state: &PlanState,
    term: u32,
    policy: &AdvancePolicy,
) -> Vec<ReadyCourse<'a>> {
    courses
        .into_iter()
        .filter(|c| is_ready(c, state, term, policy))
        .map(|course| ReadyCourse {
            course,
            is_advance_study: course.is_advance_at(term),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_courses() -> Vec<Course> {
        vec![
            Course::new("A", 3).with_expected_semester(1),
            Course::new("B", 3).with_expected_semester(2).with_prerequisite("A"),
            Course::new("C", 3).with_expected_semester(3),
            Course::new("D", 3).with_expected_semester(6),
            Course::new("E", 3).with_expected_semester(1).with_equivalent("A"),
        ]
    }

    fn codes(ready: &[ReadyCourse<'_>]) -> Vec<String> {
        ready.iter().map(|r| r.course.code.clone()).collect()
    }

    #[test]
    fn test_prerequisites_gate() {
        let courses = sample_courses();
        let state = PlanState::default();
        let ready = ready_courses(&courses, &state, 1, &AdvancePolicy::default());
        assert_eq!(codes(&ready), vec!["A", "C", "E"]);
    }

    #[test]
    fn test_advance_disabled() {
        let courses = sample_courses();
        let state = PlanState::default();
        let ready = ready_courses(&courses, &state, 1, &AdvancePolicy::disabled());
        assert_eq!(codes(&ready), vec!["A", "E"]);
    }

    #[test]
    fn test_advance_window() {
        let courses = sample_courses();
        let state = PlanState::default();

        // D (nominal 6) needs window ≥ 5 at term 1.
        let narrow = ready_courses(&courses, &state, 1, &AdvancePolicy::enabled(4));
        assert!(!codes(&narrow).contains(&"D".to_string()));
        let wide = ready_courses(&courses, &state, 2, &AdvancePolicy::enabled(4));
        assert!(codes(&wide).contains(&"D".to_string()));
    }

    #[test]
    fn test_advance_annotation() {
        let courses = sample_courses();
        let state = PlanState::default();
        let ready = ready_courses(&courses, &state, 1, &AdvancePolicy::default());
        let c = ready.iter().find(|r| r.course.code == "C").unwrap();
        assert!(c.is_advance_study);
        let a = ready.iter().find(|r| r.course.code == "A").unwrap();
        assert!(!a.is_advance_study);
    }

    #[test]
    fn test_equivalent_taken_excludes_course() {
        let courses = sample_courses();
        let state = PlanState::from_completed(&["A"], &courses);

        let ready = ready_courses(&courses, &state, 2, &AdvancePolicy::default());
        let ready = codes(&ready);
        assert!(!ready.contains(&"A".to_string()));
        // E lists A as an equivalent.
        assert!(!ready.contains(&"E".to_string()));
        assert!(ready.contains(&"B".to_string()));
    }

    #[test]
    fn test_admit_discharges_equivalents() {
        let courses = sample_courses();
        let mut state = PlanState::default();
        state.admit(&courses[4]); // E ≡ A

        assert!(state.is_taken("E"));
        assert!(state.is_discharged("A"));
        assert!(!state.is_taken("A"));
        assert!(state.is_settled(&courses[0]));
        // A is discharged, so B (needs A taken) stays blocked.
        assert!(!is_ready(&courses[1], &state, 2, &AdvancePolicy::default()));
    }

    #[test]
    fn test_from_completed_unknown_codes_kept() {
        let state = PlanState::from_completed(&["X"], &sample_courses());
        assert!(state.is_taken("X"));
        assert!(state.discharged().is_empty());
    }
}
