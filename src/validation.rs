//! Structural validation of curriculum input.
//!
//! Checks the integrity of the course list before planning. Detects:
//! - Duplicate course codes
//! - Prerequisite, corequisite and equivalent references to unknown codes
//! - Circular prerequisite chains (DAG validation)
//! - Zero-credit courses and out-of-range difficulty ratings
//!
//! The planner tolerates all of these; they are reported, not raised.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::graph::CurriculumGraph;
use crate::models::{Course, MAX_DIFFICULTY, MIN_DIFFICULTY};

/// Validation outcome.
pub type CurriculumCheck = Result<(), Vec<CurriculumIssue>>;

/// A structural problem in the curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurriculumIssue {
    /// Issue category.
    pub kind: CurriculumIssueKind,
    /// Course codes involved (for cycles: the cycle in dependency order).
    pub courses: Vec<String>,
    /// Human-readable description.
    pub message: String,
}

/// Categories of structural problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CurriculumIssueKind {
    /// Two records share a code.
    DuplicateCode,
    /// A prerequisite code is not in the curriculum.
    UnknownPrerequisite,
    /// A corequisite code is not in the curriculum.
    UnknownCorequisite,
    /// An equivalent code is not in the curriculum.
    UnknownEquivalent,
    /// Prerequisite graph contains a cycle.
    CyclicDependency,
    /// Course has zero credits.
    ZeroCredits,
    /// Difficulty outside 1..=5.
    DifficultyOutOfRange,
}

impl CurriculumIssue {
    fn new(
        kind: CurriculumIssueKind,
        courses: Vec<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            courses,
            message: message.into(),
        }
    }
}

/// Validates a curriculum.
///
/// Checks:
/// 1. No duplicate course codes
/// 2. Every relation points to a known course
/// 3. Every course has positive credits and a difficulty in 1..=5
/// 4. No circular prerequisite chains
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(issues)` with all detected problems.
pub fn validate_curriculum(courses: &[Course]) -> CurriculumCheck {
    let mut issues = Vec::new();

    let mut codes = HashSet::new();
    for course in courses {
        if !codes.insert(course.code.as_str()) {
            issues.push(CurriculumIssue::new(
                CurriculumIssueKind::DuplicateCode,
                vec![course.code.clone()],
                format!("Duplicate course code: {}", course.code),
            ));
        }
    }

    for course in courses {
        check_references(
            course,
            &course.prerequisites,
            &codes,
            CurriculumIssueKind::UnknownPrerequisite,
            "prerequisite",
            &mut issues,
        );
        check_references(
            course,
            &course.corequisites,
            &codes,
            CurriculumIssueKind::UnknownCorequisite,
            "corequisite",
            &mut issues,
        );
        check_references(
            course,
            &course.equivalents,
            &codes,
            CurriculumIssueKind::UnknownEquivalent,
            "equivalent",
            &mut issues,
        );

        if course.credits == 0 {
            issues.push(CurriculumIssue::new(
                CurriculumIssueKind::ZeroCredits,
                vec![course.code.clone()],
                format!("Course '{}' has zero credits", course.code),
            ));
        }
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&course.difficulty) {
            issues.push(CurriculumIssue::new(
                CurriculumIssueKind::DifficultyOutOfRange,
                vec![course.code.clone()],
                format!(
                    "Course '{}' has difficulty {} outside {MIN_DIFFICULTY}..={MAX_DIFFICULTY}",
                    course.code, course.difficulty
                ),
            ));
        }
    }

    issues.extend(detect_cycles(&CurriculumGraph::build(courses)));

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

fn check_references(
    course: &Course,
    references: &[String],
    codes: &HashSet<&str>,
    kind: CurriculumIssueKind,
    label: &str,
    issues: &mut Vec<CurriculumIssue>,
) {
    for code in references {
        if !codes.contains(code.as_str()) {
            issues.push(CurriculumIssue::new(
                kind,
                vec![course.code.clone(), code.clone()],
                format!(
                    "Course '{}' references unknown {label} '{code}'",
                    course.code
                ),
            ));
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    White,
    Gray,
    Black,
}

/// Detects prerequisite cycles using a three-colour DFS.
///
/// Nodes are visited in code order, so the reported cycles are
/// deterministic. Each back edge yields one issue listing the cycle.
///
/// # Reference
/// Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.3
pub fn detect_cycles(graph: &CurriculumGraph) -> Vec<CurriculumIssue> {
    let mut marks: HashMap<&str, Mark> = graph
        .prerequisite_edges()
        .map(|(code, _)| (code, Mark::White))
        .collect();
    let mut stack: Vec<&str> = Vec::new();
    let mut issues = Vec::new();

    let nodes: Vec<&str> = graph.prerequisite_edges().map(|(code, _)| code).collect();
    for node in nodes {
        if marks.get(node) == Some(&Mark::White) {
            visit(node, graph, &mut marks, &mut stack, &mut issues);
        }
    }

    issues
}

fn visit<'a>(
    node: &'a str,
    graph: &'a CurriculumGraph,
    marks: &mut HashMap<&'a str, Mark>,
    stack: &mut Vec<&'a str>,
    issues: &mut Vec<CurriculumIssue>,
) {
    marks.insert(node, Mark::Gray);
    stack.push(node);

    for next in graph.prerequisites_of(node) {
        match marks.get(next.as_str()) {
            Some(Mark::Gray) => {
                // Back edge: the cycle is the stack suffix starting at `next`.
                let start = stack.iter().position(|&c| c == next).unwrap_or(0);
                let cycle: Vec<String> = stack[start..].iter().map(|c| c.to_string()).collect();
                issues.push(CurriculumIssue::new(
                    CurriculumIssueKind::CyclicDependency,
                    cycle.clone(),
                    format!("Circular prerequisite chain: {}", cycle.join(" -> ")),
                ));
            }
            Some(Mark::White) => visit(next.as_str(), graph, marks, stack, issues),
            // Finished, or unknown code.
            _ => {}
        }
    }

    stack.pop();
    marks.insert(node, Mark::Black);
}

/// Codes that sit on a prerequisite cycle.
pub fn cyclic_courses(issues: &[CurriculumIssue]) -> HashSet<String> {
    issues
        .iter()
        .filter(|i| i.kind == CurriculumIssueKind::CyclicDependency)
        .flat_map(|i| i.courses.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_courses() -> Vec<Course> {
        vec![
            Course::new("A", 3),
            Course::new("B", 3).with_prerequisite("A"),
            Course::new("C", 3)
                .with_prerequisite("B")
                .with_corequisite("CL"),
            Course::new("CL", 1).with_corequisite("C"),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_curriculum(&sample_courses()).is_ok());
    }

    #[test]
    fn test_duplicate_code() {
        let courses = vec![Course::new("A", 3), Course::new("A", 4)];
        let issues = validate_curriculum(&courses).unwrap_err();
        assert!(issues
            .iter()
            .any(|i| i.kind == CurriculumIssueKind::DuplicateCode));
    }

    #[test]
    fn test_unknown_references() {
        let courses = vec![Course::new("A", 3)
            .with_prerequisite("X")
            .with_corequisite("Y")
            .with_equivalent("Z")];
        let issues = validate_curriculum(&courses).unwrap_err();

        let kinds: Vec<_> = issues.iter().map(|i| i.kind).collect();
        assert!(kinds.contains(&CurriculumIssueKind::UnknownPrerequisite));
        assert!(kinds.contains(&CurriculumIssueKind::UnknownCorequisite));
        assert!(kinds.contains(&CurriculumIssueKind::UnknownEquivalent));
        assert_eq!(issues.len(), 3);
    }

    #[test]
    fn test_zero_credits_and_difficulty() {
        let courses = vec![Course::new("A", 0), Course::new("B", 3).with_difficulty(7)];
        let issues = validate_curriculum(&courses).unwrap_err();
        assert!(issues
            .iter()
            .any(|i| i.kind == CurriculumIssueKind::ZeroCredits && i.courses == ["A"]));
        assert!(issues
            .iter()
            .any(|i| i.kind == CurriculumIssueKind::DifficultyOutOfRange && i.courses == ["B"]));
    }

    #[test]
    fn test_cyclic_dependency() {
        // A → C → B → A
        let courses = vec![
            Course::new("A", 3).with_prerequisite("C"),
            Course::new("B", 3).with_prerequisite("A"),
            Course::new("C", 3).with_prerequisite("B"),
            Course::new("D", 3),
        ];
        let issues = validate_curriculum(&courses).unwrap_err();
        let cycles: Vec<_> = issues
            .iter()
            .filter(|i| i.kind == CurriculumIssueKind::CyclicDependency)
            .collect();

        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].courses.len(), 3);

        let on_cycle = cyclic_courses(&issues);
        assert!(on_cycle.contains("A") && on_cycle.contains("B") && on_cycle.contains("C"));
        assert!(!on_cycle.contains("D"));
    }

    #[test]
    fn test_self_loop() {
        let courses = vec![Course::new("A", 3).with_prerequisite("A")];
        let issues = validate_curriculum(&courses).unwrap_err();
        assert!(issues
            .iter()
            .any(|i| i.kind == CurriculumIssueKind::CyclicDependency && i.courses == ["A"]));
    }

    #[test]
    fn test_no_cycle_in_diamond() {
        // A → B, A → C, B + C → D
        let courses = vec![
            Course::new("A", 3),
            Course::new("B", 3).with_prerequisite("A"),
            Course::new("C", 3).with_prerequisite("A"),
            Course::new("D", 3).with_prerequisite("B").with_prerequisite("C"),
        ];
        assert!(detect_cycles(&CurriculumGraph::build(&courses)).is_empty());
    }

    #[test]
    fn test_multiple_issues() {
        let courses = vec![
            Course::new("A", 0),
            Course::new("A", 3),
            Course::new("B", 3).with_prerequisite("NOPE"),
        ];
        let issues = validate_curriculum(&courses).unwrap_err();
        assert!(issues.len() >= 3);
    }
}
