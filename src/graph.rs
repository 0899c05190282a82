//! Curriculum dependency graph.
//!
//! Forward edges (course → its prerequisites) and reverse edges
//! (course → courses that list it as a prerequisite), plus a code → course
//! lookup. Built fresh for every planning run in O(V + E).
//!
//! Reverse edges pointing at unknown codes are dropped. Cycle detection is
//! not done here; see [`crate::validation`].

use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::Course;

/// Prerequisite graph over a curriculum.
///
/// Owns its course records; lookups hand out indices into that arena or
/// shared references, never mutable aliases.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumGraph {
    /// code → prerequisite codes, in declaration order.
    prerequisites_of: BTreeMap<String, Vec<String>>,
    /// code → codes that list it as a prerequisite.
    dependents_of: BTreeMap<String, Vec<String>>,
    #[serde(skip)]
    courses: Vec<Course>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl CurriculumGraph {
    /// Builds the full graph.
    ///
    /// When a code appears more than once, the first record wins.
    pub fn build(courses: &[Course]) -> Self {
        let mut index: HashMap<String, usize> = HashMap::with_capacity(courses.len());
        let mut prerequisites_of = BTreeMap::new();
        let mut dependents_of: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (i, course) in courses.iter().enumerate() {
            if index.contains_key(&course.code) {
                continue;
            }
            index.insert(course.code.clone(), i);
            prerequisites_of.insert(course.code.clone(), course.prerequisites.clone());
            dependents_of.insert(course.code.clone(), Vec::new());
        }

        for (i, course) in courses.iter().enumerate() {
            if index.get(&course.code) != Some(&i) {
                continue;
            }
            for prereq in &course.prerequisites {
                if let Some(list) = dependents_of.get_mut(prereq) {
                    list.push(course.code.clone());
                }
            }
        }

        Self {
            prerequisites_of,
            dependents_of,
            courses: courses.to_vec(),
            index,
        }
    }

    /// Builds a graph scoped to remaining work.
    ///
    /// Completed courses, and courses with a completed equivalent, are
    /// removed from both edge maps. The course lookup keeps every record.
    pub fn build_remaining<S: AsRef<str>>(courses: &[Course], completed: &[S]) -> Self {
        let completed: HashSet<&str> = completed.iter().map(AsRef::as_ref).collect();
        let mut graph = Self::build(courses);

        for course in courses {
            let done = completed.contains(course.code.as_str())
                || course
                    .equivalents
                    .iter()
                    .any(|eq| completed.contains(eq.as_str()));
            if done {
                graph.prerequisites_of.remove(&course.code);
                graph.dependents_of.remove(&course.code);
            }
        }

        graph
    }

    /// Looks up a course by code.
    pub fn course(&self, code: &str) -> Option<&Course> {
        self.index.get(code).map(|&i| &self.courses[i])
    }

    /// Whether the code is a known course.
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Whether the code is still a node of the edge maps.
    pub fn has_node(&self, code: &str) -> bool {
        self.prerequisites_of.contains_key(code)
    }

    /// All course records in curriculum order (duplicates included).
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Unique courses in curriculum order (first record per code).
    pub fn unique_courses(&self) -> impl Iterator<Item = &Course> {
        self.courses
            .iter()
            .enumerate()
            .filter(move |(i, c)| self.index.get(&c.code) == Some(i))
            .map(|(_, c)| c)
    }

    /// Prerequisite codes of a course (empty if unknown).
    pub fn prerequisites_of(&self, code: &str) -> &[String] {
        self.prerequisites_of
            .get(code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Codes of courses that list `code` as a prerequisite.
    pub fn dependents_of(&self, code: &str) -> &[String] {
        self.dependents_of
            .get(code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of direct dependents.
    #[inline]
    pub fn dependent_count(&self, code: &str) -> usize {
        self.dependents_of(code).len()
    }

    /// Dependent counts for every node.
    pub fn dependent_counts(&self) -> HashMap<String, usize> {
        self.dependents_of
            .iter()
            .map(|(code, deps)| (code.clone(), deps.len()))
            .collect()
    }

    /// Number of nodes in the edge maps.
    pub fn node_count(&self) -> usize {
        self.prerequisites_of.len()
    }

    /// Number of resolved prerequisite edges.
    pub fn edge_count(&self) -> usize {
        self.dependents_of.values().map(Vec::len).sum()
    }

    /// Iterates over `(code, prerequisites)` pairs in code order.
    pub fn prerequisite_edges(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.prerequisites_of
            .iter()
            .map(|(code, prereqs)| (code.as_str(), prereqs.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_courses() -> Vec<Course> {
        vec![
            Course::new("A", 3),
            Course::new("B", 3).with_prerequisite("A"),
            Course::new("C", 3).with_prerequisite("A").with_prerequisite("B"),
            Course::new("D", 3).with_prerequisite("GHOST"),
            Course::new("E", 3).with_equivalent("A"),
        ]
    }

    #[test]
    fn test_forward_and_reverse_edges() {
        let graph = CurriculumGraph::build(&sample_courses());

        assert_eq!(graph.prerequisites_of("C"), &["A".to_string(), "B".to_string()]);
        assert_eq!(graph.dependents_of("A"), &["B".to_string(), "C".to_string()]);
        assert_eq!(graph.dependent_count("B"), 1);
        assert_eq!(graph.dependent_count("C"), 0);
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_unknown_prerequisite_dropped_from_reverse_edges() {
        let graph = CurriculumGraph::build(&sample_courses());

        assert_eq!(graph.prerequisites_of("D"), &["GHOST".to_string()]);
        assert!(graph.dependents_of("GHOST").is_empty());
        assert!(!graph.contains("GHOST"));
    }

    #[test]
    fn test_course_lookup() {
        let graph = CurriculumGraph::build(&sample_courses());
        assert_eq!(graph.course("B").map(|c| c.credits), Some(3));
        assert!(graph.course("Z").is_none());
        assert!(graph.prerequisites_of("Z").is_empty());
    }

    #[test]
    fn test_duplicate_code_first_wins() {
        let courses = vec![
            Course::new("A", 3),
            Course::new("A", 5).with_prerequisite("B"),
            Course::new("B", 2),
        ];
        let graph = CurriculumGraph::build(&courses);

        assert_eq!(graph.course("A").map(|c| c.credits), Some(3));
        assert!(graph.prerequisites_of("A").is_empty());
        assert!(graph.dependents_of("B").is_empty());
        assert_eq!(graph.unique_courses().count(), 2);
        assert_eq!(graph.courses().len(), 3);
    }

    #[test]
    fn test_build_remaining_removes_completed_and_equivalents() {
        let graph = CurriculumGraph::build_remaining(&sample_courses(), &["A"]);

        assert!(!graph.has_node("A"));
        assert!(!graph.has_node("E")); // equivalent of A
        assert!(graph.has_node("B"));
        assert!(graph.dependents_of("A").is_empty());
        // Records stay resolvable.
        assert!(graph.course("A").is_some());
    }

    #[test]
    fn test_empty_graph() {
        let graph = CurriculumGraph::build(&[]);
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_serializes_edge_maps() {
        let graph = CurriculumGraph::build(&sample_courses());
        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json["dependentsOf"]["A"], serde_json::json!(["B", "C"]));
        assert!(json.get("courses").is_none());
    }
}
