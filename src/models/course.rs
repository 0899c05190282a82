//! Course and curriculum models.
//!
//! A course is an immutable record identified by its code. A curriculum is
//! the ordered list of courses handed to the planner by a data loader.

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// Lowest accepted difficulty rating.
pub const MIN_DIFFICULTY: u8 = 1;
/// Highest accepted difficulty rating.
pub const MAX_DIFFICULTY: u8 = 5;

fn default_difficulty() -> u8 {
    MIN_DIFFICULTY
}

fn default_expected_semester() -> u32 {
    1
}

/// A course in the reference curriculum.
///
/// Relations are stored as course codes, never as references to other
/// records, so terms can hold owned copies without aliasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Unique course code.
    pub code: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Group or category (e.g. "core", "elective-ai").
    #[serde(default)]
    pub group: String,
    /// Credit value.
    pub credits: u32,
    /// Whether the course is mandatory.
    #[serde(default)]
    pub is_required: bool,
    /// Nominal term index in the reference curriculum (1-based).
    #[serde(default = "default_expected_semester")]
    pub expected_semester: u32,
    /// Difficulty rating, 1..=5.
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    /// Courses that must be completed in a strictly earlier term.
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// Courses that must be taken in the same term (or already completed).
    #[serde(default)]
    pub corequisites: Vec<String>,
    /// Courses that discharge this course's requirement when completed.
    #[serde(default)]
    pub equivalents: Vec<String>,
    /// Lab or practical course. Supplied by the data loader; the summer
    /// packer avoids these unless they are small.
    #[serde(default)]
    pub is_practical: bool,
}

impl Course {
    /// Creates a course with the given code and credits.
    ///
    /// Defaults: elective, nominal term 1, difficulty 1, no relations.
    pub fn new(code: impl Into<String>, credits: u32) -> Self {
        Self {
            code: code.into(),
            name: String::new(),
            group: String::new(),
            credits,
            is_required: false,
            expected_semester: 1,
            difficulty: MIN_DIFFICULTY,
            prerequisites: Vec::new(),
            corequisites: Vec::new(),
            equivalents: Vec::new(),
            is_practical: false,
        }
    }

    /// Sets the course name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the course group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Marks the course as required.
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Sets the nominal term.
    pub fn with_expected_semester(mut self, semester: u32) -> Self {
        self.expected_semester = semester;
        self
    }

    /// Sets the difficulty rating.
    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Adds a prerequisite.
    pub fn with_prerequisite(mut self, code: impl Into<String>) -> Self {
        self.prerequisites.push(code.into());
        self
    }

    /// Adds a corequisite.
    pub fn with_corequisite(mut self, code: impl Into<String>) -> Self {
        self.corequisites.push(code.into());
        self
    }

    /// Adds an equivalent course.
    pub fn with_equivalent(mut self, code: impl Into<String>) -> Self {
        self.equivalents.push(code.into());
        self
    }

    /// Marks the course as a lab/practical course.
    pub fn practical(mut self) -> Self {
        self.is_practical = true;
        self
    }

    /// Difficulty clamped into the accepted range.
    #[inline]
    pub fn effective_difficulty(&self) -> u8 {
        self.difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
    }

    /// Whether taking this course at `term` is ahead of its nominal term.
    #[inline]
    pub fn is_advance_at(&self, term: u32) -> bool {
        self.expected_semester > term
    }
}

/// An ordered collection of courses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Curriculum {
    courses: Vec<Course>,
}

impl Curriculum {
    /// Creates a curriculum from a course list, keeping the given order.
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// Parses a JSON array of course records.
    pub fn from_json_str(json: &str) -> Result<Self, PlanError> {
        let courses: Vec<Course> = serde_json::from_str(json)?;
        Ok(Self::new(courses))
    }

    /// Converts an already-parsed JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, PlanError> {
        let courses: Vec<Course> = serde_json::from_value(value)?;
        Ok(Self::new(courses))
    }

    /// All courses in curriculum order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the curriculum has no courses.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Finds a course by code (first match).
    pub fn get(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.code == code)
    }

    /// Sum of all course credits.
    pub fn total_credits(&self) -> u32 {
        self.courses
            .iter()
            .fold(0u32, |acc, c| acc.saturating_add(c.credits))
    }

    /// Highest nominal term across the curriculum (at least 1).
    pub fn term_count(&self) -> u32 {
        self.courses
            .iter()
            .map(|c| c.expected_semester.max(1))
            .max()
            .unwrap_or(1)
    }

    /// Mean credits per nominal term: total credits / highest nominal term.
    pub fn average_credits_per_term(&self) -> f64 {
        self.total_credits() as f64 / self.term_count() as f64
    }
}

impl From<Vec<Course>> for Curriculum {
    fn from(courses: Vec<Course>) -> Self {
        Self::new(courses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_builder() {
        let course = Course::new("CS201", 4)
            .with_name("Data Structures")
            .with_group("core")
            .required()
            .with_expected_semester(3)
            .with_difficulty(4)
            .with_prerequisite("CS101")
            .with_corequisite("CS201L")
            .with_equivalent("CS202");

        assert_eq!(course.code, "CS201");
        assert_eq!(course.credits, 4);
        assert!(course.is_required);
        assert_eq!(course.expected_semester, 3);
        assert_eq!(course.prerequisites, vec!["CS101".to_string()]);
        assert_eq!(course.corequisites, vec!["CS201L".to_string()]);
        assert_eq!(course.equivalents, vec!["CS202".to_string()]);
        assert!(!course.is_practical);
    }

    #[test]
    fn test_advance_at() {
        let course = Course::new("A", 3).with_expected_semester(3);
        assert!(course.is_advance_at(2));
        assert!(!course.is_advance_at(3));
        assert!(!course.is_advance_at(4));
    }

    #[test]
    fn test_effective_difficulty_clamped() {
        assert_eq!(Course::new("A", 3).with_difficulty(0).effective_difficulty(), 1);
        assert_eq!(Course::new("A", 3).with_difficulty(9).effective_difficulty(), 5);
        assert_eq!(Course::new("A", 3).with_difficulty(3).effective_difficulty(), 3);
    }

    #[test]
    fn test_curriculum_from_json_defaults() {
        let json = r#"[
            {"code": "MATH1", "name": "Calculus", "credits": 3, "isRequired": true, "expectedSemester": 1},
            {"code": "MATH2", "credits": 3, "prerequisites": ["MATH1"], "expectedSemester": 2, "difficulty": 4}
        ]"#;
        let curriculum = Curriculum::from_json_str(json).unwrap();

        assert_eq!(curriculum.len(), 2);
        let m1 = curriculum.get("MATH1").unwrap();
        assert_eq!(m1.difficulty, 1);
        assert!(m1.prerequisites.is_empty());
        assert!(m1.is_required);

        let m2 = curriculum.get("MATH2").unwrap();
        assert!(!m2.is_required);
        assert_eq!(m2.difficulty, 4);
        assert_eq!(m2.prerequisites, vec!["MATH1".to_string()]);
    }

    #[test]
    fn test_curriculum_from_json_error() {
        let err = Curriculum::from_json_str("[{\"code\": 1}]").unwrap_err();
        assert!(matches!(err, PlanError::Json(_)));
    }

    #[test]
    fn test_average_credits_per_term() {
        let curriculum = Curriculum::new(vec![
            Course::new("A", 4).with_expected_semester(1),
            Course::new("B", 4).with_expected_semester(2),
            Course::new("C", 4).with_expected_semester(4),
        ]);
        assert_eq!(curriculum.total_credits(), 12);
        assert_eq!(curriculum.term_count(), 4);
        assert!((curriculum.average_credits_per_term() - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_total_credits_saturates() {
        let curriculum = Curriculum::new(vec![Course::new("A", u32::MAX), Course::new("B", 3)]);
        assert_eq!(curriculum.total_credits(), u32::MAX);
    }

    #[test]
    fn test_empty_curriculum() {
        let curriculum = Curriculum::default();
        assert!(curriculum.is_empty());
        assert_eq!(curriculum.term_count(), 1);
        assert!((curriculum.average_credits_per_term() - 0.0).abs() < 1e-10);
    }
}
