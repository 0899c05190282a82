//! Advisory recommendations derived from a finished plan.

use serde::Serialize;

use crate::graph::CurriculumGraph;
use crate::models::Plan;
use crate::readiness::PlanState;

/// Credit spread between regular terms that triggers a load-balancing hint.
pub const LOAD_SPREAD_THRESHOLD: u32 = 6;
/// Dependent count at which a course is a bottleneck.
pub const BOTTLENECK_DEPENDENTS: usize = 3;

/// Recommendation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationKind {
    /// Regular terms are unevenly loaded.
    LoadBalancing,
    /// Low-risk electives left unscheduled.
    AdvancedStudyOpportunity,
    /// Courses that unlock many others.
    PrerequisiteBottleneck,
}

/// Recommendation urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    Low,
    Medium,
    /// Act before the next planning run.
    High,
}

/// A human-facing suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Category.
    pub kind: RecommendationKind,
    /// Urgency.
    pub priority: RecommendationPriority,
    /// What was found.
    pub description: String,
    /// What to do about it.
    pub suggestion: String,
    /// Courses involved.
    pub courses: Vec<String>,
}

/// Derives recommendations from a plan.
///
/// Pure function of the plan and the curriculum graph:
/// - `LOAD_BALANCING` (medium): regular-term spread above 6 credits
/// - `ADVANCED_STUDY_OPPORTUNITY` (low): unscheduled electives with at most
///   one prerequisite and at most 3 credits
/// - `PREREQUISITE_BOTTLENECK` (high): courses with 3+ dependents, most
///   dependents first
pub fn recommend<S: AsRef<str>>(
    plan: &Plan,
    graph: &CurriculumGraph,
    completed: &[S],
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    let loads: Vec<u32> = plan.regular_terms().map(|t| t.credit_total).collect();
    if loads.len() > 1 {
        let max = loads.iter().copied().max().unwrap_or(0);
        let min = loads.iter().copied().min().unwrap_or(0);
        if max - min > LOAD_SPREAD_THRESHOLD {
            let heavy: Vec<String> = plan
                .regular_terms()
                .filter(|t| t.credit_total == max)
                .flat_map(|t| t.courses.iter().filter(|c| !c.is_required))
                .map(|c| c.code.clone())
                .collect();
            recommendations.push(Recommendation {
                kind: RecommendationKind::LoadBalancing,
                priority: RecommendationPriority::Medium,
                description: format!("Regular-term load differs by {} credits", max - min),
                suggestion: "Move electives from the heaviest term to a lighter one".into(),
                courses: heavy,
            });
        }
    }

    let mut state = PlanState::from_completed(completed, graph.courses());
    for course in plan.terms.iter().flat_map(|t| t.courses.iter()) {
        state.admit(course);
    }
    let missed: Vec<String> = graph
        .unique_courses()
        .filter(|c| !state.is_settled(c))
        .filter(|c| !c.is_required && c.prerequisites.len() <= 1 && c.credits <= 3)
        .map(|c| c.code.clone())
        .collect();
    if !missed.is_empty() {
        recommendations.push(Recommendation {
            kind: RecommendationKind::AdvancedStudyOpportunity,
            priority: RecommendationPriority::Low,
            description: format!("{} advance-study opportunities", missed.len()),
            suggestion: "Consider taking these electives ahead to shorten the plan".into(),
            courses: missed,
        });
    }

    let mut bottlenecks: Vec<(usize, &str)> = graph
        .unique_courses()
        .map(|c| (graph.dependent_count(&c.code), c.code.as_str()))
        .filter(|&(count, _)| count >= BOTTLENECK_DEPENDENTS)
        .collect();
    bottlenecks.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    if !bottlenecks.is_empty() {
        recommendations.push(Recommendation {
            kind: RecommendationKind::PrerequisiteBottleneck,
            priority: RecommendationPriority::High,
            description: format!("{} courses block many others", bottlenecks.len()),
            suggestion: "Schedule these courses as early as possible".into(),
            courses: bottlenecks.iter().map(|(_, code)| code.to_string()).collect(),
        });
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Term};

    const NONE: &[&str] = &[];

    #[test]
    fn test_load_balancing() {
        let heavy = vec![Course::new("A", 5).required(), Course::new("B", 5)];
        let light = vec![Course::new("C", 2)];
        let mut all = heavy.clone();
        all.extend(light.clone());
        let graph = CurriculumGraph::build(&all);

        let mut plan = Plan::new();
        plan.push(Term::regular(1, heavy));
        plan.push(Term::regular(2, light));

        let recs = recommend(&plan, &graph, NONE);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].kind, RecommendationKind::LoadBalancing);
        assert_eq!(recs[0].priority, RecommendationPriority::Medium);
        assert_eq!(recs[0].courses, vec!["B".to_string()]);
    }

    #[test]
    fn test_advanced_study_opportunity() {
        let courses = vec![
            Course::new("A", 3).required(),
            Course::new("E1", 3).with_prerequisite("A"),
            Course::new("E2", 4),
            Course::new("E3", 2).with_prerequisite("A").with_prerequisite("X"),
            Course::new("E4", 2),
        ];
        let graph = CurriculumGraph::build(&courses);
        let mut plan = Plan::new();
        plan.push(Term::regular(1, vec![courses[0].clone()]));

        let recs = recommend(&plan, &graph, &["E4"]);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].kind, RecommendationKind::AdvancedStudyOpportunity);
        assert_eq!(recs[0].priority, RecommendationPriority::Low);
        // E2 too large, E3 too many prerequisites, E4 completed.
        assert_eq!(recs[0].courses, vec!["E1".to_string()]);
    }

    #[test]
    fn test_discharged_electives_not_recommended() {
        let courses = vec![
            Course::new("P", 3).with_equivalent("Q"),
            Course::new("Q", 3),
            Course::new("OLD", 2),
            Course::new("NEW", 2).with_equivalent("OLD"),
            Course::new("E", 2),
        ];
        let graph = CurriculumGraph::build(&courses);
        let mut plan = Plan::new();
        plan.push(Term::regular(1, vec![courses[0].clone()]));

        let recs = recommend(&plan, &graph, &["OLD"]);
        assert_eq!(recs.len(), 1);
        // Q is discharged by P, NEW by the completed OLD.
        assert_eq!(recs[0].courses, vec!["E".to_string()]);
    }

    #[test]
    fn test_bottlenecks_sorted() {
        let mut courses = vec![Course::new("HUB", 3).required(), Course::new("MID", 3).required()];
        for i in 0..4 {
            courses.push(Course::new(format!("H{i}"), 3).required().with_prerequisite("HUB"));
        }
        for i in 0..3 {
            courses.push(Course::new(format!("M{i}"), 3).required().with_prerequisite("MID"));
        }
        let graph = CurriculumGraph::build(&courses);
        let mut plan = Plan::new();
        plan.push(Term::regular(1, courses.clone()));

        let recs = recommend(&plan, &graph, NONE);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].kind, RecommendationKind::PrerequisiteBottleneck);
        assert_eq!(recs[0].priority, RecommendationPriority::High);
        assert_eq!(recs[0].courses, vec!["HUB".to_string(), "MID".to_string()]);
    }

    #[test]
    fn test_priority_serialization() {
        let value = serde_json::to_value(RecommendationPriority::Medium).unwrap();
        assert_eq!(value, serde_json::json!("medium"));
    }
}
