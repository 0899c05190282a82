//! Term-by-term plan orchestrator.
//!
//! # Algorithm
//!
//! 1. Derive regular-term credit bounds from the curriculum average:
//!    `max = ceil(avg × 1.5)`, `min = ceil(avg × 2/3)`, unless configured.
//! 2. Optionally pack term 1 from its nominal courses (fixed first term).
//! 3. For each term `t`: compute the ready set, rank it with the strategy's
//!    rule engine and pack it into a regular term.
//! 4. On an empty ready set at an even `t`, try a summer term (`t + 0.5`);
//!    otherwise stop.
//! 5. Stop when every course is settled, nothing fits, or the term safety
//!    bound is reached.
//!
//! The finished plan is validated from scratch and recommendations are
//! derived from it.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{PlannerConfig, Strategy};
use crate::dispatching::{strategies, RankingContext, RuleEngine};
use crate::error::Result;
use crate::evaluation::{recommend, PlanStatistics, PlanValidator, Recommendation, ValidationResult};
use crate::graph::CurriculumGraph;
use crate::models::{Course, Curriculum, Plan, Term};
use crate::readiness::{ready_courses, AdvancePolicy, PlanState};
use crate::validation::{cyclic_courses, validate_curriculum};

use super::{SummerPacker, TermPacker};

/// Regular-term credit bounds of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditBounds {
    /// Credit cap.
    pub max_credits: u32,
    /// Credit floor.
    pub min_credits: u32,
}

impl CreditBounds {
    /// Bounds from the configuration, falling back to the curriculum
    /// average per nominal term.
    pub fn derive(curriculum: &Curriculum, config: &PlannerConfig) -> Self {
        let avg = curriculum.average_credits_per_term();
        let max_credits = config
            .max_credits_per_semester
            .unwrap_or((avg * 1.5).ceil() as u32)
            .max(1);
        let min_credits = config
            .min_credits_per_semester
            .unwrap_or((avg * 2.0 / 3.0).ceil() as u32)
            .min(max_credits);
        Self {
            max_credits,
            min_credits,
        }
    }
}

/// Why the planning loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopReason {
    /// Every course is completed or discharged.
    Complete,
    /// No course was ready and no summer term could be formed.
    NothingReady,
    /// Ready courses existed but none fit the credit cap.
    NothingFits,
    /// The term safety bound was reached.
    TermLimit,
}

/// Everything one planning run produces.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanOutcome {
    /// Regular-term strategy used.
    pub strategy: Strategy,
    /// The plan.
    pub plan: Plan,
    /// Validation result (includes statistics).
    pub validation: ValidationResult,
    /// Full curriculum graph.
    pub graph: CurriculumGraph,
    /// Graph without the courses completed before the plan.
    pub remaining_graph: CurriculumGraph,
    /// Advisory recommendations.
    pub recommendations: Vec<Recommendation>,
    /// Courses ready at the starting term, ranked.
    pub initial_ready: Vec<Course>,
    /// Credit bounds in effect.
    pub credit_bounds: CreditBounds,
    /// Why the loop ended.
    pub stop_reason: StopReason,
}

impl PlanOutcome {
    /// Plan statistics.
    pub fn statistics(&self) -> &PlanStatistics {
        &self.validation.statistics
    }

    /// Whether the plan has no validation errors.
    pub fn is_valid(&self) -> bool {
        self.validation.is_valid
    }
}

/// Greedy curriculum planner.
///
/// Holds an immutable configuration; every call to [`Planner::plan`] builds
/// its own graph and state, so one planner can serve concurrent runs.
///
/// # Example
///
/// ```
/// use u_curriculum::config::PlannerConfig;
/// use u_curriculum::models::{Course, Curriculum};
/// use u_curriculum::scheduler::Planner;
///
/// let curriculum = Curriculum::new(vec![
///     Course::new("A", 3).required(),
///     Course::new("B", 3).required().with_prerequisite("A").with_expected_semester(2),
/// ]);
/// let planner = Planner::new(PlannerConfig::new().with_max_credits(6));
/// let outcome = planner.plan(&curriculum, &[] as &[&str]).unwrap();
///
/// assert_eq!(outcome.plan.len(), 2);
/// assert!(outcome.is_valid());
/// assert_eq!(outcome.statistics().remaining_courses, 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    /// Creates a planner.
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// The configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plans the remaining curriculum.
    ///
    /// # Arguments
    /// * `curriculum` - All courses of the program.
    /// * `completed` - Codes completed before the plan starts.
    ///
    /// # Errors
    /// Returns [`crate::error::PlanError::InvalidConfig`] for unusable
    /// options. Problems with the curriculum or the plan are reported in the
    /// outcome's validation result instead.
    pub fn plan<S: AsRef<str>>(&self, curriculum: &Curriculum, completed: &[S]) -> Result<PlanOutcome> {
        let config = &self.config;
        config.validate()?;

        let courses = curriculum.courses();
        let graph = CurriculumGraph::build(courses);
        if let Err(issues) = validate_curriculum(courses) {
            let cyclic = cyclic_courses(&issues);
            warn!(
                issues = issues.len(),
                cyclic = cyclic.len(),
                "curriculum has structural issues"
            );
        }

        let bounds = CreditBounds::derive(curriculum, config);
        let policy = if config.enable_advanced_study {
            AdvancePolicy::enabled(config.advance_window)
        } else {
            AdvancePolicy::disabled()
        };
        let engine = strategies::for_strategy(config.strategy, &config.weights);
        let mut state = PlanState::from_completed(completed, courses);
        let base_context = RankingContext::from_graph(&graph, config.current_semester);
        debug!(
            strategy = %config.strategy,
            max_credits = bounds.max_credits,
            min_credits = bounds.min_credits,
            courses = graph.node_count(),
            "planning started"
        );

        let initial_ready: Vec<Course> = {
            let ready = ready_courses(graph.unique_courses(), &state, config.current_semester, &policy);
            engine
                .rank(ready.iter().map(|r| r.course).collect(), &base_context)
                .into_iter()
                .cloned()
                .collect()
        };

        let mut plan = Plan::new();
        let mut term = config.current_semester;

        if config.fixed_first_semester && term == 1 {
            let cap = bounds.max_credits.min(config.first_term_credit_cap);
            let first = pack_first_term(&graph, &mut state, &base_context, cap);
            if !first.is_empty() {
                let first = Term::regular(1, first).fixed();
                debug!(term = 1, credits = first.credit_total, "fixed first term packed");
                plan.push(first);
                term = 2;
            }
        }

        let packer = TermPacker::new(bounds.max_credits).with_overload(config.allow_overload);
        let summer_packer = SummerPacker::new(config.max_summer_credits, config.max_summer_courses);
        let summer_engine = strategies::summer();

        // The fixed first term counts toward the bound.
        let mut iterations = plan.len() as u32;
        let stop_reason = loop {
            if graph.unique_courses().all(|c| state.is_settled(c)) {
                break StopReason::Complete;
            }
            if iterations >= config.max_terms {
                warn!(
                    max_terms = config.max_terms,
                    "term safety bound reached; plan may be incomplete"
                );
                break StopReason::TermLimit;
            }
            iterations += 1;
            let context = base_context.at_term(term);

            let ready = ready_courses(graph.unique_courses(), &state, term, &policy);
            debug!(term, ready = ready.len(), "ready set computed");

            if ready.is_empty() {
                if config.include_summer_semesters && term % 2 == 0 {
                    let summer = pack_summer(
                        &graph,
                        &mut state,
                        &context,
                        &policy,
                        &summer_packer,
                        &summer_engine,
                    );
                    if !summer.is_empty() {
                        let summer = Term::summer(term, summer);
                        debug!(term, credits = summer.credit_total, "summer term packed");
                        plan.push(summer);
                        term += 1;
                        continue;
                    }
                }
                break StopReason::NothingReady;
            }

            let ranked = engine.rank(ready.iter().map(|r| r.course).collect(), &context);
            let packed = packer.pack(&ranked, &graph, &mut state);
            if packed.is_empty() {
                debug!(term, "no ready course fits the credit cap");
                break StopReason::NothingFits;
            }

            let regular = Term::regular(term, packed);
            debug!(
                term,
                courses = regular.courses.len(),
                credits = regular.credit_total,
                "regular term packed"
            );
            plan.push(regular);
            term += 1;
        };

        let validator = PlanValidator::from_config(config, bounds.max_credits, bounds.min_credits);
        let validation = validator.validate(&plan, &graph, completed);
        let recommendations = recommend(&plan, &graph, completed);
        let remaining_graph = CurriculumGraph::build_remaining(courses, completed);

        info!(
            strategy = %config.strategy,
            terms = plan.len(),
            credits = plan.total_credits(),
            valid = validation.is_valid,
            remaining = validation.statistics.remaining_courses,
            stop = ?stop_reason,
            "plan generated"
        );

        Ok(PlanOutcome {
            strategy: config.strategy,
            plan,
            validation,
            graph,
            remaining_graph,
            recommendations,
            initial_ready,
            credit_bounds: bounds,
            stop_reason,
        })
    }
}

/// Packs term 1 from the courses nominally in term 1 whose prerequisites
/// are met, required first, then larger courses.
fn pack_first_term(
    graph: &CurriculumGraph,
    state: &mut PlanState,
    context: &RankingContext,
    cap: u32,
) -> Vec<Course> {
    let candidates: Vec<&Course> = graph
        .unique_courses()
        .filter(|c| c.expected_semester == 1 && !state.is_settled(c))
        .filter(|c| c.prerequisites.iter().all(|p| state.is_taken(p)))
        .collect();
    let ranked = strategies::first_term().rank(candidates, context);
    TermPacker::new(cap).pack(&ranked, graph, state)
}

fn pack_summer(
    graph: &CurriculumGraph,
    state: &mut PlanState,
    context: &RankingContext,
    policy: &AdvancePolicy,
    packer: &SummerPacker,
    engine: &RuleEngine,
) -> Vec<Course> {
    let candidates = packer.candidates(graph, state, context.current_term, policy);
    if candidates.is_empty() {
        return Vec::new();
    }
    let ranked = engine.rank(candidates, context);
    packer.pack(&ranked, graph, state)
}
