//! Curriculum planning engine.
//!
//! Plans a multi-term course sequence from a curriculum of courses linked by
//! prerequisite, corequisite and equivalence relations, under per-term credit
//! bounds, with optional advance study and summer terms.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `Curriculum`, `Term`, `Plan`
//! - **`config`**: `PlannerConfig`, selection `Strategy`, comparison presets
//! - **`graph`**: Forward/reverse prerequisite indexes
//! - **`validation`**: Input integrity checks (duplicate codes, unknown
//!   references, DAG cycles)
//! - **`readiness`**: Which courses may be taken at a given term
//! - **`dispatching`**: Ranking rules and rule engine
//! - **`scheduler`**: Greedy term packers, the planner and preset comparison
//! - **`evaluation`**: Plan validation, statistics and recommendations
//!
//! # Pipeline
//!
//! curriculum → graph → (readiness → ranking → packing) per term → plan →
//! validation and statistics → recommendations. Course records are never
//! mutated; the only state threaded through a run is the taken-course set
//! and the discharged-equivalents set.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 22

pub mod config;
pub mod dispatching;
pub mod error;
pub mod evaluation;
pub mod graph;
pub mod models;
pub mod readiness;
pub mod scheduler;
pub mod validation;

pub use error::{PlanError, Result};
