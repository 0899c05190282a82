//! Curriculum planning domain models.
//!
//! Plain data types for the planner's input (courses) and output (terms).
//!
//! # Domain Mappings
//!
//! | u-curriculum | Scheduling analogue |
//! |--------------|---------------------|
//! | Course | Task |
//! | Prerequisite | Precedence edge |
//! | Term | Time bucket with a credit capacity |
//! | Plan | Schedule |

mod course;
mod term;

pub use course::{Course, Curriculum, MAX_DIFFICULTY, MIN_DIFFICULTY};
pub use term::{year_of, Plan, Term, TermKind, TermLoad, TermRef};
