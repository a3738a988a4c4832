//! Schedule generation.
//!
//! Exhaustive, deterministic enumeration of every valid schedule for a
//! catalog and a [`GenerateRequest`].
//!
//! # Algorithm
//!
//! `ScheduleGenerator` seeds a first term with the foundation course, then
//! recursively partitions the remaining course pool into bounded-size
//! terms, pruning every branch whose schedule fails validation. Surviving
//! branches receive the terminal course and are revalidated as complete.
//!
//! # Validation modes
//!
//! `ValidationMode::Full` revalidates the whole schedule after each term is
//! appended; `ValidationMode::Incremental` checks only the new term against
//! the accepted prefix. Both accept and reject exactly the same branches.
//!
//! # References
//!
//! - Knuth (2011), "The Art of Computer Programming", Vol. 4A, §7.2.1.3
//!   (Generating all combinations)
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 2

mod combinations;
mod request;
mod search;

pub use combinations::{binomial, combinations, Combinations};
pub use request::{GenerateRequest, PinnedTerm};
pub use search::{
    generate_schedules, CancelToken, Generation, ScheduleGenerator, SearchStats, ValidationMode,
};
