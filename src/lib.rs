//! Exhaustive multi-term course planning for the U-Engine ecosystem.
//!
//! Enumerates every valid schedule of a degree program: which courses to
//! take in which academic term, given prerequisites, term availability,
//! pinned courses, and per-term load limits. Results are returned
//! unranked; the enumeration is deterministic and single-threaded.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Term`, `TermYear`, `Course`, `Catalog`,
//!   `Schedule`, `ScheduleRules`
//! - **`generator`**: Combinatorial search — `ScheduleGenerator`,
//!   `GenerateRequest`, `CancelToken`
//! - **`validation`**: Catalog integrity checks (duplicate codes, unknown
//!   prerequisites, prerequisite cycles) and error types
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use u_curriculum::generator::{generate_schedules, GenerateRequest};
//! use u_curriculum::models::{Catalog, Course, CourseRole, Term, TermYear, PROGRAM_REQUIREMENTS};
//!
//! let program = |code: &str| Course::new(code, code).with_specialization(PROGRAM_REQUIREMENTS);
//! let catalog = Arc::new(Catalog::new(vec![
//!     program("MBA 597").with_role(CourseRole::Foundation).every_term(),
//!     program("ACCY 500").every_term(),
//!     program("FIN 511").every_term().with_prerequisite("ACCY 500"),
//!     program("MBA 598").with_role(CourseRole::Terminal).every_term(),
//! ]).unwrap());
//!
//! let request = GenerateRequest::new()
//!     .with_starting_term(TermYear::new(Term::Spring1, 2025))
//!     .with_courses_per_term(2);
//!
//! let schedules = generate_schedules(&catalog, &request).unwrap();
//! assert_eq!(schedules.len(), 1);
//! for term in schedules[0].plan() {
//!     println!("{}: {:?}", term.term, term.courses);
//! }
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4

pub mod generator;
pub mod models;
pub mod validation;
