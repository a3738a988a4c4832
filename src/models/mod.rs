//! Course-planning domain models.
//!
//! Provides the data types for describing a degree program and the
//! schedules that satisfy it.
//!
//! # Domain Mappings
//!
//! | u-curriculum | MBA program | Undergraduate | Certificate |
//! |--------------|-------------|---------------|-------------|
//! | TermYear | 8-week term | Semester | Session |
//! | Course | Course | Course | Module |
//! | Foundation | Orientation course | First-year seminar | Intro module |
//! | Terminal | Program capstone | Senior thesis | Final project |
//! | Schedule | Degree plan | Four-year plan | Study plan |

mod catalog;
mod course;
mod schedule;
mod term;

pub use catalog::{Catalog, CatalogData, PROGRAM_REQUIREMENTS};
pub use course::{Course, CourseId, CourseRole};
pub use schedule::{PlannedCourse, Schedule, ScheduleRules, TermPlan, Violation};
pub use term::{Term, TermYear};
