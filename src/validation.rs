//! Input validation and error types.
//!
//! Checks structural integrity of a course catalog before planning.
//! Detects:
//! - Duplicate course codes
//! - Prerequisite codes that name no course
//! - Courses with no offered terms
//! - Circular prerequisite chains (DAG validation)
//! - Missing foundation / terminal courses
//!
//! The schedule generator never calls [`validate_catalog`]; a catalog with
//! a prerequisite cycle simply yields fewer (possibly zero) schedules.
//! Callers that want an explanation run it up front.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::HashSet;
use thiserror::Error;

use crate::models::{Catalog, CourseId, CourseRole};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind:?}: {message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two courses share the same code.
    DuplicateCode,
    /// A course lists a prerequisite code that doesn't exist.
    UnknownPrerequisite,
    /// A course is offered in no term.
    NoTermsOffered,
    /// Prerequisite graph contains a cycle.
    CyclicPrerequisite,
    /// No course has the `Foundation` role.
    MissingFoundation,
    /// No course has the `Terminal` role.
    MissingTerminal,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// A catalog that could not be built.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid catalog ({} problem(s)): {}", .errors.len(), first_message(.errors))]
pub struct CatalogError {
    /// Every detected problem.
    pub errors: Vec<ValidationError>,
}

fn first_message(errors: &[ValidationError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("")
}

/// Errors raised eagerly by the schedule generator.
///
/// Infeasible constraints are not errors: they produce an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// A numeric limit is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A course code in the request is not in the catalog.
    #[error("unknown course code '{0}'")]
    UnknownCourse(String),
    /// The catalog has no course with a role the generator needs.
    #[error("catalog has no {0:?} course")]
    MissingRole(CourseRole),
}

/// Validates a catalog's internal consistency.
///
/// Checks:
/// 1. Every course is offered in at least one term
/// 2. A foundation course exists
/// 3. A terminal course exists
/// 4. No circular prerequisite chains
///
/// Duplicate codes and unknown prerequisites are already rejected by
/// [`Catalog::new`].
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult {
    let mut errors = Vec::new();

    for (_, course) in catalog.iter() {
        if course.terms_offered.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoTermsOffered,
                format!("Course '{}' is offered in no term", course.code),
            ));
        }
    }

    if catalog.foundation().is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingFoundation,
            "No course has the Foundation role",
        ));
    }
    if catalog.terminal().is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingTerminal,
            "No course has the Terminal role",
        ));
    }

    if let Some(cycle_err) = detect_cycles(catalog) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles in the prerequisite graph using DFS.
///
/// # Algorithm
/// Topological sort via DFS over prerequisite edges. A back-edge (reaching
/// a course still on the recursion stack) means a cycle.
fn detect_cycles(catalog: &Catalog) -> Option<ValidationError> {
    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    for (id, course) in catalog.iter() {
        if !visited.contains(&id) && has_cycle_dfs(id, catalog, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicPrerequisite,
                format!("Circular prerequisite chain involving course '{}'", course.code),
            ));
        }
    }

    None
}

fn has_cycle_dfs(
    node: CourseId,
    catalog: &Catalog,
    visited: &mut HashSet<CourseId>,
    in_stack: &mut HashSet<CourseId>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    for &next in catalog.prerequisites(node) {
        if in_stack.contains(&next) {
            return true; // Back edge → cycle
        }
        if !visited.contains(&next) && has_cycle_dfs(next, catalog, visited, in_stack) {
            return true;
        }
    }

    in_stack.remove(&node);
    false
}
