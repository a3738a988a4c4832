//! Course descriptor model.
//!
//! A course is an immutable catalog record: identifying code, display name,
//! specialization tag, the terms in which it is offered, and the codes of
//! its prerequisites. Courses are owned by a [`Catalog`](super::Catalog)
//! and referenced everywhere else by [`CourseId`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::Term;

/// Stable index of a course inside its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CourseId(pub u32);

impl CourseId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Placement role of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CourseRole {
    /// Ordinary course; counts against the per-term load limit.
    #[default]
    Regular,
    /// Specialization capstone, included only when selected.
    Capstone,
    /// Program opener; must sit in the first term.
    Foundation,
    /// Program closer; must sit in the last term of a complete schedule.
    Terminal,
}

/// A course descriptor.
///
/// Equality and hashing use `code` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique course code (e.g. "FIN 511").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Specialization tag.
    pub specialization: String,
    /// Placement role.
    #[serde(default)]
    pub role: CourseRole,
    /// Terms in which the course may be taken.
    pub terms_offered: Vec<Term>,
    /// Codes of courses that must be taken in an earlier term.
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

impl Course {
    /// Creates a regular course with no offerings or prerequisites.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            specialization: String::new(),
            role: CourseRole::Regular,
            terms_offered: Vec::new(),
            prerequisites: Vec::new(),
        }
    }

    /// Sets the specialization tag.
    pub fn with_specialization(mut self, specialization: impl Into<String>) -> Self {
        self.specialization = specialization.into();
        self
    }

    /// Sets the placement role.
    pub fn with_role(mut self, role: CourseRole) -> Self {
        self.role = role;
        self
    }

    /// Sets the offered terms.
    pub fn with_terms(mut self, terms: impl IntoIterator<Item = Term>) -> Self {
        self.terms_offered = terms.into_iter().collect();
        self
    }

    /// Offered in every term.
    pub fn every_term(self) -> Self {
        self.with_terms(Term::ALL)
    }

    /// Adds a prerequisite by code.
    pub fn with_prerequisite(mut self, code: impl Into<String>) -> Self {
        self.prerequisites.push(code.into());
        self
    }

    /// Whether the course may be taken in `term`.
    #[inline]
    pub fn is_offered_in(&self, term: Term) -> bool {
        self.terms_offered.contains(&term)
    }

    /// Capstones (specialization, foundation and terminal) are exempt from
    /// the non-capstone load limit.
    #[inline]
    pub fn is_capstone(&self) -> bool {
        self.role != CourseRole::Regular
    }
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Course {}

impl Hash for Course {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.code, self.name, self.specialization)
    }
}
