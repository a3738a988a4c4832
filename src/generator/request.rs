//! Generation request (search configuration).

use serde::{Deserialize, Serialize};

use crate::models::TermYear;

/// Courses pinned to a term, by code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedTerm {
    /// Term the courses must be taken in.
    pub term: TermYear,
    /// Course codes.
    pub courses: Vec<String>,
}

impl PinnedTerm {
    /// Creates a pin.
    pub fn new<S: Into<String>>(term: TermYear, courses: impl IntoIterator<Item = S>) -> Self {
        Self {
            term,
            courses: courses.into_iter().map(Into::into).collect(),
        }
    }
}

/// Input container for schedule generation.
///
/// Every field has a default, so a request can be deserialized from a
/// partial JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateRequest {
    /// Specialization tags whose courses are scheduled.
    pub specializations: Vec<String>,
    /// Codes of the chosen specialization capstones.
    pub capstones: Vec<String>,
    /// Courses pinned to specific terms.
    pub required: Vec<PinnedTerm>,
    /// Term of the seed (first) term.
    pub starting_term: TermYear,
    /// Courses per term during the search, capstones included.
    pub courses_per_term: usize,
    /// Non-capstone courses allowed in one term.
    pub max_non_capstones_per_term: usize,
    /// Maximum number of terms in a schedule.
    pub max_terms: usize,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            specializations: Vec::new(),
            capstones: Vec::new(),
            required: Vec::new(),
            starting_term: TermYear::default(),
            courses_per_term: 3,
            max_non_capstones_per_term: 2,
            max_terms: 10,
        }
    }
}

impl GenerateRequest {
    /// Creates a request with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a specialization tag.
    pub fn with_specialization(mut self, tag: impl Into<String>) -> Self {
        self.specializations.push(tag.into());
        self
    }

    /// Adds a chosen capstone by code.
    pub fn with_capstone(mut self, code: impl Into<String>) -> Self {
        self.capstones.push(code.into());
        self
    }

    /// Pins courses to a term.
    pub fn with_required<S: Into<String>>(
        mut self,
        term: TermYear,
        courses: impl IntoIterator<Item = S>,
    ) -> Self {
        self.required.push(PinnedTerm::new(term, courses));
        self
    }

    /// Sets the first term.
    pub fn with_starting_term(mut self, term: TermYear) -> Self {
        self.starting_term = term;
        self
    }

    /// Sets the number of courses per term.
    pub fn with_courses_per_term(mut self, n: usize) -> Self {
        self.courses_per_term = n;
        self
    }

    /// Sets the per-term non-capstone limit.
    pub fn with_max_non_capstones_per_term(mut self, n: usize) -> Self {
        self.max_non_capstones_per_term = n;
        self
    }

    /// Sets the maximum number of terms.
    pub fn with_max_terms(mut self, n: usize) -> Self {
        self.max_terms = n;
        self
    }
}
