//! Academic term ordinals.
//!
//! A year is divided into five terms that repeat in a fixed cycle:
//!
//! ```text
//! Spring 1 → Spring 2 → Summer → Fall 1 → Fall 2 → (next year) Spring 1
//! ```
//!
//! `TermYear` pairs a term with a calendar year and is totally ordered,
//! so schedules can key their per-term course sets by it and iterate them
//! chronologically.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five terms of an academic year.
///
/// Variant order is the chronological order within a year; the derived
/// `Ord` relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    Spring1,
    Spring2,
    Summer,
    Fall1,
    Fall2,
}

impl Term {
    /// All terms in chronological order.
    pub const ALL: [Term; 5] = [
        Term::Spring1,
        Term::Spring2,
        Term::Summer,
        Term::Fall1,
        Term::Fall2,
    ];

    /// Number of terms per year.
    pub const PER_YEAR: usize = Self::ALL.len();

    /// Position of this term within the year (0-based).
    #[inline]
    pub fn position(self) -> usize {
        self as usize
    }

    /// The term that follows this one, and whether the year rolls over.
    pub fn following(self) -> (Term, bool) {
        match self {
            Term::Spring1 => (Term::Spring2, false),
            Term::Spring2 => (Term::Summer, false),
            Term::Summer => (Term::Fall1, false),
            Term::Fall1 => (Term::Fall2, false),
            Term::Fall2 => (Term::Spring1, true),
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Term::Spring1 => "Spring 1",
            Term::Spring2 => "Spring 2",
            Term::Summer => "Summer",
            Term::Fall1 => "Fall 1",
            Term::Fall2 => "Fall 2",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A specific term of a specific year.
///
/// Ordered by year first, then by term position. Field order matters:
/// the derived `Ord` compares `year` before `term`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TermYear {
    /// Calendar year.
    pub year: i32,
    /// Term within the year.
    pub term: Term,
}

impl TermYear {
    /// Creates a term ordinal.
    pub fn new(term: Term, year: i32) -> Self {
        Self { year, term }
    }

    /// The immediately following term ordinal.
    ///
    /// The year only increments when wrapping from `Fall2` to `Spring1`.
    /// Saturates at `Fall2` of `i32::MAX`, which is its own successor.
    pub fn next(self) -> Self {
        let (term, rolls_over) = self.term.following();
        if !rolls_over {
            return Self { year: self.year, term };
        }
        match self.year.checked_add(1) {
            Some(year) => Self { year, term },
            None => self,
        }
    }
}

impl Default for TermYear {
    fn default() -> Self {
        Self::new(Term::Spring1, 2025)
    }
}

impl fmt::Display for TermYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.term, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_cycle_order() {
        for pair in Term::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].following(), (pair[1], false));
        }
        assert_eq!(Term::Fall2.following(), (Term::Spring1, true));
    }

    #[test]
    fn test_next_within_year() {
        let t = TermYear::new(Term::Spring2, 2025);
        assert_eq!(t.next(), TermYear::new(Term::Summer, 2025));
    }

    #[test]
    fn test_next_wraps_year() {
        let t = TermYear::new(Term::Fall2, 2025);
        assert_eq!(t.next(), TermYear::new(Term::Spring1, 2026));
    }

    #[test]
    fn test_ordering_year_first() {
        let late_2025 = TermYear::new(Term::Fall2, 2025);
        let early_2026 = TermYear::new(Term::Spring1, 2026);
        assert!(late_2025 < early_2026);
        assert!(TermYear::new(Term::Spring1, 2025) < TermYear::new(Term::Summer, 2025));
    }

    #[test]
    fn test_next_is_strictly_increasing() {
        let mut t = TermYear::new(Term::Summer, 2024);
        for _ in 0..12 {
            let n = t.next();
            assert!(n > t);
            t = n;
        }
        assert_eq!(t, TermYear::new(Term::Fall2, 2026));
    }

    #[test]
    fn test_next_saturates_at_last_year() {
        let last = TermYear::new(Term::Fall2, i32::MAX);
        assert_eq!(last.next(), last);
        assert_eq!(TermYear::new(Term::Fall1, i32::MAX).next(), last);
    }

    #[test]
    fn test_display() {
        assert_eq!(TermYear::new(Term::Spring1, 2025).to_string(), "Spring 1 2025");
        assert_eq!(Term::Summer.to_string(), "Summer");
    }

    #[test]
    fn test_serde_roundtrip() {
        let t = TermYear::new(Term::Fall1, 2026);
        let json = serde_json::to_string(&t).unwrap();
        let back: TermYear = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
