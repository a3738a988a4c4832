//! Schedule (solution) model.
//!
//! A schedule maps term ordinals to the set of courses taken in that term.
//! It is an accumulator: the generator seeds it with a first term, appends
//! terms while searching, and finally places the terminal course.
//!
//! Validity is not enforced by construction. [`Schedule::is_valid`] checks,
//! for every term present:
//! - (a) each course is offered in that term
//! - (b) every prerequisite sits in a strictly earlier term
//! - (c) non-capstone courses do not exceed the per-term limit
//! - (d) the term's pinned courses, if any, are all scheduled there
//! - (e) the foundation course is in the first term
//! - (f) once complete, the terminal course is in the last term and every
//!   pinned term is part of the schedule
//! - (g) the number of terms does not exceed the maximum

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

use super::{Catalog, CourseId, Term, TermYear};

/// Constraints shared by every branch of a search.
#[derive(Debug, Clone)]
pub struct ScheduleRules {
    /// Course table.
    pub catalog: Arc<Catalog>,
    /// Course required in the first term.
    pub foundation: CourseId,
    /// Course required in the last term of a complete schedule.
    pub terminal: CourseId,
    /// Maximum number of distinct terms.
    pub max_terms: usize,
    /// Maximum non-capstone courses per term.
    pub max_non_capstones_per_term: usize,
    /// Courses pinned to specific terms.
    pub required: BTreeMap<TermYear, BTreeSet<CourseId>>,
}

impl ScheduleRules {
    /// Creates rules with the default limits (10 terms, 2 non-capstones per term).
    pub fn new(catalog: Arc<Catalog>, foundation: CourseId, terminal: CourseId) -> Self {
        Self {
            catalog,
            foundation,
            terminal,
            max_terms: 10,
            max_non_capstones_per_term: 2,
            required: BTreeMap::new(),
        }
    }

    /// Sets the maximum number of terms.
    pub fn with_max_terms(mut self, max_terms: usize) -> Self {
        self.max_terms = max_terms;
        self
    }

    /// Sets the per-term non-capstone limit.
    pub fn with_max_non_capstones_per_term(mut self, max: usize) -> Self {
        self.max_non_capstones_per_term = max;
        self
    }

    /// Pins courses to a term. Repeated pins on a term accumulate.
    pub fn with_required(
        mut self,
        term: TermYear,
        courses: impl IntoIterator<Item = CourseId>,
    ) -> Self {
        self.required.entry(term).or_default().extend(courses);
        self
    }
}

/// Why a schedule is invalid (first violation found).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// (g) More terms than allowed.
    TooManyTerms { terms: usize, max: usize },
    /// (e) Foundation course missing from the first term.
    FoundationNotFirst,
    /// (f) Terminal course missing from the last term of a complete schedule.
    TerminalNotLast,
    /// (f) A complete schedule never reaches a pinned term.
    PinnedTermMissing { term: TermYear },
    /// (d) A pinned course is missing from its term.
    PinnedMissing { term: TermYear, course: CourseId },
    /// (c) Too many non-capstone courses in a term.
    LoadExceeded { term: TermYear, count: usize, max: usize },
    /// (b) A prerequisite is not in an earlier term.
    MissingPrerequisite {
        term: TermYear,
        course: CourseId,
        prerequisite: CourseId,
    },
    /// (a) Course not offered in the term it is placed in.
    NotOffered { term: TermYear, course: CourseId },
}

/// A multi-term course schedule.
///
/// `Clone` duplicates the term map and every per-term set, so branches of
/// a search never observe each other's mutations. The rules are shared.
#[derive(Debug, Clone)]
pub struct Schedule {
    terms: BTreeMap<TermYear, BTreeSet<CourseId>>,
    rules: Arc<ScheduleRules>,
    complete: bool,
}

impl Schedule {
    /// Creates a schedule with a single seed term.
    pub fn new(
        rules: Arc<ScheduleRules>,
        first_term: TermYear,
        courses: impl IntoIterator<Item = CourseId>,
    ) -> Self {
        let mut terms = BTreeMap::new();
        terms.insert(first_term, courses.into_iter().collect());
        Self {
            terms,
            rules,
            complete: false,
        }
    }

    /// Appends a term right after the latest one holding exactly `courses`.
    ///
    /// Returns the new term's ordinal. No validation is performed.
    pub fn add_term(&mut self, courses: impl IntoIterator<Item = CourseId>) -> TermYear {
        let term = match self.last_term() {
            Some(last) => last.next(),
            None => TermYear::default(),
        };
        self.terms.insert(term, courses.into_iter().collect());
        term
    }

    /// Places a course into the latest term, rolling over into new empty
    /// terms while the current one is full or does not offer the course.
    ///
    /// Gives up after a full term cycle and returns `false`; the empty
    /// terms opened on the way stay in the schedule.
    pub fn add_course(&mut self, course: CourseId, max_courses_per_term: usize) -> bool {
        let Some(mut term) = self.last_term() else {
            return false;
        };
        let offered = &self.rules.catalog.course(course).terms_offered;

        for attempt in 0..=Term::PER_YEAR {
            if attempt > 0 {
                term = term.next();
            }
            let slot = self.terms.entry(term).or_default();
            if slot.len() < max_courses_per_term && offered.contains(&term.term) {
                slot.insert(course);
                return true;
            }
        }
        false
    }

    /// Marks the schedule as complete; enables rule (f).
    pub fn mark_complete(&mut self) {
        self.complete = true;
    }

    /// Whether the schedule was marked complete.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Checks every invariant.
    pub fn is_valid(&self) -> bool {
        self.violation().is_none()
    }

    /// Returns the first violated invariant, scanning terms chronologically.
    pub fn violation(&self) -> Option<Violation> {
        if let Some(v) = self.check_boundaries() {
            return Some(v);
        }

        let mut taken: HashSet<CourseId> = HashSet::new();
        for (&term, courses) in &self.terms {
            if let Some(v) = self.check_term(term, courses, &taken) {
                return Some(v);
            }
            taken.extend(courses.iter().copied());
        }
        None
    }

    /// Checks only the latest term, assuming every earlier term is valid.
    ///
    /// Agrees with [`is_valid`](Self::is_valid) whenever the schedule
    /// without its latest term was valid. The search uses it after
    /// [`add_term`](Self::add_term), which never touches earlier terms.
    pub fn is_valid_appended(&self) -> bool {
        if self.terms.len() <= 1 {
            return self.is_valid();
        }
        if self.check_boundaries().is_some() {
            return false;
        }
        let Some((&last, courses)) = self.terms.last_key_value() else {
            return false;
        };
        let taken: HashSet<CourseId> = self
            .terms
            .range(..last)
            .flat_map(|(_, set)| set.iter().copied())
            .collect();
        self.check_term(last, courses, &taken).is_none()
    }

    /// Rules (e), (f), (g).
    fn check_boundaries(&self) -> Option<Violation> {
        let rules = &self.rules;
        if self.terms.len() > rules.max_terms {
            return Some(Violation::TooManyTerms {
                terms: self.terms.len(),
                max: rules.max_terms,
            });
        }

        match self.terms.first_key_value() {
            Some((_, first)) if first.contains(&rules.foundation) => {}
            _ => return Some(Violation::FoundationNotFirst),
        }

        if self.complete {
            match self.terms.last_key_value() {
                Some((_, last)) if last.contains(&rules.terminal) => {}
                _ => return Some(Violation::TerminalNotLast),
            }
            if let Some(&term) = rules.required.keys().find(|t| !self.terms.contains_key(*t)) {
                return Some(Violation::PinnedTermMissing { term });
            }
        }
        None
    }

    /// Rules (a)-(d) for one term, given the courses of all earlier terms.
    fn check_term(
        &self,
        term: TermYear,
        courses: &BTreeSet<CourseId>,
        taken: &HashSet<CourseId>,
    ) -> Option<Violation> {
        let rules = &self.rules;
        let catalog = &rules.catalog;

        if let Some(pinned) = rules.required.get(&term) {
            if let Some(&course) = pinned.iter().find(|c| !courses.contains(*c)) {
                return Some(Violation::PinnedMissing { term, course });
            }
        }

        let count = courses
            .iter()
            .filter(|&&c| !catalog.course(c).is_capstone())
            .count();
        if count > rules.max_non_capstones_per_term {
            return Some(Violation::LoadExceeded {
                term,
                count,
                max: rules.max_non_capstones_per_term,
            });
        }

        for &course in courses {
            if let Some(&prerequisite) = catalog
                .prerequisites(course)
                .iter()
                .find(|p| !taken.contains(*p))
            {
                return Some(Violation::MissingPrerequisite {
                    term,
                    course,
                    prerequisite,
                });
            }
            if !catalog.course(course).is_offered_in(term.term) {
                return Some(Violation::NotOffered { term, course });
            }
        }
        None
    }

    /// Shared constraints.
    pub fn rules(&self) -> &ScheduleRules {
        &self.rules
    }

    /// Course table.
    pub fn catalog(&self) -> &Catalog {
        &self.rules.catalog
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Chronologically first term.
    pub fn first_term(&self) -> Option<TermYear> {
        self.terms.keys().next().copied()
    }

    /// Chronologically last term.
    pub fn last_term(&self) -> Option<TermYear> {
        self.terms.keys().next_back().copied()
    }

    /// Courses scheduled in a term.
    pub fn courses_in(&self, term: TermYear) -> Option<&BTreeSet<CourseId>> {
        self.terms.get(&term)
    }

    /// Iterates terms chronologically.
    pub fn terms(&self) -> impl Iterator<Item = (TermYear, &BTreeSet<CourseId>)> {
        self.terms.iter().map(|(&t, set)| (t, set))
    }

    /// Term in which a course is scheduled.
    pub fn term_of(&self, course: CourseId) -> Option<TermYear> {
        self.terms
            .iter()
            .find(|(_, set)| set.contains(&course))
            .map(|(&t, _)| t)
    }

    /// Total number of scheduled courses.
    pub fn course_count(&self) -> usize {
        self.terms.values().map(BTreeSet::len).sum()
    }

    /// Per-term course codes and names, chronologically.
    pub fn plan(&self) -> Vec<TermPlan> {
        let catalog = self.catalog();
        self.terms
            .iter()
            .map(|(&term, set)| TermPlan {
                term,
                courses: set
                    .iter()
                    .map(|&id| {
                        let course = catalog.course(id);
                        PlannedCourse {
                            code: course.code.clone(),
                            name: course.name.clone(),
                        }
                    })
                    .collect(),
            })
            .collect()
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let catalog = self.catalog();
        for (term, set) in &self.terms {
            writeln!(f, "{term}:")?;
            for &id in set {
                writeln!(f, "  {}", catalog.course(id))?;
            }
        }
        Ok(())
    }
}

/// One term of a schedule, in output form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermPlan {
    /// Term ordinal.
    pub term: TermYear,
    /// Courses taken in the term.
    pub courses: Vec<PlannedCourse>,
}

/// A scheduled course, in output form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedCourse {
    /// Course code.
    pub code: String,
    /// Course name.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, CourseRole};

    const S1: Term = Term::Spring1;
    const S2: Term = Term::Spring2;
    const SU: Term = Term::Summer;
    const F1: Term = Term::Fall1;

    fn sample_catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::new(vec![
                Course::new("F", "Foundation")
                    .with_role(CourseRole::Foundation)
                    .every_term(),
                Course::new("T", "Terminal")
                    .with_role(CourseRole::Terminal)
                    .with_terms([S2, F1]),
                Course::new("A", "Alpha").with_terms([S1, S2]),
                Course::new("B", "Beta").with_terms([S2]).with_prerequisite("A"),
                Course::new("C", "Gamma").every_term(),
                Course::new("K", "Capstone")
                    .with_role(CourseRole::Capstone)
                    .every_term(),
            ])
            .unwrap(),
        )
    }

    fn rules(catalog: &Arc<Catalog>) -> ScheduleRules {
        ScheduleRules::new(
            catalog.clone(),
            catalog.id_of("F").unwrap(),
            catalog.id_of("T").unwrap(),
        )
    }

    fn ids(catalog: &Catalog, codes: &[&str]) -> Vec<CourseId> {
        codes.iter().map(|c| catalog.id_of(c).unwrap()).collect()
    }

    fn start() -> TermYear {
        TermYear::new(S1, 2025)
    }

    #[test]
    fn test_seed_term_valid() {
        let catalog = sample_catalog();
        let s = Schedule::new(Arc::new(rules(&catalog)), start(), ids(&catalog, &["F", "A"]));
        assert!(s.is_valid());
        assert_eq!(s.term_count(), 1);
        assert_eq!(s.first_term(), Some(start()));
    }

    #[test]
    fn test_foundation_must_be_first() {
        let catalog = sample_catalog();
        let s = Schedule::new(Arc::new(rules(&catalog)), start(), ids(&catalog, &["A"]));
        assert_eq!(s.violation(), Some(Violation::FoundationNotFirst));
    }

    #[test]
    fn test_add_term_follows_latest() {
        let catalog = sample_catalog();
        let mut s = Schedule::new(Arc::new(rules(&catalog)), start(), ids(&catalog, &["F", "A"]));
        let t = s.add_term(ids(&catalog, &["B"]));
        assert_eq!(t, TermYear::new(S2, 2025));
        assert!(s.is_valid());
        assert_eq!(s.term_of(catalog.id_of("B").unwrap()), Some(t));
    }

    #[test]
    fn test_prerequisite_same_term_rejected() {
        let catalog = sample_catalog();
        let s = Schedule::new(
            Arc::new(rules(&catalog)),
            TermYear::new(S2, 2025),
            ids(&catalog, &["F", "A", "B"]),
        );
        assert!(matches!(
            s.violation(),
            Some(Violation::MissingPrerequisite { .. }) | Some(Violation::LoadExceeded { .. })
        ));

        let relaxed = rules(&catalog).with_max_non_capstones_per_term(3);
        let s = Schedule::new(
            Arc::new(relaxed),
            TermYear::new(S2, 2025),
            ids(&catalog, &["F", "A", "B"]),
        );
        let b = catalog.id_of("B").unwrap();
        let a = catalog.id_of("A").unwrap();
        assert_eq!(
            s.violation(),
            Some(Violation::MissingPrerequisite {
                term: TermYear::new(S2, 2025),
                course: b,
                prerequisite: a,
            })
        );
    }

    #[test]
    fn test_not_offered() {
        let catalog = sample_catalog();
        let mut s = Schedule::new(Arc::new(rules(&catalog)), start(), ids(&catalog, &["F", "A"]));
        s.add_term(Vec::new());
        s.add_term(ids(&catalog, &["B"])); // Summer: B is Spring 2 only
        assert_eq!(
            s.violation(),
            Some(Violation::NotOffered {
                term: TermYear::new(SU, 2025),
                course: catalog.id_of("B").unwrap(),
            })
        );
    }

    #[test]
    fn test_capstones_exempt_from_load() {
        let catalog = sample_catalog();
        let s = Schedule::new(
            Arc::new(rules(&catalog)),
            start(),
            ids(&catalog, &["F", "K", "A", "C"]),
        );
        assert!(s.is_valid());

        let tight = rules(&catalog).with_max_non_capstones_per_term(1);
        let s = Schedule::new(Arc::new(tight), start(), ids(&catalog, &["F", "A", "C"]));
        assert!(matches!(s.violation(), Some(Violation::LoadExceeded { count: 2, max: 1, .. })));
    }

    #[test]
    fn test_pinned_requirement() {
        let catalog = sample_catalog();
        let pinned = rules(&catalog).with_required(TermYear::new(S2, 2025), ids(&catalog, &["C"]));
        let mut s = Schedule::new(Arc::new(pinned), start(), ids(&catalog, &["F", "A"]));
        assert!(s.is_valid()); // pinned term not reached yet

        let mut other = s.clone();
        other.add_term(ids(&catalog, &["B"]));
        assert!(matches!(other.violation(), Some(Violation::PinnedMissing { .. })));

        s.add_term(ids(&catalog, &["B", "C"]));
        assert!(s.is_valid());
    }

    #[test]
    fn test_complete_requires_pinned_terms() {
        let catalog = sample_catalog();
        let pin = TermYear::new(F1, 2025);
        let pinned = rules(&catalog).with_required(pin, ids(&catalog, &["C"]));
        let mut s = Schedule::new(Arc::new(pinned), start(), ids(&catalog, &["F", "A"]));
        s.add_term(ids(&catalog, &["T"]));
        assert!(s.is_valid());
        s.mark_complete();
        assert_eq!(s.violation(), Some(Violation::PinnedTermMissing { term: pin }));
    }

    #[test]
    fn test_max_terms() {
        let catalog = sample_catalog();
        let limited = rules(&catalog).with_max_terms(2);
        let mut s = Schedule::new(Arc::new(limited), start(), ids(&catalog, &["F"]));
        s.add_term(Vec::new());
        assert!(s.is_valid());
        s.add_term(Vec::new());
        assert_eq!(s.violation(), Some(Violation::TooManyTerms { terms: 3, max: 2 }));
    }

    #[test]
    fn test_add_course_fits_current_term() {
        let catalog = sample_catalog();
        let mut s = Schedule::new(
            Arc::new(rules(&catalog)),
            TermYear::new(S2, 2025),
            ids(&catalog, &["F"]),
        );
        let t = catalog.id_of("T").unwrap();
        assert!(s.add_course(t, 3));
        assert_eq!(s.term_count(), 1);
        s.mark_complete();
        assert!(s.is_valid());
    }

    #[test]
    fn test_add_course_rolls_over() {
        let catalog = sample_catalog();
        let mut s = Schedule::new(Arc::new(rules(&catalog)), start(), ids(&catalog, &["F", "A"]));
        let t = catalog.id_of("T").unwrap();
        // Spring 1 does not offer T → Spring 2 opened
        assert!(s.add_course(t, 3));
        assert_eq!(s.last_term(), Some(TermYear::new(S2, 2025)));

        // Full Spring 2 and Summer without T → lands in Fall 1
        let mut s = Schedule::new(
            Arc::new(rules(&catalog)),
            TermYear::new(S2, 2025),
            ids(&catalog, &["F", "C"]),
        );
        assert!(s.add_course(t, 2));
        assert_eq!(s.last_term(), Some(TermYear::new(F1, 2025)));
        assert_eq!(s.term_count(), 3);
        s.mark_complete();
        assert!(s.is_valid());
    }

    #[test]
    fn test_add_course_gives_up_after_cycle() {
        let catalog = sample_catalog();
        let mut s = Schedule::new(Arc::new(rules(&catalog)), start(), ids(&catalog, &["F"]));
        assert!(!s.add_course(catalog.id_of("C").unwrap(), 0));
        assert_eq!(s.term_count(), 1 + Term::PER_YEAR);
    }

    #[test]
    fn test_complete_requires_terminal_last() {
        let catalog = sample_catalog();
        let mut s = Schedule::new(Arc::new(rules(&catalog)), start(), ids(&catalog, &["F", "A"]));
        s.add_term(ids(&catalog, &["T"]));
        s.add_term(ids(&catalog, &["C"]));
        assert!(s.is_valid());
        s.mark_complete();
        assert_eq!(s.violation(), Some(Violation::TerminalNotLast));
    }

    #[test]
    fn test_clone_is_independent() {
        let catalog = sample_catalog();
        let base = Schedule::new(Arc::new(rules(&catalog)), start(), ids(&catalog, &["F"]));
        let mut branch = base.clone();
        branch.add_course(catalog.id_of("A").unwrap(), 3);
        branch.add_term(ids(&catalog, &["B"]));

        assert_eq!(base.course_count(), 1);
        assert_eq!(base.term_count(), 1);
        assert_eq!(branch.course_count(), 3);
    }

    #[test]
    fn test_validation_idempotent() {
        let catalog = sample_catalog();
        let mut s = Schedule::new(Arc::new(rules(&catalog)), start(), ids(&catalog, &["F", "A"]));
        s.add_term(ids(&catalog, &["B", "T"]));
        let first = s.is_valid();
        assert_eq!(s.is_valid(), first);
        s.mark_complete();
        let first = s.violation();
        assert_eq!(s.violation(), first);
        assert!(s.is_valid());
    }

    #[test]
    fn test_appended_matches_full() {
        let catalog = sample_catalog();
        let base = Schedule::new(Arc::new(rules(&catalog)), start(), ids(&catalog, &["F", "A"]));
        for codes in [&["B"][..], &["B", "C"], &["C", "K"], &["A", "C", "B"], &["T"]] {
            let mut s = base.clone();
            s.add_term(ids(&catalog, codes));
            assert_eq!(s.is_valid_appended(), s.is_valid(), "{codes:?}");
        }
    }

    #[test]
    fn test_plan_and_display() {
        let catalog = sample_catalog();
        let mut s = Schedule::new(Arc::new(rules(&catalog)), start(), ids(&catalog, &["F", "A"]));
        s.add_term(ids(&catalog, &["T"]));

        let plan = s.plan();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].term, start());
        let codes: Vec<_> = plan[0].courses.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["F", "A"]);
        assert_eq!(plan[1].courses[0].name, "Terminal");

        let json = serde_json::to_string(&plan).unwrap();
        assert!(json.contains("\"code\":\"T\""));

        let text = s.to_string();
        assert!(text.starts_with("Spring 1 2025:\n  F - Foundation ()\n"));
        assert!(text.contains("Spring 2 2025:\n  T - Terminal ()\n"));
    }
}
