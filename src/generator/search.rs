//! Exhaustive schedule search.
//!
//! # Algorithm
//!
//! 1. Select the course pool for the requested specializations and
//!    capstones (foundation and terminal courses excluded).
//! 2. For every `(courses_per_term - 1)`-combination of the pool, seed a
//!    schedule whose first term holds the foundation course plus that
//!    combination. Invalid seeds are pruned.
//! 3. `search(remaining, running)`:
//!    - if `remaining` fits in one term, append it as the trailing term
//!      and return it unvalidated (step 4 revalidates);
//!    - otherwise, for each size `k` in `2..=courses_per_term` and each
//!      k-combination, append it as a new term, validate, and recurse on
//!      the rest. Invalid prefixes are never extended: no invariant is
//!      relaxed by later terms.
//! 4. Place the terminal course (rolling into a new term if needed), mark
//!    complete, revalidate.
//!
//! Results come out in combination-enumeration order, which is
//! deterministic for a fixed catalog and request.
//!
//! # Complexity
//! Exponential in the pool size: the search enumerates ordered partitions
//! of the pool into bounded-size blocks. Callers bound it through
//! `courses_per_term`, `max_terms` and the pool itself, and may abort a
//! run through a [`CancelToken`].

use log::{debug, info, log_enabled, trace, Level};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::combinations::{binomial, combinations};
use super::GenerateRequest;
use crate::models::{Catalog, CourseId, CourseRole, Schedule, ScheduleRules};
use crate::validation::GenerateError;

/// How a branch is validated after a term is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Revalidate the whole schedule.
    #[default]
    Full,
    /// Validate only the appended term against the accepted prefix.
    Incremental,
}

/// Cooperative cancellation flag, checked at every recursive call.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates an unset token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Search counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Seed (first-term) candidates tried.
    pub seeds: usize,
    /// Recursive search calls.
    pub branches: usize,
    /// Candidate schedules rejected during the search.
    pub pruned: usize,
    /// Schedules that survived completion.
    pub completed: usize,
    /// Branches rejected after placing the terminal course.
    pub rejected_at_completion: usize,
    /// Whether the run stopped early.
    pub cancelled: bool,
}

/// Output of a generation run.
#[derive(Debug, Clone)]
pub struct Generation {
    /// Valid, complete schedules.
    pub schedules: Vec<Schedule>,
    /// Search counters.
    pub stats: SearchStats,
}

/// Enumerates every valid schedule for a request.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use u_curriculum::generator::{GenerateRequest, ScheduleGenerator};
/// use u_curriculum::models::{Catalog, Course, CourseRole, Term, TermYear, PROGRAM_REQUIREMENTS};
///
/// let catalog = Arc::new(Catalog::new(vec![
///     Course::new("F", "Foundation")
///         .with_specialization(PROGRAM_REQUIREMENTS)
///         .with_role(CourseRole::Foundation)
///         .every_term(),
///     Course::new("X", "Elective")
///         .with_specialization(PROGRAM_REQUIREMENTS)
///         .with_terms([Term::Spring1]),
///     Course::new("T", "Capstone")
///         .with_specialization(PROGRAM_REQUIREMENTS)
///         .with_role(CourseRole::Terminal)
///         .with_terms([Term::Spring2, Term::Summer]),
/// ]).unwrap());
///
/// let request = GenerateRequest::new()
///     .with_starting_term(TermYear::new(Term::Spring1, 2025))
///     .with_courses_per_term(2)
///     .with_max_terms(3);
///
/// let generation = ScheduleGenerator::new().generate(&catalog, &request).unwrap();
/// assert_eq!(generation.schedules.len(), 1);
/// assert_eq!(generation.schedules[0].term_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleGenerator {
    mode: ValidationMode,
    cancel: Option<CancelToken>,
}

impl ScheduleGenerator {
    /// Creates a generator with full revalidation and no cancellation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-branch validation mode.
    pub fn with_validation_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Attaches a cancellation token.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Builds the shared schedule rules for a request.
    ///
    /// # Errors
    /// Zero limits, unknown pinned codes, or a catalog without a
    /// foundation or terminal course.
    pub fn rules(
        catalog: &Arc<Catalog>,
        request: &GenerateRequest,
    ) -> Result<ScheduleRules, GenerateError> {
        if request.max_terms == 0 {
            return Err(GenerateError::InvalidConfig(
                "max_terms must be at least 1".into(),
            ));
        }
        if request.courses_per_term == 0 {
            return Err(GenerateError::InvalidConfig(
                "courses_per_term must be at least 1".into(),
            ));
        }

        let foundation = catalog
            .foundation()
            .ok_or(GenerateError::MissingRole(CourseRole::Foundation))?;
        let terminal = catalog
            .terminal()
            .ok_or(GenerateError::MissingRole(CourseRole::Terminal))?;

        let mut rules = ScheduleRules::new(catalog.clone(), foundation, terminal)
            .with_max_terms(request.max_terms)
            .with_max_non_capstones_per_term(request.max_non_capstones_per_term);
        for pin in &request.required {
            let ids = resolve_codes(catalog, &pin.courses)?;
            rules = rules.with_required(pin.term, ids);
        }
        Ok(rules)
    }

    /// Runs the search.
    ///
    /// An empty result is a valid outcome: no schedule satisfies the
    /// constraints.
    pub fn generate(
        &self,
        catalog: &Arc<Catalog>,
        request: &GenerateRequest,
    ) -> Result<Generation, GenerateError> {
        let rules = Arc::new(Self::rules(catalog, request)?);
        let capstones = resolve_codes(catalog, &request.capstones)?;

        let pool: Vec<CourseId> = catalog
            .select_pool(&request.specializations, &capstones)
            .into_iter()
            .filter(|&c| c != rules.foundation && c != rules.terminal)
            .collect();

        let seed_size = request.courses_per_term - 1;
        debug!("{} pinned term(s)", rules.required.len());
        debug!(
            "generating schedules: pool={} courses, {} seed candidates, {} per term, max {} terms",
            pool.len(),
            binomial(pool.len(), seed_size),
            request.courses_per_term,
            request.max_terms
        );

        let mut search = Search {
            mode: self.mode,
            cancel: self.cancel.as_ref(),
            courses_per_term: request.courses_per_term,
            stats: SearchStats::default(),
        };
        let mut schedules = Vec::new();

        for first in combinations(&pool, seed_size) {
            if search.is_cancelled() {
                break;
            }
            search.stats.seeds += 1;

            let seed = Schedule::new(
                rules.clone(),
                request.starting_term,
                std::iter::once(rules.foundation).chain(first.iter().copied()),
            );
            if !seed.is_valid() {
                search.prune(&seed);
                continue;
            }

            let remaining: Vec<CourseId> = pool
                .iter()
                .copied()
                .filter(|c| !first.contains(c))
                .collect();
            let branches = search.search(&remaining, &seed);
            let before = schedules.len();

            for mut schedule in branches {
                schedule.add_course(rules.terminal, request.courses_per_term);
                schedule.mark_complete();
                if schedule.is_valid() {
                    schedules.push(schedule);
                } else {
                    search.stats.rejected_at_completion += 1;
                }
            }
            debug!(
                "seed {:?}: {} schedule(s)",
                first,
                schedules.len() - before
            );
        }

        search.stats.completed = schedules.len();
        info!(
            "generated {} schedule(s) ({} branches, {} pruned{})",
            schedules.len(),
            search.stats.branches,
            search.stats.pruned,
            if search.stats.cancelled { ", cancelled" } else { "" }
        );

        Ok(Generation {
            schedules,
            stats: search.stats,
        })
    }
}

/// Enumerates every valid schedule with the default generator.
pub fn generate_schedules(
    catalog: &Arc<Catalog>,
    request: &GenerateRequest,
) -> Result<Vec<Schedule>, GenerateError> {
    ScheduleGenerator::new()
        .generate(catalog, request)
        .map(|g| g.schedules)
}

fn resolve_codes(catalog: &Catalog, codes: &[String]) -> Result<Vec<CourseId>, GenerateError> {
    codes
        .iter()
        .map(|code| {
            catalog
                .id_of(code)
                .ok_or_else(|| GenerateError::UnknownCourse(code.clone()))
        })
        .collect()
}

/// Mutable state of one run.
struct Search<'a> {
    mode: ValidationMode,
    cancel: Option<&'a CancelToken>,
    courses_per_term: usize,
    stats: SearchStats,
}

impl Search<'_> {
    fn is_cancelled(&mut self) -> bool {
        if self.cancel.is_some_and(CancelToken::is_cancelled) {
            self.stats.cancelled = true;
        }
        self.stats.cancelled
    }

    /// Validates a schedule whose latest term was just appended.
    fn accepts(&self, schedule: &Schedule) -> bool {
        match self.mode {
            ValidationMode::Full => schedule.is_valid(),
            ValidationMode::Incremental => schedule.is_valid_appended(),
        }
    }

    fn prune(&mut self, schedule: &Schedule) {
        self.stats.pruned += 1;
        if log_enabled!(Level::Trace) {
            trace!(
                "pruned at {:?}: {:?}",
                schedule.last_term(),
                schedule.violation()
            );
        }
    }

    /// Partitions `remaining` into trailing terms after `running`.
    fn search(&mut self, remaining: &[CourseId], running: &Schedule) -> Vec<Schedule> {
        if self.is_cancelled() {
            return Vec::new();
        }
        self.stats.branches += 1;

        // The terminal course may still land in this term
        if remaining.len() <= self.courses_per_term {
            let mut last = running.clone();
            last.add_term(remaining.iter().copied());
            return vec![last];
        }

        let mut results = Vec::new();
        for k in 2..=self.courses_per_term {
            for chosen in combinations(remaining, k) {
                if self.is_cancelled() {
                    return results;
                }
                let mut next = running.clone();
                next.add_term(chosen.iter().copied());
                if !self.accepts(&next) {
                    self.prune(&next);
                    continue;
                }
                let rest: Vec<CourseId> = remaining
                    .iter()
                    .copied()
                    .filter(|c| !chosen.contains(c))
                    .collect();
                results.extend(self.search(&rest, &next));
            }
        }
        results
    }
}
