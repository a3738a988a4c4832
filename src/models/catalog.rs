//! Course catalog.
//!
//! The catalog is an arena: every [`Course`] lives in one table and is
//! referred to by its [`CourseId`] (table index). Prerequisite codes are
//! resolved to ids once, at construction, so validation never touches
//! strings.
//!
//! The catalog checks only what it needs to build the arena (unique codes,
//! resolvable prerequisites). Deeper integrity checks such as prerequisite
//! cycles live in [`validation::validate_catalog`](crate::validation::validate_catalog).

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::{Course, CourseId, CourseRole};
use crate::validation::{CatalogError, ValidationError, ValidationErrorKind};

/// Default specialization tag for courses every student takes.
pub const PROGRAM_REQUIREMENTS: &str = "Program Requirements";

/// Serialized form of a catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    /// Tag of the program-wide required courses.
    #[serde(default = "default_program_tag")]
    pub program_tag: String,
    /// Course table.
    pub courses: Vec<Course>,
}

fn default_program_tag() -> String {
    PROGRAM_REQUIREMENTS.to_string()
}

/// Read-only course table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CatalogData", into = "CatalogData")]
pub struct Catalog {
    program_tag: String,
    courses: Vec<Course>,
    prerequisites: Vec<Vec<CourseId>>,
    index: HashMap<String, CourseId>,
}

impl Catalog {
    /// Builds a catalog, resolving prerequisite codes.
    ///
    /// # Errors
    /// Every duplicate code and every prerequisite code that names no
    /// course in `courses`.
    pub fn new(courses: Vec<Course>) -> Result<Self, CatalogError> {
        let mut errors = Vec::new();
        let mut index = HashMap::with_capacity(courses.len());

        for (i, course) in courses.iter().enumerate() {
            if index.insert(course.code.clone(), CourseId(i as u32)).is_some() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateCode,
                    format!("Duplicate course code: {}", course.code),
                ));
            }
        }

        let mut prerequisites = Vec::with_capacity(courses.len());
        for course in &courses {
            let mut resolved = Vec::with_capacity(course.prerequisites.len());
            for code in &course.prerequisites {
                match index.get(code) {
                    Some(&id) => resolved.push(id),
                    None => errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownPrerequisite,
                        format!(
                            "Course '{}' references unknown prerequisite '{}'",
                            course.code, code
                        ),
                    )),
                }
            }
            prerequisites.push(resolved);
        }

        if !errors.is_empty() {
            return Err(CatalogError { errors });
        }

        Ok(Self {
            program_tag: default_program_tag(),
            courses,
            prerequisites,
            index,
        })
    }

    /// Sets the tag of the program-wide required courses.
    pub fn with_program_tag(mut self, tag: impl Into<String>) -> Self {
        self.program_tag = tag.into();
        self
    }

    /// Tag of the program-wide required courses.
    pub fn program_tag(&self) -> &str {
        &self.program_tag
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog has no courses.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Looks up a course id by code.
    pub fn id_of(&self, code: &str) -> Option<CourseId> {
        self.index.get(code).copied()
    }

    /// Returns the course for an id issued by this catalog.
    ///
    /// # Panics
    /// If `id` was not issued by this catalog.
    #[inline]
    pub fn course(&self, id: CourseId) -> &Course {
        &self.courses[id.index()]
    }

    /// Resolved prerequisites of a course.
    #[inline]
    pub fn prerequisites(&self, id: CourseId) -> &[CourseId] {
        &self.prerequisites[id.index()]
    }

    /// Iterates `(id, course)` in table order.
    pub fn iter(&self) -> impl Iterator<Item = (CourseId, &Course)> {
        self.courses
            .iter()
            .enumerate()
            .map(|(i, c)| (CourseId(i as u32), c))
    }

    /// First course with the given role.
    pub fn first_with_role(&self, role: CourseRole) -> Option<CourseId> {
        self.iter().find(|(_, c)| c.role == role).map(|(id, _)| id)
    }

    /// The program's foundation course.
    pub fn foundation(&self) -> Option<CourseId> {
        self.first_with_role(CourseRole::Foundation)
    }

    /// The program's terminal capstone.
    pub fn terminal(&self) -> Option<CourseId> {
        self.first_with_role(CourseRole::Terminal)
    }

    /// Selects the courses to schedule for a set of specializations and
    /// chosen capstones.
    ///
    /// Order: program-wide courses, then each specialization's courses in
    /// the order requested, then the chosen capstones. Catalog order within
    /// a tag; duplicates keep their first position. Capstones are only
    /// included when chosen. Foundation and terminal courses are never
    /// part of the pool.
    pub fn select_pool<S: AsRef<str>>(
        &self,
        specializations: &[S],
        capstones: &[CourseId],
    ) -> Vec<CourseId> {
        let mut seen = HashSet::new();
        let mut pool = Vec::new();

        let tags = std::iter::once(self.program_tag.as_str())
            .chain(specializations.iter().map(|s| s.as_ref()));
        for tag in tags {
            for (id, course) in self.iter() {
                if course.role == CourseRole::Regular
                    && course.specialization == tag
                    && seen.insert(id)
                {
                    pool.push(id);
                }
            }
        }

        for &id in capstones {
            let placeable = !matches!(
                self.course(id).role,
                CourseRole::Foundation | CourseRole::Terminal
            );
            if placeable && seen.insert(id) {
                pool.push(id);
            }
        }

        pool
    }
}

impl TryFrom<CatalogData> for Catalog {
    type Error = CatalogError;

    fn try_from(data: CatalogData) -> Result<Self, Self::Error> {
        Ok(Catalog::new(data.courses)?.with_program_tag(data.program_tag))
    }
}

impl From<Catalog> for CatalogData {
    fn from(catalog: Catalog) -> Self {
        Self {
            program_tag: catalog.program_tag,
            courses: catalog.courses,
        }
    }
}
