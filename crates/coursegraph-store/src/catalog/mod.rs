//! Course, unit and page operations over a [`ContentStore`].
//!
//! Every operation that rewrites a course document holds that course's
//! lock for the whole read-modify-write.

mod course;
mod input;
mod page;
mod report;
mod unit;

use std::sync::Arc;

use coursegraph_core::{ContentKind, CourseDocument, validate_id};

pub use input::{CourseInput, CoursePageInput, CourseUnitInput, PageInput, UnitInput};
pub use report::{CheckReport, Finding, Severity};

use crate::{
    error::{Result, StoreError},
    source::ContentStore,
};

/// Entry point for all content operations.
#[derive(Debug, Clone)]
pub struct Catalog {
    store: Arc<ContentStore>,
}

impl Catalog {
    pub fn new(store: Arc<ContentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// Load a course document, filling in the id if the file omits it.
    async fn load_course(&self, course_id: &str) -> Result<Option<CourseDocument>> {
        let file = self
            .store
            .read::<CourseDocument>(course_id, ContentKind::Course)
            .await?;

        Ok(file.map(|file| {
            let mut course = file.frontmatter;
            if course.id.is_empty() {
                course.id = course_id.to_string();
            }
            course
        }))
    }

    /// Load a course document that a mutation depends on.
    async fn require_course(&self, course_id: &str) -> Result<CourseDocument> {
        validate_id(course_id)?;
        self.load_course(course_id)
            .await?
            .ok_or_else(|| StoreError::CourseNotFound(course_id.to_string()))
    }

    async fn persist_course(&self, course: &CourseDocument) -> Result<()> {
        self.store
            .write(&course.id, ContentKind::Course, course, None, None)
            .await
    }
}
