//! Course queries and the bulk course upsert.

use coursegraph_core::{ContentKind, CourseDocument, PageFrontmatter, UnitEntry, derive_id};
use tracing::{debug, info, warn};

use super::{Catalog, CourseInput, CourseUnitInput};
use crate::error::Result;

impl Catalog {
    /// Look up a course by id.
    pub async fn course(&self, id: &str) -> Result<Option<CourseDocument>> {
        self.load_course(id).await
    }

    /// Ids of every indexed course, in index order.
    pub async fn list_courses(&self) -> Vec<String> {
        self.store.ids_of(ContentKind::Course).await
    }

    /// Create or update a course.
    ///
    /// Scalar fields are only replaced when the input carries a non-empty
    /// value. A unit list in the input replaces the stored one; its valid
    /// pages are written as page files before the course is persisted.
    pub async fn save_course(&self, input: CourseInput) -> Result<CourseDocument> {
        let course_id = derive_id(input.id.as_deref(), input.title.as_deref())?;
        let _guard = self.store.locks().lock(&course_id).await;

        let mut course = match self.load_course(&course_id).await? {
            Some(course) => course,
            None => {
                self.store
                    .ensure_id_available(&course_id, ContentKind::Course)
                    .await?;
                self.store.setup_course_dirs(&course_id).await?;
                CourseDocument::new(course_id.as_str())
            }
        };

        course.id = course_id.clone();
        course.kind = ContentKind::Course;
        merge_field(&mut course.title, input.title);
        merge_field(&mut course.version, input.version);
        merge_field(&mut course.subtitle, input.subtitle);
        merge_field(&mut course.author, input.author);

        if let Some(units) = input.units {
            course.units = Some(self.save_course_units(&course_id, units).await?);
        }

        self.persist_course(&course).await?;
        info!(course = %course_id, units = course.units().len(), "saved course");
        Ok(course)
    }

    /// Write the pages of a replacement unit list and build its entries.
    async fn save_course_units(
        &self,
        course_id: &str,
        units: Vec<CourseUnitInput>,
    ) -> Result<Vec<UnitEntry>> {
        let mut entries = Vec::with_capacity(units.len());

        for unit in units {
            let unit_id = derive_id(unit.id.as_deref(), unit.title.as_deref())?;
            let mut page_ids = Vec::new();

            for page in unit.pages.unwrap_or_default() {
                let Some(valid) = page.validate() else {
                    warn!(course = course_id, unit = %unit_id, ?page, "page is missing required fields, skipping");
                    continue;
                };

                self.store
                    .ensure_id_available(&valid.id, ContentKind::Page)
                    .await?;
                let frontmatter = PageFrontmatter::new(valid.id.as_str(), Some(valid.title));
                self.store
                    .write(
                        &valid.id,
                        ContentKind::Page,
                        &frontmatter,
                        Some(&valid.content),
                        Some(course_id),
                    )
                    .await?;
                debug!(course = course_id, unit = %unit_id, page = %valid.id, "wrote page");
                page_ids.push(valid.id);
            }

            entries.push(UnitEntry::new(unit_id, unit.title, page_ids));
        }

        Ok(entries)
    }
}

/// Replace `slot` only when `value` is present and non-empty.
fn merge_field(slot: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        *slot = Some(value);
    }
}
