//! Page queries and mutations.

use coursegraph_core::{ContentKind, Page, PageFrontmatter, derive_id};
use tracing::{debug, error, info, warn};

use super::{Catalog, PageInput};
use crate::{
    error::{Result, StoreError},
    ordering::{remove_first, reposition},
};

impl Catalog {
    /// Look up a page by id.
    pub async fn page(&self, id: &str) -> Result<Option<Page>> {
        let file = self
            .store
            .read::<PageFrontmatter>(id, ContentKind::Page)
            .await?;

        Ok(file.map(|file| Page {
            id: if file.frontmatter.id.is_empty() {
                id.to_string()
            } else {
                file.frontmatter.id
            },
            title: file.frontmatter.title,
            content: file.content,
        }))
    }

    /// Write a page and move it to `page_order` within its unit.
    ///
    /// `course_id` and `unit_id` take precedence over the same fields in
    /// `input`. The page file is written before the course document; if
    /// the course cannot be persisted the page write is undone.
    pub async fn save_page(
        &self,
        input: PageInput,
        course_id: Option<String>,
        unit_id: Option<String>,
    ) -> Result<Page> {
        let course_id = course_id
            .or(input.course_id)
            .ok_or(StoreError::MissingField("courseId"))?;
        let unit_id = unit_id.or(input.unit_id);

        let _guard = self.store.locks().lock(&course_id).await;
        let mut course = self.require_course(&course_id).await?;

        let id = derive_id(input.id.as_deref(), Some(&input.title))?;
        self.store.ensure_id_available(&id, ContentKind::Page).await?;

        let content = input.content.unwrap_or_default();
        let frontmatter = PageFrontmatter::new(id.as_str(), Some(input.title.clone()));
        let snapshot = self.store.snapshot(&id).await?;
        self.store
            .write(
                &id,
                ContentKind::Page,
                &frontmatter,
                Some(&content),
                Some(&course_id),
            )
            .await?;

        match unit_id.as_deref() {
            Some(unit_id) => match course.unit_mut(unit_id) {
                Some(unit) => {
                    let position = reposition(&mut unit.pages, id.clone(), input.page_order);
                    debug!(course = %course_id, unit = unit_id, page = %id, position, "placed page");
                }
                None => {
                    warn!(course = %course_id, unit = unit_id, page = %id, "unit not found, page saved without placement");
                }
            },
            None => debug!(course = %course_id, page = %id, "no unit given, page saved without placement"),
        }

        if let Err(err) = self.persist_course(&course).await {
            error!(course = %course_id, page = %id, error = %err, "failed to persist course, rolling back page");
            if let Err(rollback) = self.store.restore(snapshot).await {
                error!(page = %id, error = %rollback, "rollback failed");
            }
            return Err(err);
        }

        info!(course = %course_id, page = %id, "saved page");
        Ok(Page {
            id,
            title: Some(input.title),
            content,
        })
    }

    /// Delete a page and drop it from the course's units.
    ///
    /// Every failure is logged and reported as `false`.
    pub async fn delete_page(&self, page_id: &str, course_id: &str, unit_id: Option<&str>) -> bool {
        match self.try_delete_page(page_id, course_id, unit_id).await {
            Ok(()) => true,
            Err(err) => {
                error!(page = page_id, course = course_id, error = %err, "failed to delete page");
                false
            }
        }
    }

    async fn try_delete_page(
        &self,
        page_id: &str,
        course_id: &str,
        unit_id: Option<&str>,
    ) -> Result<()> {
        let _guard = self.store.locks().lock(course_id).await;
        let mut course = self.require_course(course_id).await?;
        debug!(page = page_id, course = course_id, ?unit_id, "deleting page");

        if let Some(unit_id) = unit_id
            && course.unit(unit_id).is_none()
        {
            return Err(StoreError::UnitNotFound {
                unit_id: unit_id.to_string(),
                course_id: course_id.to_string(),
            });
        }

        match self.store.entry(page_id).await {
            Some(entry) if entry.typename == ContentKind::Page => {
                if let Err(err) = self.store.delete(page_id).await {
                    warn!(page = page_id, error = %err, "could not delete page file");
                }
            }
            Some(entry) => {
                warn!(page = page_id, kind = %entry.typename, "id is not a page, leaving its file alone");
            }
            None => warn!(page = page_id, "page is not indexed"),
        }

        let page_id = page_id.to_string();
        match unit_id {
            Some(unit_id) => {
                if let Some(unit) = course.unit_mut(unit_id)
                    && remove_first(&mut unit.pages, &page_id)
                {
                    debug!(page = %page_id, unit = unit_id, "removed page from unit");
                }
            }
            None => {
                for unit in course.units_mut() {
                    if remove_first(&mut unit.pages, &page_id) {
                        debug!(page = %page_id, unit = %unit.id, "removed page from unit");
                    }
                }
            }
        }

        self.persist_course(&course).await?;
        info!(page = %page_id, course = course_id, "deleted page");
        Ok(())
    }
}
