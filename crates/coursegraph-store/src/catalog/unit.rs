//! Unit queries and mutations.

use coursegraph_core::{Page, UnitEntry, derive_id};
use tracing::{error, info};

use super::{Catalog, UnitInput};
use crate::{
    error::Result,
    ordering::{insert_at, remove_first_by},
};

impl Catalog {
    /// Unit ids of a course in display order.
    ///
    /// `None` when the course is unknown or was never given a unit list.
    pub async fn list_units(&self, course_id: &str) -> Result<Option<Vec<String>>> {
        let course = self.load_course(course_id).await?;
        Ok(course
            .filter(|course| course.units.is_some())
            .map(|course| course.unit_ids()))
    }

    /// Resolve a unit's page ids. Ids that do not resolve to a page map to
    /// `None` in place.
    pub async fn unit_pages(&self, unit: &UnitEntry) -> Result<Vec<Option<Page>>> {
        let mut pages = Vec::with_capacity(unit.pages.len());
        for page_id in &unit.pages {
            pages.push(self.page(page_id).await?);
        }
        Ok(pages)
    }

    /// Create or update a unit and move it to `unit_order`.
    ///
    /// An existing unit keeps its page list unless the input carries one.
    pub async fn save_unit(&self, input: UnitInput) -> Result<UnitEntry> {
        let _guard = self.store.locks().lock(&input.course_id).await;
        let mut course = self.require_course(&input.course_id).await?;

        let id = derive_id(input.id.as_deref(), Some(&input.title))?;
        let existing = remove_first_by(course.units_mut(), |u| u.id == id);

        let pages = match (input.pages, existing) {
            (Some(pages), _) => pages,
            (None, Some(previous)) => previous.pages,
            (None, None) => Vec::new(),
        };

        let unit = UnitEntry::new(id, Some(input.title), pages);
        let position = insert_at(course.units_mut(), input.unit_order, unit.clone());

        self.persist_course(&course).await?;
        info!(course = %input.course_id, unit = %unit.id, position, "saved unit");
        Ok(unit)
    }

    /// Remove a unit from a course.
    ///
    /// Returns `false` when the unit is not there or anything fails.
    pub async fn delete_unit(&self, unit_id: &str, course_id: &str) -> bool {
        match self.try_delete_unit(unit_id, course_id).await {
            Ok(removed) => removed,
            Err(err) => {
                error!(unit = unit_id, course = course_id, error = %err, "failed to delete unit");
                false
            }
        }
    }

    async fn try_delete_unit(&self, unit_id: &str, course_id: &str) -> Result<bool> {
        let _guard = self.store.locks().lock(course_id).await;
        let mut course = self.require_course(course_id).await?;

        if remove_first_by(course.units_mut(), |u| u.id == unit_id).is_none() {
            info!(unit = unit_id, course = course_id, "unit not found, nothing to delete");
            return Ok(false);
        }

        self.persist_course(&course).await?;
        info!(unit = unit_id, course = course_id, "deleted unit");
        Ok(true)
    }
}
