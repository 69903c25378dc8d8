//! Unit queries and mutations.

use async_graphql::{Context, Object, Result};
use coursegraph_store::Catalog;

use crate::types::{Unit, UnitInput};

#[derive(Default)]
pub struct UnitQuery;

#[Object]
impl UnitQuery {
    /// Unit ids of a course in order. `null` when the course has no units.
    async fn list_units(&self, ctx: &Context<'_>, course_id: String) -> Result<Option<Vec<String>>> {
        let catalog = ctx.data::<Catalog>()?;
        Ok(catalog.list_units(&course_id).await?)
    }
}

#[derive(Default)]
pub struct UnitMutation;

#[Object]
impl UnitMutation {
    async fn save_unit(&self, ctx: &Context<'_>, input: UnitInput) -> Result<Unit> {
        let catalog = ctx.data::<Catalog>()?;
        let unit = catalog.save_unit(input.into()).await?;
        Ok(unit.into())
    }

    /// `false` when the unit was not found or the course could not be saved.
    async fn delete_unit(
        &self,
        ctx: &Context<'_>,
        unit_id: String,
        course_id: String,
    ) -> Result<bool> {
        let catalog = ctx.data::<Catalog>()?;
        Ok(catalog.delete_unit(&unit_id, &course_id).await)
    }
}
