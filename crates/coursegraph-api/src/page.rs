//! Page queries and mutations.

use async_graphql::{Context, Object, Result};
use coursegraph_store::Catalog;

use crate::types::{Page, PageInput};

#[derive(Default)]
pub struct PageQuery;

#[Object]
impl PageQuery {
    async fn page(&self, ctx: &Context<'_>, id: String) -> Result<Option<Page>> {
        let catalog = ctx.data::<Catalog>()?;
        Ok(catalog.page(&id).await?.map(Page::from))
    }
}

#[derive(Default)]
pub struct PageMutation;

#[Object]
impl PageMutation {
    /// Create or update a page and place it at `pageOrder` in its unit.
    ///
    /// `courseId` and `unitId` arguments win over the same input fields.
    async fn save_page(
        &self,
        ctx: &Context<'_>,
        input: PageInput,
        course_id: Option<String>,
        unit_id: Option<String>,
    ) -> Result<Page> {
        let catalog = ctx.data::<Catalog>()?;
        let page = catalog.save_page(input.into(), course_id, unit_id).await?;
        Ok(page.into())
    }

    /// Delete a page file and drop it from the course's units.
    async fn delete_page(
        &self,
        ctx: &Context<'_>,
        page_id: String,
        course_id: String,
        unit_id: Option<String>,
    ) -> Result<bool> {
        let catalog = ctx.data::<Catalog>()?;
        Ok(catalog
            .delete_page(&page_id, &course_id, unit_id.as_deref())
            .await)
    }
}
