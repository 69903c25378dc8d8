//! Course queries and mutations.

use async_graphql::{Context, Object, Result};
use coursegraph_store::Catalog;

use crate::types::{Course, CourseInput};

#[derive(Default)]
pub struct CourseQuery;

#[Object]
impl CourseQuery {
    /// A course by id, or `null` when there is none.
    async fn course(&self, ctx: &Context<'_>, id: String) -> Result<Option<Course>> {
        let catalog = ctx.data::<Catalog>()?;
        Ok(catalog.course(&id).await?.map(Course::from))
    }

    /// Ids of every known course.
    async fn list_courses(&self, ctx: &Context<'_>) -> Result<Vec<String>> {
        let catalog = ctx.data::<Catalog>()?;
        Ok(catalog.list_courses().await)
    }
}

#[derive(Default)]
pub struct CourseMutation;

#[Object]
impl CourseMutation {
    /// Create or update a course. A `units` list replaces the stored one.
    async fn save_course(&self, ctx: &Context<'_>, input: CourseInput) -> Result<Course> {
        let catalog = ctx.data::<Catalog>()?;
        let course = catalog.save_course(input.into()).await?;
        Ok(course.into())
    }
}
