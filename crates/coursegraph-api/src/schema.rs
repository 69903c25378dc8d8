//! Schema roots.

use async_graphql::{EmptySubscription, MergedObject, Schema, extensions::Tracing};
use coursegraph_store::Catalog;

use crate::{
    course::{CourseMutation, CourseQuery},
    page::{PageMutation, PageQuery},
    unit::{UnitMutation, UnitQuery},
};

#[derive(Default, MergedObject)]
pub struct Query(CourseQuery, UnitQuery, PageQuery);

#[derive(Default, MergedObject)]
pub struct Mutation(CourseMutation, UnitMutation, PageMutation);

pub type CourseSchema = Schema<Query, Mutation, EmptySubscription>;

/// Build the schema with `catalog` available to every resolver.
pub fn build_schema(catalog: Catalog) -> CourseSchema {
    Schema::build(Query::default(), Mutation::default(), EmptySubscription)
        .data(catalog)
        .extension(Tracing)
        .finish()
}

/// Schema definition language for the API.
pub fn sdl() -> String {
    Schema::build(Query::default(), Mutation::default(), EmptySubscription)
        .finish()
        .sdl()
}
