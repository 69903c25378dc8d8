//! GraphQL object and input types.
//!
//! Objects wrap the content model from `coursegraph-core`; inputs convert
//! into the plain input structs the catalog takes.

use async_graphql::{Context, InputObject, Object, Result, SimpleObject};
use coursegraph_core::{CourseDocument, UnitEntry};
use coursegraph_store::{self as store, Catalog};

/// A course with its ordered units.
pub struct Course(pub CourseDocument);

#[Object]
impl Course {
    async fn id(&self) -> &str {
        &self.0.id
    }

    async fn title(&self) -> Option<&str> {
        self.0.title.as_deref()
    }

    async fn version(&self) -> Option<&str> {
        self.0.version.as_deref()
    }

    async fn subtitle(&self) -> Option<&str> {
        self.0.subtitle.as_deref()
    }

    async fn author(&self) -> Option<&str> {
        self.0.author.as_deref()
    }

    async fn units(&self) -> Vec<Unit> {
        self.0.units().iter().cloned().map(Unit).collect()
    }
}

impl From<CourseDocument> for Course {
    fn from(doc: CourseDocument) -> Self {
        Self(doc)
    }
}

/// A unit inside a course.
pub struct Unit(pub UnitEntry);

#[Object]
impl Unit {
    async fn id(&self) -> &str {
        &self.0.id
    }

    async fn title(&self) -> Option<&str> {
        self.0.title.as_deref()
    }

    /// Pages in unit order. Ids that no longer resolve come back as `null`.
    async fn pages(&self, ctx: &Context<'_>) -> Result<Vec<Option<Page>>> {
        let catalog = ctx.data::<Catalog>()?;
        let pages = catalog.unit_pages(&self.0).await?;
        Ok(pages.into_iter().map(|p| p.map(Page::from)).collect())
    }
}

impl From<UnitEntry> for Unit {
    fn from(entry: UnitEntry) -> Self {
        Self(entry)
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Page {
    pub id: String,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl From<coursegraph_core::Page> for Page {
    fn from(page: coursegraph_core::Page) -> Self {
        Self {
            id: page.id,
            title: page.title,
            content: Some(page.content),
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct PageInput {
    pub id: Option<String>,
    pub title: String,
    pub content: Option<String>,
    /// Position within the unit; negative counts from the end.
    pub page_order: Option<i32>,
    pub unit_id: Option<String>,
    pub course_id: Option<String>,
}

impl From<PageInput> for store::PageInput {
    fn from(input: PageInput) -> Self {
        Self {
            id: input.id,
            title: input.title,
            content: input.content,
            page_order: input.page_order.map(i64::from),
            unit_id: input.unit_id,
            course_id: input.course_id,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct UnitPageInput {
    pub id: String,
}

#[derive(Debug, Clone, InputObject)]
pub struct UnitInput {
    pub id: Option<String>,
    pub title: String,
    pub course_id: String,
    pub unit_order: Option<i32>,
    /// Replaces the unit's page list when given.
    pub pages: Option<Vec<UnitPageInput>>,
}

impl From<UnitInput> for store::UnitInput {
    fn from(input: UnitInput) -> Self {
        Self {
            id: input.id,
            title: input.title,
            course_id: input.course_id,
            unit_order: input.unit_order.map(i64::from),
            pages: input
                .pages
                .map(|pages| pages.into_iter().map(|p| p.id).collect()),
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct CoursePageInput {
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub page_order: Option<i32>,
}

impl From<CoursePageInput> for store::CoursePageInput {
    fn from(input: CoursePageInput) -> Self {
        Self {
            id: input.id,
            title: input.title,
            content: input.content,
            page_order: input.page_order.map(i64::from),
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct CourseUnitInput {
    pub id: Option<String>,
    pub title: Option<String>,
    pub pages: Option<Vec<CoursePageInput>>,
}

impl From<CourseUnitInput> for store::CourseUnitInput {
    fn from(input: CourseUnitInput) -> Self {
        Self {
            id: input.id,
            title: input.title,
            pages: input
                .pages
                .map(|pages| pages.into_iter().map(Into::into).collect()),
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct CourseInput {
    pub id: Option<String>,
    pub title: Option<String>,
    pub version: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    /// Replaces the course's unit list when given.
    pub units: Option<Vec<CourseUnitInput>>,
}

impl From<CourseInput> for store::CourseInput {
    fn from(input: CourseInput) -> Self {
        Self {
            id: input.id,
            title: input.title,
            version: input.version,
            subtitle: input.subtitle,
            author: input.author,
            units: input
                .units
                .map(|units| units.into_iter().map(Into::into).collect()),
        }
    }
}
