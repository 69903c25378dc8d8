//! Mutation inputs.
//!
//! Optional fields mirror the GraphQL inputs: an absent id is derived from
//! the title, and an absent order appends.

/// Upsert of a course document.
#[derive(Debug, Clone, Default)]
pub struct CourseInput {
    pub id: Option<String>,
    pub title: Option<String>,
    pub version: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    /// When present, replaces the whole unit list.
    pub units: Option<Vec<CourseUnitInput>>,
}

/// A unit inside a bulk course save.
#[derive(Debug, Clone, Default)]
pub struct CourseUnitInput {
    pub id: Option<String>,
    pub title: Option<String>,
    pub pages: Option<Vec<CoursePageInput>>,
}

/// A page inside a bulk course save. Written only when id (or title),
/// title, content and page order are all present.
#[derive(Debug, Clone, Default)]
pub struct CoursePageInput {
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub page_order: Option<i64>,
}

/// Save of a single page into a unit.
#[derive(Debug, Clone, Default)]
pub struct PageInput {
    pub id: Option<String>,
    pub title: String,
    pub content: Option<String>,
    pub page_order: Option<i64>,
    pub unit_id: Option<String>,
    pub course_id: Option<String>,
}

/// Save of a unit into a course.
#[derive(Debug, Clone, Default)]
pub struct UnitInput {
    pub id: Option<String>,
    pub title: String,
    pub course_id: String,
    pub unit_order: Option<i64>,
    /// When absent, an existing unit keeps its page list.
    pub pages: Option<Vec<String>>,
}

/// A bulk-saved page that passed the presence checks.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidPage {
    pub id: String,
    pub title: String,
    pub content: String,
}

impl CoursePageInput {
    /// Apply the presence checks, deriving the id from the title if needed.
    pub(crate) fn validate(&self) -> Option<ValidPage> {
        let id = coursegraph_core::derive_id(self.id.as_deref(), self.title.as_deref()).ok()?;
        self.page_order?;

        Some(ValidPage {
            id,
            title: self.title.clone()?,
            content: self.content.clone()?,
        })
    }
}
