//! Content reference validation.

use std::collections::HashSet;

use coursegraph_core::ContentKind;
use tracing::{debug, info};

use super::Catalog;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// One problem found in the content tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

/// Result of [`Catalog::check`].
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Number of courses inspected.
    pub courses: usize,
    pub findings: Vec<Finding>,
}

impl CheckReport {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.findings.push(Finding {
            severity: Severity::Error,
            message: msg.into(),
        });
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.findings.push(Finding {
            severity: Severity::Warning,
            message: msg.into(),
        });
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }
}

impl Catalog {
    /// Check that every course's unit and page references resolve.
    ///
    /// Errors: unreadable courses, duplicate unit ids, page ids that do not
    /// resolve to a page. Warnings: a page listed twice in one unit, and
    /// indexed pages that no unit references.
    pub async fn check(&self) -> CheckReport {
        let mut report = CheckReport::default();
        let index = self.store.index().await;
        let mut referenced = HashSet::new();

        for course_id in index.ids_of(ContentKind::Course) {
            report.courses += 1;

            let course = match self.load_course(&course_id).await {
                Ok(Some(course)) => course,
                Ok(None) => {
                    report.add_error(format!("course `{course_id}`: file is missing"));
                    continue;
                }
                Err(e) => {
                    report.add_error(format!("course `{course_id}`: {e}"));
                    continue;
                }
            };

            let mut unit_ids = HashSet::new();
            for unit in course.units() {
                if !unit_ids.insert(unit.id.as_str()) {
                    report.add_error(format!(
                        "course `{course_id}`: unit `{}` appears more than once",
                        unit.id
                    ));
                }

                let mut seen = HashSet::new();
                for page_id in &unit.pages {
                    referenced.insert(page_id.clone());

                    if !seen.insert(page_id.as_str()) {
                        report.add_warning(format!(
                            "course `{course_id}`, unit `{}`: page `{page_id}` is listed twice",
                            unit.id
                        ));
                    }

                    match index.get(page_id) {
                        Some(entry) if entry.typename == ContentKind::Page => {}
                        Some(entry) => report.add_error(format!(
                            "course `{course_id}`, unit `{}`: `{page_id}` is a {}, not a page",
                            unit.id, entry.typename
                        )),
                        None => report.add_error(format!(
                            "course `{course_id}`, unit `{}`: page `{page_id}` does not exist",
                            unit.id
                        )),
                    }
                }
            }

            debug!(course = %course_id, units = course.units().len(), "checked course");
        }

        for page_id in index.ids_of(ContentKind::Page) {
            if !referenced.contains(&page_id) {
                report.add_warning(format!("page `{page_id}` is not part of any unit"));
            }
        }

        info!(
            courses = report.courses,
            errors = report.errors().count(),
            warnings = report.warnings().count(),
            "content check complete"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::{
        CourseInput, UnitInput,
        test_support::{catalog_with_units, empty_catalog, page},
    };

    #[tokio::test]
    async fn test_clean_tree() {
        let (_dir, catalog) = catalog_with_units().await;
        catalog
            .save_page(page("Intro", "unit-a", None), None, None)
            .await
            .expect("page");

        let report = catalog.check().await;
        assert_eq!(report.courses, 1);
        assert!(report.findings.is_empty(), "{:?}", report.findings);
    }

    #[tokio::test]
    async fn test_dangling_and_orphaned_pages() {
        let (_dir, catalog) = empty_catalog().await;
        catalog
            .save_course(CourseInput {
                id: Some("nt".to_string()),
                ..CourseInput::default()
            })
            .await
            .expect("course");
        catalog
            .save_unit(UnitInput {
                id: Some("u".to_string()),
                title: "U".to_string(),
                course_id: "nt".to_string(),
                unit_order: None,
                pages: Some(vec!["gone".to_string(), "nt".to_string()]),
            })
            .await
            .expect("unit");
        catalog
            .save_page(page("Loose", "elsewhere", None), None, None)
            .await
            .expect("page");

        let report = catalog.check().await;

        assert!(report.has_errors());
        assert_eq!(report.errors().count(), 2);
        assert!(
            report
                .errors()
                .any(|f| f.message.contains("`gone` does not exist"))
        );
        assert!(
            report
                .errors()
                .any(|f| f.message.contains("is a course, not a page"))
        );
        assert!(
            report
                .warnings()
                .any(|f| f.message.contains("`loose` is not part of any unit"))
        );
    }
}
