//! Coursegraph Store Library
//!
//! File-backed content storage for coursegraph.
//!
//! # Modules
//!
//! - [`index`] - Content id to file path index (scan or external provider)
//! - [`source`] - Source file reader and writer over the index
//! - [`locks`] - Per-course write serialization
//! - [`ordering`] - Positional list edits for units and pages
//! - [`catalog`] - Course, unit and page operations

pub mod catalog;
pub mod error;
pub mod index;
pub mod locks;
pub mod ordering;
pub mod source;

pub use catalog::{
    Catalog, CheckReport, CourseInput, CoursePageInput, CourseUnitInput, Finding, PageInput,
    Severity, UnitInput,
};
pub use error::{Result, StoreError};
pub use index::{ContentIndex, IndexEntry};
pub use source::{ContentStore, SourceFile};
