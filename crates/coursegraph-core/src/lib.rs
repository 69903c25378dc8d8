//! Coursegraph Core Library
//!
//! Content model, front-matter handling, id derivation, configuration and
//! error types shared by the coursegraph crates.

pub mod config;
pub mod content;
pub mod error;
pub mod frontmatter;
pub mod slug;

pub use config::Config;
pub use content::{ContentKind, CourseDocument, Page, PageFrontmatter, UnitEntry};
pub use error::{CoreError, Result};
pub use slug::{derive_id, slugify, validate_id};
