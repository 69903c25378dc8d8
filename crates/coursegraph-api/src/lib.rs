//! Coursegraph API Library
//!
//! GraphQL schema over the course catalog.
//!
//! # Modules
//!
//! - [`types`] - Course, unit and page objects plus input types
//! - [`schema`] - Merged query and mutation roots

mod course;
mod page;
pub mod schema;
pub mod types;
mod unit;

pub use schema::{CourseSchema, Mutation, Query, build_schema, sdl};
