//! Configuration loading and schema definitions
//!
//! Project-level defaults for the release pipeline steps.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
