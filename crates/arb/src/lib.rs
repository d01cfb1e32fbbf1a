//! ARB translation bundle handling
//!
//! This crate provides the localization file plumbing for flutterlane:
//! - Reading, writing and enumerating `intl_*.arb` bundles
//! - Suppressing spurious `@@last_modified`-only diffs after regeneration
//! - Cross-checking locale bundles against the canonical message bundle

pub mod bundle;
pub mod stabilize;
pub mod verify;

pub use bundle::{ArbBundle, CANONICAL_FILE_NAME, LAST_MODIFIED_KEY};
pub use stabilize::{Stabilized, stabilize};
pub use verify::{Discrepancy, compare, render_messages};
