//! Flutter toolchain integration for flutterlane
//!
//! This crate provides the pipeline-facing Flutter functionality:
//! - Toolchain invocation (build, test, analyze, format, generators)
//! - Artifact path recovery from build output
//! - Build number/name resolution from VCS and CI metadata
//! - The localization synchronization workflow

pub mod artifacts;
pub mod build;
pub mod l10n;
pub mod tool;
pub mod version;

pub use build::{BuildOptions, Platform, run_build};
pub use l10n::{L10nOptions, run_l10n};
pub use tool::FlutterTool;
pub use version::{BuildMetadata, PipelineMetadata, resolve_build_name, resolve_build_number};
