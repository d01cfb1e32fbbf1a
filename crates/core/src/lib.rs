//! Core utilities for the flutterlane release tooling
//!
//! This crate provides shared functionality used across the pipeline steps:
//!
//! - **Error handling**: structured errors with codes, context, and recovery suggestions
//! - **Process execution**: captured and streaming subprocess invocation
//! - **VCS queries**: commit count, tag description, dirty-tree detection via command-line git
//! - **Configuration**: TOML-based project defaults
//!
//! # Example
//!
//! ```rust,no_run
//! use flutterlane_core::vcs::VcsRepo;
//!
//! let repo = VcsRepo::open_current().expect("Not a git repo");
//! let commits = repo.commit_count().expect("Failed to count commits");
//! println!("{} commits on HEAD", commits);
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod process;
pub mod vcs;

pub use error::{Error, ErrorCode, Result, ResultExt};
