//! Artifact path recovery from build output
//!
//! Flutter reports the produced binary as a plain-text line; there is no
//! machine-readable channel for it. The pattern below is the contract
//! this tool depends on and is pinned by golden-output tests — if a
//! toolchain release changes the wording, this is the one place to
//! update.
//!
//! Known shapes:
//!
//! ```text
//! Built /Users/foo/src/flutter/build/output/myapp.app.
//! Built build/output/myapp.apk (32.4MB).
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

static BUILT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^Built (.+?)(?: \([^)]*\))?\.$").expect("static pattern"));

/// Extract the artifact path from build output, if reported
pub fn parse_built_path(output: &str) -> Option<&str> {
    BUILT_PATTERN
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Absolutize a reported artifact path against the current directory
pub fn absolute_artifact_path(raw: &str) -> PathBuf {
    std::path::absolute(raw).unwrap_or_else(|_| PathBuf::from(raw))
}
