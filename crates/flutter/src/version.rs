//! Build number and build name resolution
//!
//! Pipeline parameters may override the pubspec build number/name either
//! with a literal value or with a schema string describing an external
//! metadata source:
//!
//! - `ci`, `ci+1000` — CI build number from the environment, plus offset
//! - `vcs`, `vcs+57` — commit count reachable from HEAD, plus offset
//! - `vcs`, `vcs*` (name) — `git describe` output, `*` appended on a
//!   dirty tree
//!
//! Each external source is queried at most once per invocation.

use flutterlane_core::error::{Error, ErrorCode, Result};
use flutterlane_core::vcs::VcsRepo;
use once_cell::sync::Lazy;
use once_cell::unsync::OnceCell;
use regex::Regex;

/// Marker appended to a VCS-derived build name when the tree is dirty
pub const DIRTY_MARKER: &str = "*";

static NUMBER_SCHEMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(ci|vcs)(?:\+(\d+))?$").expect("static pattern"));
static NAME_SCHEMA: Lazy<Regex> = Lazy::new(|| Regex::new(r"^vcs(\*)?$").expect("static pattern"));

/// External metadata the version schemas draw from
pub trait BuildMetadata {
    /// Build number supplied by the CI environment
    fn ci_build_number(&self) -> Result<u64>;
    /// Number of commits reachable from HEAD
    fn commit_count(&self) -> Result<u64>;
    /// Tag-based version description of HEAD
    fn version_description(&self) -> Result<String>;
    /// Whether the working tree has uncommitted changes
    fn tree_dirty(&self) -> Result<bool>;
}

/// Production metadata source: git queries plus a CI environment variable
///
/// Every query is cached, so resolving both a number and a name hits
/// each underlying source once.
pub struct PipelineMetadata {
    ci_env: String,
    repo: OnceCell<VcsRepo>,
    ci_build_number: OnceCell<u64>,
    commit_count: OnceCell<u64>,
    description: OnceCell<String>,
    dirty: OnceCell<bool>,
}

impl PipelineMetadata {
    /// Create a metadata source reading the CI build number from `ci_env`
    pub fn new(ci_env: impl Into<String>) -> Self {
        Self {
            ci_env: ci_env.into(),
            repo: OnceCell::new(),
            ci_build_number: OnceCell::new(),
            commit_count: OnceCell::new(),
            description: OnceCell::new(),
            dirty: OnceCell::new(),
        }
    }

    fn repo(&self) -> Result<&VcsRepo> {
        self.repo.get_or_try_init(VcsRepo::open_current)
    }
}

impl BuildMetadata for PipelineMetadata {
    fn ci_build_number(&self) -> Result<u64> {
        self.ci_build_number
            .get_or_try_init(|| {
                let raw = std::env::var(&self.ci_env).map_err(|_| {
                    Error::new(
                        ErrorCode::MissingCiValue,
                        format!("CI build number variable {} is not set", self.ci_env),
                    )
                    .with_suggestion(
                        "Set the variable in the CI environment, or configure \
                         build.ci_build_number_env",
                    )
                })?;
                raw.trim().parse().map_err(|_| {
                    Error::new(
                        ErrorCode::MissingCiValue,
                        format!(
                            "CI build number {:?} from {} is not an integer",
                            raw, self.ci_env
                        ),
                    )
                })
            })
            .copied()
    }

    fn commit_count(&self) -> Result<u64> {
        self.commit_count
            .get_or_try_init(|| self.repo()?.commit_count())
            .copied()
    }

    fn version_description(&self) -> Result<String> {
        self.description
            .get_or_try_init(|| self.repo()?.describe())
            .cloned()
    }

    fn tree_dirty(&self) -> Result<bool> {
        self.dirty.get_or_try_init(|| self.repo()?.is_dirty()).copied()
    }
}

/// Resolve a build number override
///
/// `None` means no override. A plain integer is returned verbatim;
/// `ci[+N]` / `vcs[+N]` derive the number from the named source; any
/// other input is a configuration error.
pub fn resolve_build_number(
    input: Option<&str>,
    meta: &dyn BuildMetadata,
) -> Result<Option<u64>> {
    let Some(input) = input else {
        return Ok(None);
    };

    if let Ok(literal) = input.parse::<u64>() {
        return Ok(Some(literal));
    }

    let caps = NUMBER_SCHEMA
        .captures(input)
        .ok_or_else(|| Error::unknown_schema(input))?;

    let base = match &caps[1] {
        "ci" => meta.ci_build_number()?,
        "vcs" => meta.commit_count()?,
        _ => return Err(Error::unknown_schema(input)),
    };
    let offset: u64 = match caps.get(2) {
        Some(m) => m
            .as_str()
            .parse()
            .map_err(|_| Error::unknown_schema(input))?,
        None => 0,
    };

    let number = base.checked_add(offset).ok_or_else(|| {
        Error::config(format!("Build number overflow: {} + {}", base, offset))
    })?;
    Ok(Some(number))
}

/// Resolve a build name override
///
/// `None` means no override. `vcs` and `vcs*` derive the name from the
/// tag description, with `*` appended when the tree is dirty; anything
/// else is passed through as a literal name.
pub fn resolve_build_name(
    input: Option<&str>,
    meta: &dyn BuildMetadata,
) -> Result<Option<String>> {
    let Some(input) = input else {
        return Ok(None);
    };

    let Some(caps) = NAME_SCHEMA.captures(input) else {
        return Ok(Some(input.to_string()));
    };

    let mut name = meta.version_description()?;
    if caps.get(1).is_some() && meta.tree_dirty()? {
        name.push_str(DIRTY_MARKER);
    }
    Ok(Some(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeMetadata {
        ci: Option<u64>,
        commits: u64,
        description: &'static str,
        dirty: bool,
    }

    impl Default for FakeMetadata {
        fn default() -> Self {
            Self {
                ci: None,
                commits: 743,
                description: "2.4.2-10-gbadf00d",
                dirty: false,
            }
        }
    }

    impl BuildMetadata for FakeMetadata {
        fn ci_build_number(&self) -> Result<u64> {
            self.ci.ok_or_else(|| {
                Error::new(ErrorCode::MissingCiValue, "CI build number is not set")
            })
        }

        fn commit_count(&self) -> Result<u64> {
            Ok(self.commits)
        }

        fn version_description(&self) -> Result<String> {
            Ok(self.description.to_string())
        }

        fn tree_dirty(&self) -> Result<bool> {
            Ok(self.dirty)
        }
    }

    #[test]
    fn test_no_override() {
        let meta = FakeMetadata::default();
        assert_eq!(resolve_build_number(None, &meta).unwrap(), None);
        assert_eq!(resolve_build_name(None, &meta).unwrap(), None);
    }

    #[test]
    fn test_literal_number() {
        let meta = FakeMetadata::default();
        assert_eq!(resolve_build_number(Some("42"), &meta).unwrap(), Some(42));
    }

    #[test]
    fn test_vcs_number_with_offset() {
        let meta = FakeMetadata::default();
        assert_eq!(
            resolve_build_number(Some("vcs+57"), &meta).unwrap(),
            Some(800)
        );
    }

    #[test]
    fn test_vcs_number_without_offset() {
        let meta = FakeMetadata::default();
        assert_eq!(resolve_build_number(Some("vcs"), &meta).unwrap(), Some(743));
    }

    #[test]
    fn test_ci_number() {
        let meta = FakeMetadata {
            ci: Some(120),
            ..FakeMetadata::default()
        };
        assert_eq!(
            resolve_build_number(Some("ci+1000"), &meta).unwrap(),
            Some(1120)
        );
    }

    #[test]
    fn test_ci_number_unset_fails() {
        let meta = FakeMetadata::default();
        let err = resolve_build_number(Some("ci"), &meta).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingCiValue);
    }

    #[test]
    fn test_unknown_number_schema() {
        let meta = FakeMetadata::default();
        let err = resolve_build_number(Some("svn+2"), &meta).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownSchema);
    }

    #[test]
    fn test_name_from_vcs_with_dirty_tree() {
        let meta = FakeMetadata {
            dirty: true,
            ..FakeMetadata::default()
        };
        assert_eq!(
            resolve_build_name(Some("vcs*"), &meta).unwrap(),
            Some("2.4.2-10-gbadf00d*".to_string())
        );
    }

    #[test]
    fn test_name_from_vcs_dirty_marker_needs_opt_in() {
        let meta = FakeMetadata {
            dirty: true,
            ..FakeMetadata::default()
        };
        assert_eq!(
            resolve_build_name(Some("vcs"), &meta).unwrap(),
            Some("2.4.2-10-gbadf00d".to_string())
        );
    }

    #[test]
    fn test_name_from_vcs_clean_tree() {
        let meta = FakeMetadata::default();
        assert_eq!(
            resolve_build_name(Some("vcs*"), &meta).unwrap(),
            Some("2.4.2-10-gbadf00d".to_string())
        );
    }

    #[test]
    fn test_literal_name_passes_through() {
        let meta = FakeMetadata::default();
        assert_eq!(
            resolve_build_name(Some("1.2.3"), &meta).unwrap(),
            Some("1.2.3".to_string())
        );
    }

    #[test]
    fn test_pipeline_metadata_missing_env() {
        let meta = PipelineMetadata::new("FLUTTERLANE_TEST_UNSET_VAR_12345");
        let err = meta.ci_build_number().unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingCiValue);
    }
}
