//! Multi-platform build dispatch
//!
//! Builds run strictly in sequence, one platform completing before the
//! next begins; the first failure aborts the run. On success the
//! artifact path is recovered from the build output and returned keyed
//! by platform.

use crate::artifacts;
use crate::tool::FlutterTool;
use flutterlane_cli::output::Status;
use flutterlane_core::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// A supported target platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    /// All supported platforms, in build order
    pub const ALL: [Platform; 2] = [Platform::Ios, Platform::Android];

    /// The `flutter build` target name for this platform
    pub fn build_target(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "apk",
        }
    }

    /// The platform identifier used in results and messages
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters for a build step
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Build only this platform; `None` builds all supported platforms
    pub platform: Option<Platform>,
    /// Build a debug version of the app
    pub debug: bool,
    /// Sign the iOS app; disabling passes `--no-codesign` through
    pub codesign: bool,
    /// Resolved build number override
    pub build_number: Option<u64>,
    /// Resolved build name override
    pub build_name: Option<String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            platform: None,
            debug: false,
            codesign: true,
            build_number: None,
            build_name: None,
        }
    }
}

/// Assemble the `flutter build` argument list for one platform
pub fn assemble_args(platform: Platform, opts: &BuildOptions) -> Vec<String> {
    let mut args = vec!["build".to_string(), platform.build_target().to_string()];

    if opts.debug {
        args.push("--debug".to_string());
    }
    if !opts.codesign && platform == Platform::Ios {
        args.push("--no-codesign".to_string());
    }
    if let Some(number) = opts.build_number {
        args.push("--build-number".to_string());
        args.push(number.to_string());
    }
    if let Some(name) = &opts.build_name {
        args.push("--build-name".to_string());
        args.push(name.clone());
    }

    args
}

/// Build the selected platforms and collect produced artifact paths
///
/// A platform whose output does not report an artifact path is absent
/// from the result map.
pub fn run_build(
    tool: &FlutterTool,
    opts: &BuildOptions,
) -> Result<BTreeMap<Platform, PathBuf>> {
    let platforms: Vec<Platform> = match opts.platform {
        Some(platform) => vec![platform],
        None => Platform::ALL.to_vec(),
    };

    let mut outputs = BTreeMap::new();
    for platform in platforms {
        let args = assemble_args(platform, opts);
        let result = tool.run(&args)?;

        if !result.success {
            let mut err = Error::tool(format!("flutter build {} has failed", platform));
            let detail = result.stderr.trim();
            if !detail.is_empty() {
                err = err.with_context(detail.to_string());
            }
            return Err(err);
        }

        match artifacts::parse_built_path(&result.combined_output()) {
            Some(raw) => {
                outputs.insert(platform, artifacts::absolute_artifact_path(raw));
            }
            None => Status::warning(&format!(
                "flutter build {} did not report an artifact path",
                platform
            )),
        }
    }

    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_args_defaults() {
        let opts = BuildOptions::default();
        assert_eq!(assemble_args(Platform::Android, &opts), vec!["build", "apk"]);
        assert_eq!(assemble_args(Platform::Ios, &opts), vec!["build", "ios"]);
    }

    #[test]
    fn test_assemble_args_with_version_overrides() {
        let opts = BuildOptions {
            build_number: Some(800),
            build_name: Some("2.4.2-10-gbadf00d*".to_string()),
            ..BuildOptions::default()
        };
        assert_eq!(
            assemble_args(Platform::Android, &opts),
            vec![
                "build",
                "apk",
                "--build-number",
                "800",
                "--build-name",
                "2.4.2-10-gbadf00d*",
            ]
        );
    }

    #[test]
    fn test_assemble_args_no_codesign_is_ios_only() {
        let opts = BuildOptions {
            codesign: false,
            ..BuildOptions::default()
        };
        assert_eq!(
            assemble_args(Platform::Ios, &opts),
            vec!["build", "ios", "--no-codesign"]
        );
        assert_eq!(assemble_args(Platform::Android, &opts), vec!["build", "apk"]);
    }

    #[test]
    fn test_assemble_args_debug() {
        let opts = BuildOptions {
            debug: true,
            ..BuildOptions::default()
        };
        assert_eq!(
            assemble_args(Platform::Android, &opts),
            vec!["build", "apk", "--debug"]
        );
    }

    #[test]
    fn test_platform_order_ios_first() {
        assert_eq!(Platform::ALL, [Platform::Ios, Platform::Android]);
        assert!(Platform::Ios < Platform::Android);
    }

    #[test]
    fn test_run_build_fails_fast_on_tool_failure() {
        let tool = FlutterTool::new("false");
        let opts = BuildOptions {
            platform: Some(Platform::Ios),
            ..BuildOptions::default()
        };
        let err = run_build(&tool, &opts).unwrap_err();
        assert!(err.to_string().contains("flutter build ios has failed"));
    }

    #[test]
    fn test_run_build_without_artifact_line() {
        // `echo` succeeds but never prints a `Built …` line.
        let tool = FlutterTool::new("echo");
        let opts = BuildOptions {
            platform: Some(Platform::Android),
            ..BuildOptions::default()
        };
        let outputs = run_build(&tool, &opts).unwrap();
        assert!(outputs.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_build_captures_artifact_path() {
        use std::os::unix::fs::PermissionsExt;

        // Stand-in for flutter that reports an artifact like a release build.
        let tmp = tempfile::TempDir::new().unwrap();
        let script = tmp.path().join("fake-flutter");
        std::fs::write(
            &script,
            "#!/bin/sh\necho 'Built build/output/myapp.apk (32.4MB).'\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let tool = FlutterTool::new(script.to_str().unwrap());
        let opts = BuildOptions {
            platform: Some(Platform::Android),
            ..BuildOptions::default()
        };
        let outputs = run_build(&tool, &opts).unwrap();
        let path = outputs.get(&Platform::Android).unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("build/output/myapp.apk"));
    }
}
