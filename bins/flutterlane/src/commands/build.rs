//! Build command - build per platform and report artifact paths

use flutterlane_cli::output::{Status, format_duration};
use flutterlane_core::config::Config;
use flutterlane_core::error::{Result, exit_codes};
use flutterlane_flutter::build::{BuildOptions, run_build};
use flutterlane_flutter::tool::FlutterTool;
use flutterlane_flutter::version::{
    PipelineMetadata, resolve_build_name, resolve_build_number,
};
use flutterlane_flutter::Platform;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::debug;

/// Resolved CLI arguments for the build command
pub struct BuildArgs {
    pub platform: Option<Platform>,
    pub debug: bool,
    pub codesign: bool,
    pub build_number_override: Option<String>,
    pub build_name_override: Option<String>,
}

/// Run the build command
pub fn run(tool: &FlutterTool, config: &Config, args: &BuildArgs, format: &str) -> i32 {
    match execute(tool, config, args, format) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            Status::error(&e.to_string());
            e.exit_code()
        }
    }
}

fn execute(tool: &FlutterTool, config: &Config, args: &BuildArgs, format: &str) -> Result<()> {
    // Version schemas are resolved before anything is launched so a bad
    // override fails as a configuration error, not mid-build.
    let meta = PipelineMetadata::new(&config.schema.build.ci_build_number_env);
    let build_number = resolve_build_number(args.build_number_override.as_deref(), &meta)?;
    let build_name = resolve_build_name(args.build_name_override.as_deref(), &meta)?;
    debug!(?build_number, ?build_name, "resolved version overrides");

    tool.ensure_available()?;

    let opts = BuildOptions {
        platform: args.platform,
        debug: args.debug,
        codesign: args.codesign,
        build_number,
        build_name,
    };

    let started = Instant::now();
    let outputs = run_build(tool, &opts)?;

    if format == "json" {
        let map: BTreeMap<&str, String> = outputs
            .iter()
            .map(|(platform, path)| (platform.name(), path.display().to_string()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else {
        if !outputs.is_empty() {
            Status::header("Build artifacts");
            for (platform, path) in &outputs {
                Status::success(&format!("{}: {}", platform, path.display()));
            }
        }
        Status::info(&format!(
            "Build finished in {}",
            format_duration(started.elapsed())
        ));
    }

    Ok(())
}
