//! flutterlane - Flutter release pipeline helper
//!
//! Wraps the Flutter CLI for automation runners: builds with version
//! overrides derived from git/CI metadata, quality steps, and the ARB
//! localization synchronization workflow.

use clap::{Parser, Subcommand, ValueEnum};
use flutterlane_cli::output::Status;
use flutterlane_core::config::Config;
use flutterlane_flutter::{FlutterTool, Platform};
use std::path::PathBuf;

mod commands;

use commands::quality::QualityStep;

#[derive(Parser)]
#[command(name = "flutterlane")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: String,

    /// Path to a flutterlane.toml configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// CLI value for a build platform
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlatformArg {
    Ios,
    Android,
}

impl From<PlatformArg> for Platform {
    fn from(value: PlatformArg) -> Self {
        match value {
            PlatformArg::Ios => Platform::Ios,
            PlatformArg::Android => Platform::Android,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build the app and report produced artifact paths
    Build {
        /// Build only this platform; builds all supported platforms if omitted
        #[arg(short, long, value_enum)]
        platform: Option<PlatformArg>,

        /// Build a Debug version of the app
        #[arg(long, env = "FLUTTERLANE_DEBUG")]
        debug: bool,

        /// Skip iOS app signing, e.g. on CI or when signed separately
        #[arg(long, env = "FLUTTERLANE_NO_CODESIGN")]
        no_codesign: bool,

        /// Override the pubspec build number: a number, or a schema such
        /// as ci (take from CI), vcs (take from git), ci+1000
        #[arg(long, env = "FLUTTERLANE_BUILD_NUMBER_OVERRIDE")]
        build_number_override: Option<String>,

        /// Override the pubspec build name: a string, or a schema such as
        /// vcs* (take from git, add "*" for a dirty tree), vcs
        #[arg(long, env = "FLUTTERLANE_BUILD_NAME_OVERRIDE")]
        build_name_override: Option<String>,
    },

    /// Run the test suite
    Test,

    /// Run static analysis
    Analyze,

    /// Format the source tree
    Format,

    /// Synchronize ARB bundles and regenerate locale code
    L10n {
        /// Path to the .dart file with l10n strings
        #[arg(long, env = "FLUTTERLANE_L10N_STRINGS")]
        strings_file: PathBuf,

        /// Locale of the data in the strings file
        #[arg(long, env = "FLUTTERLANE_L10N_STRINGS_LOCALE")]
        strings_locale: Option<String>,

        /// Reformat ARB files while regenerating
        #[arg(long, env = "FLUTTERLANE_L10N_REFORMAT_ARB")]
        reformat_arb: bool,

        /// Skip verifying that each ARB file includes all strings
        #[arg(long, env = "FLUTTERLANE_L10N_NO_VERIFY_ARB")]
        no_verify_arb: bool,
    },

    /// Run the build_runner code generator
    Gen,
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("flutterlane=debug,flutterlane_flutter=debug")
            .init();
    }

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            Status::error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    };

    let tool = FlutterTool::new(&config.schema.flutter.bin);

    let code = match cli.command {
        Commands::Build {
            platform,
            debug,
            no_codesign,
            build_number_override,
            build_name_override,
        } => commands::build::run(
            &tool,
            &config,
            &commands::build::BuildArgs {
                platform: platform.map(Platform::from),
                debug,
                codesign: !no_codesign,
                build_number_override,
                build_name_override,
            },
            &cli.format,
        ),

        Commands::Test => commands::quality::run(&tool, QualityStep::Test),
        Commands::Analyze => commands::quality::run(&tool, QualityStep::Analyze),
        Commands::Format => commands::quality::run(&tool, QualityStep::Format),
        Commands::Gen => commands::quality::run(&tool, QualityStep::Gen),

        Commands::L10n {
            strings_file,
            strings_locale,
            reformat_arb,
            no_verify_arb,
        } => commands::l10n::run(
            &tool,
            &config,
            &commands::l10n::L10nArgs {
                strings_file,
                strings_locale,
                reformat_arb,
                verify_arb: !no_verify_arb,
            },
        ),
    };

    std::process::exit(code);
}
