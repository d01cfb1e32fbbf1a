//! L10n command - synchronize ARB bundles and regenerate locale code

use flutterlane_cli::output::Status;
use flutterlane_core::config::Config;
use flutterlane_core::error::exit_codes;
use flutterlane_flutter::l10n::{L10nOptions, run_l10n};
use flutterlane_flutter::tool::FlutterTool;
use std::path::PathBuf;

/// Resolved CLI arguments for the l10n command
pub struct L10nArgs {
    pub strings_file: PathBuf,
    pub strings_locale: Option<String>,
    pub reformat_arb: bool,
    pub verify_arb: bool,
}

/// Run the l10n command
pub fn run(tool: &FlutterTool, config: &Config, args: &L10nArgs) -> i32 {
    let mut opts = L10nOptions::new(&args.strings_file, &config.schema.l10n.output_dir);
    opts.strings_locale = args.strings_locale.clone();
    opts.reformat = args.reformat_arb;
    opts.verify = args.verify_arb;

    match run_l10n(tool, &opts) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            Status::error(&e.to_string());
            e.exit_code()
        }
    }
}
