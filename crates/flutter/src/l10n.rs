//! Localization synchronization workflow
//!
//! Sequences the intl generators around the ARB bundle checks:
//! extraction into the canonical bundle, suppression of timestamp-only
//! diffs, completeness validation of every locale bundle, optional
//! reformatting, and regeneration of the Dart locale data.
//!
//! Bundle files already written stay on disk when a later step fails;
//! the whole workflow is idempotent and safe to rerun.

use crate::tool::FlutterTool;
use flutterlane_arb::bundle::{self, ArbBundle};
use flutterlane_arb::{stabilize, verify};
use flutterlane_cli::output::Status;
use flutterlane_core::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Parameters for the l10n step
#[derive(Debug, Clone)]
pub struct L10nOptions {
    /// Dart file holding the translatable strings (required)
    pub strings_file: PathBuf,
    /// Locale of the data in `strings_file`, when it is itself a locale
    pub strings_locale: Option<String>,
    /// Rewrite every regenerated bundle in normalized form
    pub reformat: bool,
    /// Cross-check locale bundles against the canonical bundle
    pub verify: bool,
    /// Directory holding the ARB bundles and generated locale code
    pub output_dir: PathBuf,
}

impl L10nOptions {
    /// Options with the default gates: verification on, reformatting off
    pub fn new(strings_file: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            strings_file: strings_file.into(),
            strings_locale: None,
            reformat: false,
            verify: true,
            output_dir: output_dir.into(),
        }
    }
}

/// Argument list for the string-extraction generator
pub fn extract_args(opts: &L10nOptions) -> Vec<String> {
    let mut args = vec![
        "pub".to_string(),
        "pub".to_string(),
        "run".to_string(),
        "intl_translation:extract_to_arb".to_string(),
        format!("--output-dir={}", opts.output_dir.display()),
    ];
    if let Some(locale) = &opts.strings_locale {
        args.push(format!("--locale={}", locale));
    }
    args.push(opts.strings_file.display().to_string());
    args
}

/// Argument list for the code-generation step
///
/// The ordered `arb_files` matter: the generated `messages_all.dart`
/// imports locales in command-line order.
pub fn generate_args(opts: &L10nOptions, arb_files: &[PathBuf]) -> Vec<String> {
    let mut args = vec![
        "pub".to_string(),
        "pub".to_string(),
        "run".to_string(),
        "intl_translation:generate_from_arb".to_string(),
        format!("--output-dir={}", opts.output_dir.display()),
        "--no-use-deferred-loading".to_string(),
        opts.strings_file.display().to_string(),
    ];
    args.extend(arb_files.iter().map(|p| p.display().to_string()));
    args
}

/// Bundles handed to the code generator
///
/// The canonical bundle only takes part when it carries its own explicit
/// locale; otherwise it is source material, not translatable output.
fn files_for_generation(arb_files: &[PathBuf], explicit_locale: bool) -> Vec<PathBuf> {
    arb_files
        .iter()
        .filter(|path| explicit_locale || !bundle::is_canonical(path))
        .cloned()
        .collect()
}

/// Run the full localization synchronization workflow
pub fn run_l10n(tool: &FlutterTool, opts: &L10nOptions) -> Result<()> {
    if !opts.strings_file.exists() {
        return Err(Error::config(format!(
            "l10n strings file does not exist: {}",
            opts.strings_file.display()
        )));
    }

    let canonical_path = opts.output_dir.join(bundle::CANONICAL_FILE_NAME);
    // The canonical bundle will not exist before the first extraction.
    let previous = std::fs::read(&canonical_path).ok();

    tool.run_streaming(&extract_args(opts))?;

    if let Some(previous) = &previous {
        let extracted = std::fs::read(&canonical_path)
            .map_err(Error::from)
            .context(format!("While reading {}", canonical_path.display()))?;
        let outcome = stabilize::stabilize(Some(previous), &extracted)?;
        if outcome.restored {
            std::fs::write(&canonical_path, outcome.bytes)
                .map_err(Error::from)
                .context(format!("While restoring {}", canonical_path.display()))?;
            Status::info(&format!(
                "@@last_modified has been restored in {}",
                canonical_path.display()
            ));
        }
    }

    let arb_files = bundle::list_locale_bundles(&opts.output_dir)?;
    for arb_file in &arb_files {
        debug!(
            file = %arb_file.display(),
            locale = bundle::locale_from_path(arb_file).as_deref().unwrap_or("messages"),
            "found ARB bundle"
        );
    }

    if opts.verify {
        verify_bundles(&canonical_path, &arb_files)?;
    }

    let arb_files = files_for_generation(&arb_files, opts.strings_locale.is_some());

    if opts.reformat {
        for arb_file in &arb_files {
            Status::info(&format!("Reformatting file {}...", arb_file.display()));
            ArbBundle::read(arb_file)?.write(arb_file)?;
        }
    }

    tool.run_streaming(&generate_args(opts, &arb_files))
}

/// Check every locale bundle against the canonical one
///
/// All discrepancies across all bundles are reported before the
/// validation failure is raised.
fn verify_bundles(canonical_path: &Path, arb_files: &[PathBuf]) -> Result<()> {
    if arb_files.iter().all(|f| bundle::is_canonical(f)) {
        return Ok(());
    }

    let canonical = ArbBundle::read(canonical_path)?;
    let mut inconsistent = false;

    for arb_file in arb_files {
        if bundle::is_canonical(arb_file) {
            continue;
        }
        Status::info(&format!("Verifying {}...", arb_file.display()));
        let other = ArbBundle::read(arb_file)?;
        let discrepancies = verify::compare(&canonical, &other);
        if !discrepancies.is_empty() {
            inconsistent = true;
            for message in verify::render_messages(&discrepancies) {
                Status::error(&message);
            }
        }
    }

    if inconsistent {
        Err(Error::validation("Found inconsistencies in ARB files"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options(dir: &Path) -> L10nOptions {
        L10nOptions::new("lib/localization.dart", dir)
    }

    #[test]
    fn test_extract_args_first_run() {
        let opts = L10nOptions::new("lib/localization.dart", "lib/l10n");
        assert_eq!(
            extract_args(&opts),
            vec![
                "pub",
                "pub",
                "run",
                "intl_translation:extract_to_arb",
                "--output-dir=lib/l10n",
                "lib/localization.dart",
            ]
        );
    }

    #[test]
    fn test_extract_args_with_locale() {
        let mut opts = L10nOptions::new("lib/localization.dart", "lib/l10n");
        opts.strings_locale = Some("en".to_string());
        assert_eq!(
            extract_args(&opts),
            vec![
                "pub",
                "pub",
                "run",
                "intl_translation:extract_to_arb",
                "--output-dir=lib/l10n",
                "--locale=en",
                "lib/localization.dart",
            ]
        );
    }

    #[test]
    fn test_generate_args_preserve_bundle_order() {
        let opts = L10nOptions::new("lib/localization.dart", "lib/l10n");
        let files = vec![
            PathBuf::from("lib/l10n/intl_de.arb"),
            PathBuf::from("lib/l10n/intl_en.arb"),
        ];
        assert_eq!(
            generate_args(&opts, &files),
            vec![
                "pub",
                "pub",
                "run",
                "intl_translation:generate_from_arb",
                "--output-dir=lib/l10n",
                "--no-use-deferred-loading",
                "lib/localization.dart",
                "lib/l10n/intl_de.arb",
                "lib/l10n/intl_en.arb",
            ]
        );
    }

    #[test]
    fn test_files_for_generation_drops_canonical() {
        let files = vec![
            PathBuf::from("lib/l10n/intl_en.arb"),
            PathBuf::from("lib/l10n/intl_messages.arb"),
        ];

        assert_eq!(
            files_for_generation(&files, false),
            vec![PathBuf::from("lib/l10n/intl_en.arb")]
        );
        // With an explicit strings locale the canonical bundle is itself output.
        assert_eq!(files_for_generation(&files, true), files);
    }

    #[test]
    fn test_run_l10n_requires_strings_file() {
        let tmp = TempDir::new().unwrap();
        let mut opts = options(tmp.path());
        opts.strings_file = tmp.path().join("missing.dart");

        let tool = FlutterTool::new("true");
        let err = run_l10n(&tool, &opts).unwrap_err();
        assert_eq!(err.code.category(), "Configuration");
    }

    #[test]
    fn test_verify_bundles_reports_then_fails() {
        let tmp = TempDir::new().unwrap();
        let canonical_path = tmp.path().join("intl_messages.arb");
        std::fs::write(
            &canonical_path,
            r#"{"@@last_modified": 1, "foo": "bar", "@foo": "not significant"}"#,
        )
        .unwrap();
        let locale_path = tmp.path().join("intl_de.arb");
        std::fs::write(&locale_path, r#"{"@@last_modified": 1, "baz": ""}"#).unwrap();

        let files = vec![locale_path, canonical_path.clone()];
        let err = verify_bundles(&canonical_path, &files).unwrap_err();
        assert!(err.to_string().contains("Found inconsistencies in ARB files"));
    }

    #[test]
    fn test_verify_bundles_consistent() {
        let tmp = TempDir::new().unwrap();
        let canonical_path = tmp.path().join("intl_messages.arb");
        std::fs::write(&canonical_path, r#"{"@@last_modified": 1, "foo": "bar"}"#).unwrap();
        let locale_path = tmp.path().join("intl_de.arb");
        std::fs::write(&locale_path, r#"{"@@last_modified": 9, "foo": "Balken"}"#).unwrap();

        let files = vec![locale_path, canonical_path.clone()];
        assert!(verify_bundles(&canonical_path, &files).is_ok());
    }

    #[test]
    fn test_run_l10n_restores_timestamp_only_change() {
        let tmp = TempDir::new().unwrap();
        let strings_file = tmp.path().join("localization.dart");
        std::fs::write(&strings_file, "// strings").unwrap();

        let canonical_path = tmp.path().join("intl_messages.arb");
        let prior = "{\"@@last_modified\": 1, \"foo\": \"bar\"}";
        std::fs::write(&canonical_path, prior).unwrap();

        let mut opts = options(tmp.path());
        opts.strings_file = strings_file;

        // `true` stands in for the generators: extraction leaves the prior
        // canonical bytes in place, which reads as a timestamp-only rerun.
        let tool = FlutterTool::new("true");
        run_l10n(&tool, &opts).unwrap();

        let persisted = std::fs::read_to_string(&canonical_path).unwrap();
        assert_eq!(persisted, prior);
    }
}
