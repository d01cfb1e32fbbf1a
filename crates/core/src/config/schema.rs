//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub flutter: FlutterConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub l10n: L10nConfig,
}

/// Flutter toolchain configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlutterConfig {
    /// Name (or path) of the flutter executable
    #[serde(default = "default_flutter_bin")]
    pub bin: String,
}

impl Default for FlutterConfig {
    fn default() -> Self {
        Self {
            bin: default_flutter_bin(),
        }
    }
}

fn default_flutter_bin() -> String {
    "flutter".to_string()
}

/// Build-step configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Environment variable holding the CI build number (for the `ci` schema)
    #[serde(default = "default_ci_build_number_env")]
    pub ci_build_number_env: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            ci_build_number_env: default_ci_build_number_env(),
        }
    }
}

fn default_ci_build_number_env() -> String {
    "BUILD_NUMBER".to_string()
}

/// Localization workflow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct L10nConfig {
    /// Directory holding the ARB bundles and generated locale code
    #[serde(default = "default_l10n_output_dir")]
    pub output_dir: String,
}

impl Default for L10nConfig {
    fn default() -> Self {
        Self {
            output_dir: default_l10n_output_dir(),
        }
    }
}

fn default_l10n_output_dir() -> String {
    "lib/l10n".to_string()
}
