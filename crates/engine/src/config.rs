use crate::error::{Result, RewriteError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid identifier pattern"));

/// Configuration for a rebranding run.
///
/// Resolved once by the caller and passed into the rewriter; all file paths
/// are relative to `root` and never recomputed per operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Project root the relative paths below are resolved against
    pub root: PathBuf,

    /// Source file containing the two target declarations
    pub icons_file: PathBuf,

    /// Replacement vector-image asset
    pub logo_asset: PathBuf,

    /// Source file containing the powered-by text node
    pub powered_by_file: PathBuf,

    /// Brand name currently present in the sources
    pub old_brand: String,

    /// Brand name to write
    pub new_brand: String,

    /// Binding name of the icon declaration
    pub icon_component: String,

    /// Binding name of the logo-type declaration
    pub logo_type_component: String,

    /// Error-handling policy for missing/mismatched targets
    pub strictness: Strictness,

    /// Declaration locator engine
    pub engine: LocatorEngine,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            icons_file: PathBuf::from("web/src/components/icons/icons.tsx"),
            logo_asset: PathBuf::from("web/public/logo.svg"),
            powered_by_file: PathBuf::from("web/src/components/logo/FixedLogo.tsx"),
            old_brand: String::new(),
            new_brand: String::new(),
            icon_component: "Icon".to_string(),
            logo_type_component: "LogoTypeIcon".to_string(),
            strictness: Strictness::Strict,
            engine: LocatorEngine::Ast,
        }
    }
}

impl RewriteConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| RewriteError::invalid_config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.old_brand.trim().is_empty() {
            return Err(RewriteError::invalid_config("old_brand must not be empty"));
        }
        if self.new_brand.trim().is_empty() {
            return Err(RewriteError::invalid_config("new_brand must not be empty"));
        }
        for (field, value) in [
            ("icon_component", &self.icon_component),
            ("logo_type_component", &self.logo_type_component),
        ] {
            if !IDENTIFIER.is_match(value) {
                return Err(RewriteError::invalid_config(format!(
                    "{field} ({value:?}) is not a valid identifier"
                )));
            }
        }
        for (field, value) in [
            ("icons_file", &self.icons_file),
            ("logo_asset", &self.logo_asset),
            ("powered_by_file", &self.powered_by_file),
        ] {
            if value.as_os_str().is_empty() {
                return Err(RewriteError::invalid_config(format!(
                    "{field} must not be empty"
                )));
            }
        }
        Ok(())
    }

    /// Absolute (root-joined) path to the icons source file
    #[must_use]
    pub fn icons_path(&self) -> PathBuf {
        self.root.join(&self.icons_file)
    }

    /// Absolute (root-joined) path to the replacement asset
    #[must_use]
    pub fn asset_path(&self) -> PathBuf {
        self.root.join(&self.logo_asset)
    }

    /// Absolute (root-joined) path to the powered-by source file
    #[must_use]
    pub fn powered_by_path(&self) -> PathBuf {
        self.root.join(&self.powered_by_file)
    }

    /// The powered-by literal expected in the sources today
    #[must_use]
    pub fn powered_by_old(&self) -> String {
        format!("Powered by {}", self.old_brand)
    }

    /// The powered-by literal to write
    #[must_use]
    pub fn powered_by_new(&self) -> String {
        format!("Powered by {}", self.new_brand)
    }
}

/// Error-handling policy: abort on a missing target, or warn and continue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Missing declarations and literals abort the run
    Strict,
    /// Missing declarations and literals are logged and skipped
    Lenient,
}

impl Default for Strictness {
    fn default() -> Self {
        Self::Strict
    }
}

impl Strictness {
    /// Get policy name as string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }
}

/// Declaration locator engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocatorEngine {
    /// Structural tree-sitter locator (default)
    Ast,
    /// Historical regex patterns; degraded mode for unparseable sources
    Pattern,
}

impl Default for LocatorEngine {
    fn default() -> Self {
        Self::Ast
    }
}

impl LocatorEngine {
    /// Get engine name as string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ast => "ast",
            Self::Pattern => "pattern",
        }
    }
}
