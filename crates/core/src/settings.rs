//! Resolver Settings
//!
//! Manages the resolver configuration loaded from an optional `modcfg.toml`
//! at the project root:
//! - output directory redirection base
//! - per-subproject override rules
//! - evaluation-dependency edges

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;

/// Settings file name expected at the project root
pub const SETTINGS_FILE: &str = "modcfg.toml";

/// Output directory redirection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Base for the shared build root, relative to the root project's
    /// default build directory
    pub base: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            base: "../../build".to_string(),
        }
    }
}

/// A single override rule targeting one subproject by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSettings {
    /// Target subproject name
    pub subproject: String,
    /// Minimum compile SDK to enforce, if any
    #[serde(default)]
    pub min_compile_sdk: Option<u32>,
    /// Namespace to inject when unset or blank, if any
    #[serde(default)]
    pub default_namespace: Option<String>,
}

/// A declared evaluation-dependency edge: `child` resolves after `parent`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSettings {
    pub child: String,
    pub parent: String,
}

/// Resolver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverSettings {
    /// Settings version for migrations
    pub version: u32,
    /// Output redirection
    #[serde(default)]
    pub output: OutputSettings,
    /// Override rules
    #[serde(default, rename = "rule")]
    pub rules: Vec<RuleSettings>,
    /// Explicit evaluation edges
    #[serde(default, rename = "dependency")]
    pub edges: Vec<EdgeSettings>,
    /// If set, every other subproject evaluation-depends on this one
    #[serde(default)]
    pub evaluation_root: Option<String>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            version: 1,
            output: OutputSettings::default(),
            rules: vec![RuleSettings {
                subproject: "blue_thermal_printer".to_string(),
                min_compile_sdk: Some(34),
                default_namespace: Some("id.kakzaki.blue_thermal_printer".to_string()),
            }],
            edges: Vec::new(),
            evaluation_root: Some("app".to_string()),
        }
    }
}

impl ResolverSettings {
    /// Load settings from `modcfg.toml` at the given root, falling back to
    /// defaults when the file is absent
    pub async fn load(root: &Path) -> Result<Self> {
        let settings_file = root.join(SETTINGS_FILE);

        if settings_file.exists() {
            debug!("Loading settings from {:?}", settings_file);
            let contents = tokio::fs::read_to_string(&settings_file).await?;
            let settings: ResolverSettings = toml::from_str(&contents)?;
            Ok(settings)
        } else {
            info!("Settings file not found, using defaults");
            Ok(ResolverSettings::default())
        }
    }

    /// Save settings to `modcfg.toml` at the given root
    pub async fn save(&self, root: &Path) -> Result<()> {
        let settings_file = root.join(SETTINGS_FILE);
        let contents = toml::to_string_pretty(self)?;
        tokio::fs::write(&settings_file, contents).await?;

        debug!("Settings saved to {:?}", settings_file);
        Ok(())
    }
}
