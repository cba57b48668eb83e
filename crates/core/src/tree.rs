//! Project Tree Model
//!
//! Represents a multi-module project tree: the root project plus its
//! subprojects, loaded once from a `project.toml` manifest at the root.
//! The tree is immutable input to the resolver; nothing mutates it after
//! loading.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{McError, Result};

/// Manifest file name expected at the project root
pub const MANIFEST_FILE: &str = "project.toml";

/// Module kind, dispatched on explicitly instead of plugin identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    /// Application module (entry point of the tree)
    Application,
    /// Library module (eligible for library defaults)
    Library,
    /// Anything else
    #[default]
    Unknown,
}

impl ModuleKind {
    /// Infer kind from a set of declared plugin identifiers
    pub fn from_plugins(plugins: &BTreeSet<String>) -> Self {
        if plugins.iter().any(|p| p == "com.android.application") {
            ModuleKind::Application
        } else if plugins.iter().any(|p| p == "com.android.library") {
            ModuleKind::Library
        } else {
            ModuleKind::Unknown
        }
    }
}

/// A single subproject within the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subproject {
    /// Subproject name, unique within the tree
    pub name: String,
    /// Module kind
    pub kind: ModuleKind,
    /// Declared plugin identifiers
    #[serde(default)]
    pub plugins: BTreeSet<String>,
    /// Compile SDK version, if declared
    #[serde(default)]
    pub compile_sdk: Option<u32>,
    /// Namespace, if declared
    #[serde(default)]
    pub namespace: Option<String>,
    /// Free-form configuration overrides
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,
}

impl Subproject {
    /// Create a subproject with the given name and kind
    pub fn new(name: impl Into<String>, kind: ModuleKind) -> Self {
        Self {
            name: name.into(),
            kind,
            plugins: BTreeSet::new(),
            compile_sdk: None,
            namespace: None,
            overrides: BTreeMap::new(),
        }
    }

    /// Whether the namespace is missing or blank (whitespace-only counts)
    pub fn namespace_is_blank(&self) -> bool {
        match &self.namespace {
            None => true,
            Some(ns) => ns.trim().is_empty(),
        }
    }
}

/// Raw manifest entry for a subproject
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SubprojectEntry {
    name: String,
    #[serde(default)]
    kind: Option<ModuleKind>,
    #[serde(default)]
    plugins: BTreeSet<String>,
    #[serde(default)]
    compile_sdk: Option<u32>,
    #[serde(default)]
    namespace: Option<String>,
    #[serde(default)]
    overrides: BTreeMap<String, String>,
}

/// Raw `project.toml` manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Manifest {
    name: String,
    #[serde(default, rename = "subproject")]
    subprojects: Vec<SubprojectEntry>,
}

/// The loaded project tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTree {
    /// Project root directory
    pub root: PathBuf,
    /// Root project name
    pub name: String,
    /// Subprojects keyed by name
    pub subprojects: BTreeMap<String, Subproject>,
}

impl ProjectTree {
    /// Build a tree directly from parts
    pub fn new(
        root: impl Into<PathBuf>,
        name: impl Into<String>,
        subprojects: Vec<Subproject>,
    ) -> Self {
        let subprojects = subprojects
            .into_iter()
            .map(|s| (s.name.clone(), s))
            .collect();
        Self {
            root: root.into(),
            name: name.into(),
            subprojects,
        }
    }

    /// Load the tree from `project.toml` at the given root.
    ///
    /// Every declared subproject must have a matching directory under the
    /// root; a missing directory is a configuration error.
    pub async fn load(root: &Path) -> Result<Self> {
        let manifest_path = root.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            return Err(McError::NotFound(format!(
                "Project manifest not found: {}",
                manifest_path.display()
            )));
        }

        debug!("Loading project manifest from {:?}", manifest_path);
        let contents = tokio::fs::read_to_string(&manifest_path).await?;
        let manifest: Manifest = toml::from_str(&contents)?;

        let mut subprojects = BTreeMap::new();
        for entry in manifest.subprojects {
            let dir = root.join(&entry.name);
            if !dir.is_dir() {
                return Err(McError::Config(format!(
                    "Subproject '{}' is missing from the tree (expected {})",
                    entry.name,
                    dir.display()
                )));
            }

            let kind = entry
                .kind
                .unwrap_or_else(|| ModuleKind::from_plugins(&entry.plugins));
            let subproject = Subproject {
                name: entry.name.clone(),
                kind,
                plugins: entry.plugins,
                compile_sdk: entry.compile_sdk,
                namespace: entry.namespace,
                overrides: entry.overrides,
            };

            if subprojects.insert(entry.name.clone(), subproject).is_some() {
                return Err(McError::Config(format!(
                    "Duplicate subproject name '{}'",
                    entry.name
                )));
            }
        }

        info!(
            "Loaded project '{}' with {} subproject(s)",
            manifest.name,
            subprojects.len()
        );

        Ok(Self {
            root: root.to_path_buf(),
            name: manifest.name,
            subprojects,
        })
    }

    /// Whether the tree contains the named subproject
    pub fn contains(&self, name: &str) -> bool {
        self.subprojects.contains_key(name)
    }

    /// Look up a subproject by name
    pub fn get(&self, name: &str) -> Option<&Subproject> {
        self.subprojects.get(name)
    }

    /// The root project's default build directory
    pub fn default_build_dir(&self) -> PathBuf {
        self.root.join("build")
    }

    /// Subproject names in deterministic order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.subprojects.keys().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(contents: &str, dirs: &[&str]) -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(MANIFEST_FILE), contents).unwrap();
        for dir in dirs {
            std::fs::create_dir(tmp.path().join(dir)).unwrap();
        }
        tmp
    }

    #[test]
    fn test_kind_from_plugins() {
        let mut plugins = BTreeSet::new();
        plugins.insert("com.android.library".to_string());
        assert_eq!(ModuleKind::from_plugins(&plugins), ModuleKind::Library);

        plugins.clear();
        plugins.insert("com.android.application".to_string());
        assert_eq!(ModuleKind::from_plugins(&plugins), ModuleKind::Application);

        plugins.clear();
        assert_eq!(ModuleKind::from_plugins(&plugins), ModuleKind::Unknown);
    }

    #[test]
    fn test_namespace_blank_detection() {
        let mut sub = Subproject::new("lib", ModuleKind::Library);
        assert!(sub.namespace_is_blank());

        sub.namespace = Some("   ".to_string());
        assert!(sub.namespace_is_blank());

        sub.namespace = Some("com.custom".to_string());
        assert!(!sub.namespace_is_blank());
    }

    #[tokio::test]
    async fn test_load_manifest() {
        let tmp = manifest(
            r#"
name = "example"

[[subproject]]
name = "app"
kind = "application"

[[subproject]]
name = "blue_thermal_printer"
plugins = ["com.android.library"]
"#,
            &["app", "blue_thermal_printer"],
        );

        let tree = ProjectTree::load(tmp.path()).await.unwrap();
        assert_eq!(tree.name, "example");
        assert_eq!(tree.subprojects.len(), 2);
        assert_eq!(tree.get("app").unwrap().kind, ModuleKind::Application);
        // Kind inferred from plugin set when not declared
        assert_eq!(
            tree.get("blue_thermal_printer").unwrap().kind,
            ModuleKind::Library
        );
    }

    #[tokio::test]
    async fn test_load_missing_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        let err = ProjectTree::load(tmp.path()).await.unwrap_err();
        assert!(matches!(err, McError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_load_missing_subproject_dir() {
        let tmp = manifest(
            r#"
name = "example"

[[subproject]]
name = "app"
kind = "application"
"#,
            &[],
        );

        let err = ProjectTree::load(tmp.path()).await.unwrap_err();
        assert!(matches!(err, McError::Config(_)));
    }
}
