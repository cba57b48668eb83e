//! Configuration Resolver
//!
//! Single-pass transform over a static project tree: validates the declared
//! evaluation edges, computes the shared output layout, and applies the
//! override rules to each subproject exactly once. Fail-fast and atomic:
//! every validation error aborts before any configuration is produced.

use std::collections::BTreeMap;
use std::path::PathBuf;

use modcfg_core::{McError, ModuleKind, ProjectTree, ResolverSettings, Result, Subproject};
use serde::Serialize;
use tracing::info;

use crate::graph::EvaluationGraph;
use crate::output::OutputLayout;
use crate::rules::LibraryDefaults;

/// Resolved configuration record for one subproject
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    /// Subproject name
    pub name: String,
    /// Module kind
    pub kind: ModuleKind,
    /// Compile SDK version after rule application
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compile_sdk: Option<u32>,
    /// Namespace after rule application
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Redirected build-output directory
    pub build_dir: PathBuf,
    /// Free-form configuration overrides carried through unchanged
    pub overrides: BTreeMap<String, String>,
}

impl ResolvedConfig {
    fn from_subproject(sub: &Subproject, build_dir: PathBuf) -> Self {
        Self {
            name: sub.name.clone(),
            kind: sub.kind,
            compile_sdk: sub.compile_sdk,
            namespace: sub.namespace.clone(),
            build_dir,
            overrides: sub.overrides.clone(),
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

/// The full resolution result: one record per subproject plus the
/// dependency-ordered resolution list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTree {
    /// Root project name
    pub project: String,
    /// Shared build root for the whole tree
    pub build_root: PathBuf,
    /// Resolution order (parents before children)
    pub order: Vec<String>,
    /// Resolved configuration per subproject
    pub configs: BTreeMap<String, ResolvedConfig>,
}

impl ResolvedTree {
    /// Serialize as pretty TOML (deterministic: configs are a sorted map)
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Serialize as pretty JSON
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| McError::Config(format!("Failed to serialize resolution: {}", e)))
    }
}

/// The configuration resolver
pub struct Resolver {
    tree: ProjectTree,
    settings: ResolverSettings,
}

impl Resolver {
    /// Create a resolver over the given tree and settings
    pub fn new(tree: ProjectTree, settings: ResolverSettings) -> Self {
        Self { tree, settings }
    }

    /// Resolve the whole tree.
    ///
    /// All validation (unknown edge endpoints, cycles) happens up front; a
    /// failure leaves no partial state behind.
    pub fn resolve(&self) -> Result<ResolvedTree> {
        let graph = self.build_graph()?;
        let order = graph.resolution_order()?;

        let layout = OutputLayout::redirect(
            &self.tree.default_build_dir(),
            &self.settings.output.base,
        );
        let rules: Vec<LibraryDefaults> =
            self.settings.rules.iter().map(LibraryDefaults::from).collect();

        let mut configs = BTreeMap::new();
        for name in &order {
            let sub = self.tree.get(name).ok_or_else(|| {
                McError::Config(format!("Subproject '{}' is missing from the tree", name))
            })?;

            let mut config =
                ResolvedConfig::from_subproject(sub, layout.subproject_dir(name));
            for rule in rules.iter().filter(|r| r.matches(name)) {
                rule.apply(&mut config);
            }
            configs.insert(name.clone(), config);
        }

        info!(
            "Resolved {} subproject(s), build root {:?}",
            configs.len(),
            layout.build_root()
        );

        Ok(ResolvedTree {
            project: self.tree.name.clone(),
            build_root: layout.build_root().to_path_buf(),
            order,
            configs,
        })
    }

    fn build_graph(&self) -> Result<EvaluationGraph> {
        let mut graph = EvaluationGraph::new(&self.tree);

        if let Some(root) = &self.settings.evaluation_root {
            if !self.tree.contains(root) {
                return Err(McError::Dependency(format!(
                    "Evaluation root '{}' is missing from the tree",
                    root
                )));
            }
            for name in self.tree.names() {
                if name != root {
                    graph.declare(name, root)?;
                }
            }
        }

        for edge in &self.settings.edges {
            graph.declare(&edge.child, &edge.parent)?;
        }

        Ok(graph)
    }
}
