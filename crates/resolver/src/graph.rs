//! Evaluation Dependency Graph
//!
//! Records the declared ordering constraints between subprojects and
//! produces the dependency-ordered resolution list. Cycles are rejected at
//! declaration time, before any configuration is touched.

use std::collections::{BTreeMap, BTreeSet};

use modcfg_core::{McError, ProjectTree, Result};
use tracing::debug;

/// Directed graph of evaluation dependencies (child resolves after parent)
#[derive(Debug, Clone)]
pub struct EvaluationGraph {
    nodes: BTreeSet<String>,
    // child -> set of parents
    parents: BTreeMap<String, BTreeSet<String>>,
}

impl EvaluationGraph {
    /// Create an edgeless graph over the tree's subprojects
    pub fn new(tree: &ProjectTree) -> Self {
        Self {
            nodes: tree.names().map(str::to_string).collect(),
            parents: BTreeMap::new(),
        }
    }

    /// Declare that `child`'s configuration resolves after `parent`'s.
    ///
    /// Fails when either endpoint is unknown or when the edge would close a
    /// cycle (a self-edge is a cycle).
    pub fn declare(&mut self, child: &str, parent: &str) -> Result<()> {
        if !self.nodes.contains(child) {
            return Err(McError::Dependency(format!(
                "Evaluation dependency references unknown subproject '{}'",
                child
            )));
        }
        if !self.nodes.contains(parent) {
            return Err(McError::Dependency(format!(
                "Evaluation dependency references unknown subproject '{}'",
                parent
            )));
        }
        if child == parent || self.depends_on(parent, child) {
            return Err(McError::Dependency(format!(
                "Evaluation dependency cycle: '{}' -> '{}'",
                child, parent
            )));
        }

        debug!("Declared evaluation dependency: {} after {}", child, parent);
        self.parents
            .entry(child.to_string())
            .or_default()
            .insert(parent.to_string());
        Ok(())
    }

    /// Whether `node` transitively depends on `target`
    fn depends_on(&self, node: &str, target: &str) -> bool {
        let mut stack = vec![node];
        let mut seen = BTreeSet::new();

        while let Some(current) = stack.pop() {
            if current == target {
                return true;
            }
            if !seen.insert(current.to_string()) {
                continue;
            }
            if let Some(parents) = self.parents.get(current) {
                stack.extend(parents.iter().map(String::as_str));
            }
        }
        false
    }

    /// Direct parents of the named subproject
    pub fn parents_of(&self, name: &str) -> impl Iterator<Item = &str> {
        self.parents
            .get(name)
            .into_iter()
            .flat_map(|p| p.iter().map(String::as_str))
    }

    /// Topological resolution order: parents before children, ties broken
    /// alphabetically so the order is deterministic
    pub fn resolution_order(&self) -> Result<Vec<String>> {
        let mut remaining: BTreeMap<String, BTreeSet<String>> = self
            .nodes
            .iter()
            .map(|n| {
                let parents = self.parents.get(n).cloned().unwrap_or_default();
                (n.clone(), parents)
            })
            .collect();

        let mut order = Vec::with_capacity(remaining.len());
        while !remaining.is_empty() {
            let next = remaining
                .iter()
                .find(|(_, parents)| parents.is_empty())
                .map(|(name, _)| name.clone());

            let Some(name) = next else {
                return Err(McError::Dependency(
                    "Evaluation dependency cycle detected".to_string(),
                ));
            };

            remaining.remove(&name);
            for parents in remaining.values_mut() {
                parents.remove(&name);
            }
            order.push(name);
        }

        Ok(order)
    }
}
