//! Task Registry
//!
//! Registered tasks exposed to the task-execution side of the CLI. The only
//! built-in task is `clean`, whose sole effect is recursive deletion of the
//! shared build root. Deleting an already-absent directory is a success.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use modcfg_core::{McError, Result};
use tracing::{debug, info};

/// Result of running a clean task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanOutcome {
    /// Whether the target existed before deletion
    pub existed: bool,
    /// Number of filesystem entries removed
    pub removed_entries: u64,
}

/// Recursive deletion of one output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanTask {
    target: PathBuf,
}

impl CleanTask {
    /// Create a clean task for the given output directory
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// The directory this task deletes
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Delete the target recursively.
    ///
    /// A missing target is a success. Deletion failures surface the
    /// underlying OS error and are not retried.
    pub async fn run(&self) -> Result<CleanOutcome> {
        if !self.target.exists() {
            debug!("Clean target {:?} does not exist, nothing to do", self.target);
            return Ok(CleanOutcome {
                existed: false,
                removed_entries: 0,
            });
        }

        let removed_entries = count_entries(&self.target);

        let deletion = if self.target.is_dir() {
            tokio::fs::remove_dir_all(&self.target).await
        } else {
            tokio::fs::remove_file(&self.target).await
        };
        deletion.map_err(|e| {
            McError::Clean(format!("{}: {}", self.target.display(), e))
        })?;

        info!(
            "Cleaned {:?} ({} entries removed)",
            self.target, removed_entries
        );
        Ok(CleanOutcome {
            existed: true,
            removed_entries,
        })
    }
}

/// Count filesystem entries under a path, the path itself included
fn count_entries(path: &Path) -> u64 {
    walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .count() as u64
}

/// A registered task
#[derive(Debug, Clone)]
pub enum Task {
    Clean(CleanTask),
}

/// Outcome of a registered task run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Clean(CleanOutcome),
}

/// Registry of invocable tasks, keyed by name
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    tasks: BTreeMap<String, Task>,
}

impl TaskRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a clean task under the given name
    pub fn register_clean(&mut self, name: impl Into<String>, target: impl Into<PathBuf>) -> Result<()> {
        let name = name.into();
        if self.tasks.contains_key(&name) {
            return Err(McError::Task(format!("Task '{}' is already registered", name)));
        }

        debug!("Registered clean task '{}'", name);
        self.tasks.insert(name, Task::Clean(CleanTask::new(target)));
        Ok(())
    }

    /// Look up a task by name
    pub fn get(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    /// Names of all registered tasks, in deterministic order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(String::as_str)
    }

    /// Run the named task
    pub async fn run(&self, name: &str) -> Result<TaskOutcome> {
        let task = self
            .tasks
            .get(name)
            .ok_or_else(|| McError::NotFound(format!("Task '{}' is not registered", name)))?;

        match task {
            Task::Clean(clean) => Ok(TaskOutcome::Clean(clean.run().await?)),
        }
    }
}
