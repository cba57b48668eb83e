//! modcfg - Build-configuration resolver for multi-module project trees
//!
//! Reads a project tree, applies a small set of override rules (output
//! directory redirection, library defaults, explicit evaluation ordering)
//! to each subproject's configuration record, and emits the resolved
//! configuration plus a dependency-ordered resolution list and a registered
//! `clean` task.
//!
//! ## Architecture
//!
//! modcfg is organized into specialized crates:
//!
//! - `modcfg-core`: project-tree model, resolver settings, shared errors
//! - `modcfg-resolver`: dependency graph, override rules, output layout,
//!   resolution driver, and the task registry

#![warn(clippy::all)]

pub mod commands;

// Re-export main components for library usage
pub use modcfg_core as core;
pub use modcfg_resolver as resolver;

/// Prelude module for convenient imports
pub mod prelude {
    pub use modcfg_core::{
        McError, ModuleKind, ProjectTree, ResolverSettings, Result, Subproject,
    };
    pub use modcfg_resolver::{ResolvedConfig, ResolvedTree, Resolver, TaskRegistry};
}
