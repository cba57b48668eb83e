//! modcfg Core - Shared types for the configuration resolver
//!
//! This crate provides the project-tree model, the resolver settings layer,
//! and the shared error type used across the modcfg workspace.

pub mod error;
pub mod settings;
pub mod tree;

pub use error::{McError, Result};
pub use settings::{EdgeSettings, OutputSettings, ResolverSettings, RuleSettings};
pub use tree::{ModuleKind, ProjectTree, Subproject};

/// modcfg version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "modcfg";
