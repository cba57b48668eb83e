//! modcfg Configuration Resolver
//!
//! Turns a loaded project tree plus resolver settings into a resolved
//! configuration mapping: redirected output directories, dependency-ordered
//! resolution, library defaults, and the registered clean task.

pub mod graph;
pub mod output;
pub mod resolve;
pub mod rules;
pub mod tasks;

pub use graph::EvaluationGraph;
pub use output::OutputLayout;
pub use resolve::{ResolvedConfig, ResolvedTree, Resolver};
pub use rules::LibraryDefaults;
pub use tasks::{CleanOutcome, CleanTask, Task, TaskOutcome, TaskRegistry};
