//! CLI commands for modcfg
//!
//! Provides command-line interface functionality for automation and scripting.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use tracing::info;

use modcfg_core::{ProjectTree, ResolverSettings};
use modcfg_resolver::{Resolver, TaskOutcome, TaskRegistry};

/// Output format for the resolved configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Toml,
    Json,
}

/// Resolve command options
#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Project root directory
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "toml")]
    pub format: OutputFormat,
}

impl ResolveCommand {
    /// Execute the resolve command
    pub async fn execute(&self) -> Result<()> {
        info!("Resolving project at {:?}", self.root);

        let tree = ProjectTree::load(&self.root).await?;
        let settings = ResolverSettings::load(&self.root).await?;
        let resolved = Resolver::new(tree, settings).resolve()?;

        let rendered = match self.format {
            OutputFormat::Toml => resolved.to_toml_string()?,
            OutputFormat::Json => resolved.to_json_string()?,
        };
        println!("{}", rendered);

        Ok(())
    }
}

/// Clean command options
#[derive(Debug, Args)]
pub struct CleanCommand {
    /// Project root directory
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

impl CleanCommand {
    /// Execute the clean command
    pub async fn execute(&self) -> Result<()> {
        let tree = ProjectTree::load(&self.root).await?;
        let settings = ResolverSettings::load(&self.root).await?;
        let resolved = Resolver::new(tree, settings).resolve()?;

        let mut registry = TaskRegistry::new();
        registry.register_clean("clean", &resolved.build_root)?;

        match registry.run("clean").await? {
            TaskOutcome::Clean(outcome) if outcome.existed => {
                println!(
                    "Removed {} ({} entries)",
                    resolved.build_root.display(),
                    outcome.removed_entries
                );
            }
            TaskOutcome::Clean(_) => {
                println!(
                    "Nothing to clean: {} does not exist",
                    resolved.build_root.display()
                );
            }
        }

        Ok(())
    }
}
