//! Command line definition.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "formforge",
    about = "Model-driven Java DTO generation and structural wellforming",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Target runtime version, overriding the configured one.
    #[arg(long, global = true, env = "FORMFORGE_API_VERSION")]
    pub api_version: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate or refresh DTO companions for model types.
    Generate {
        /// Fully qualified model type names; all eligible types when empty.
        types: Vec<String>,
    },

    /// Reorder compilation unit members into canonical category order.
    Wellform {
        /// Fully qualified type names; all registered types when empty.
        types: Vec<String>,
    },

    /// Show the resolved API binding and environment statistics.
    Info,
}
