//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod deploy;
mod face;

pub use deploy::DeployCommands;
pub use face::FaceCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Render the deployment (cluster, image, workload, kubeconfig)
    Deploy {
        #[command(subcommand)]
        command: DeployCommands,
    },
    /// Call the face segmentation API
    Face {
        #[command(subcommand)]
        command: FaceCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Deploy { command } => deploy::handle_deploy_command(command),
        Commands::Face { command } => face::handle_face_command(command, config).await,
    }
}
