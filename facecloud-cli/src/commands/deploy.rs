//! Deploy command handlers
//!
//! Renders the declared infrastructure: the cluster and image plan,
//! Kubernetes manifests, the kubeconfig and the stack outputs. Applying
//! them is left to `kubectl`, `docker` and the provisioning engine.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::*;
use facecloud_core::domain::stack::StackSettings;
use facecloud_deploy::outputs::{self, ProvisionedCluster};
use facecloud_deploy::{Profile, StackDeclaration, declare, kubeconfig};
use k8s_openapi::api::core::v1::Service;

/// Settings identifying a stack
#[derive(Args, Debug, Clone)]
pub struct StackArgs {
    /// Cloud project identifier
    #[arg(long, env = "GCP_PROJECT")]
    pub project: String,

    /// Deployment zone
    #[arg(long, env = "GCP_ZONE")]
    pub zone: String,

    /// Stack name
    #[arg(long, env = "FACECLOUD_STACK", default_value = "dev")]
    pub stack: String,

    /// Deployment profile (standard or legacy)
    #[arg(long, default_value = "standard")]
    pub profile: Profile,
}

/// Attributes of the provisioned cluster
#[derive(Args, Debug, Clone)]
pub struct ClusterArgs {
    /// Cluster name assigned by the provider
    #[arg(long)]
    pub cluster_name: String,

    /// API server endpoint (IP or host)
    #[arg(long)]
    pub endpoint: String,

    /// File holding the base64 cluster CA certificate (legacy profile)
    #[arg(long)]
    pub ca_data_file: Option<PathBuf>,
}

/// Deploy subcommands
#[derive(Subcommand)]
pub enum DeployCommands {
    /// Show the cluster and image declared for a stack
    Plan {
        #[command(flatten)]
        stack: StackArgs,

        /// Print the whole declaration as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the kubeconfig of a provisioned cluster
    Kubeconfig {
        #[command(flatten)]
        stack: StackArgs,

        #[command(flatten)]
        cluster: ClusterArgs,
    },
    /// Write the Kubernetes manifests of a stack
    Manifests {
        #[command(flatten)]
        stack: StackArgs,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
    /// Print the stack outputs as JSON
    Outputs {
        #[command(flatten)]
        stack: StackArgs,

        #[command(flatten)]
        cluster: ClusterArgs,

        /// Live service as JSON (`kubectl get service app-service -o json`)
        #[arg(long)]
        service_status: Option<PathBuf>,
    },
}

/// Handle deploy commands
pub fn handle_deploy_command(command: DeployCommands) -> Result<()> {
    match command {
        DeployCommands::Plan { stack, json } => plan(&declare_stack(stack)?, json),
        DeployCommands::Kubeconfig { stack, cluster } => {
            let stack = declare_stack(stack)?;
            let cluster = provisioned_cluster(cluster)?;
            let auth = outputs::kube_auth(&stack, &cluster)?;
            print!(
                "{}",
                kubeconfig::render(&cluster.name, &cluster.endpoint, &auth)?
            );
            Ok(())
        }
        DeployCommands::Manifests { stack, output } => {
            write_manifests(&declare_stack(stack)?, &output)
        }
        DeployCommands::Outputs {
            stack,
            cluster,
            service_status,
        } => {
            let stack = declare_stack(stack)?;
            let cluster = provisioned_cluster(cluster)?;
            let live_service = service_status
                .as_deref()
                .map(read_service)
                .transpose()?;

            let outputs = outputs::collect(&stack, &cluster, live_service.as_ref())?;
            println!("{}", serde_json::to_string_pretty(&outputs)?);
            Ok(())
        }
    }
}

fn declare_stack(args: StackArgs) -> Result<StackDeclaration> {
    let settings = StackSettings::new(args.project, args.zone, args.stack);
    declare(settings, args.profile).context("Failed to declare stack")
}

fn provisioned_cluster(args: ClusterArgs) -> Result<ProvisionedCluster> {
    let ca_data = args.ca_data_file.as_deref().map(read_ca_data).transpose()?;

    Ok(ProvisionedCluster {
        name: args.cluster_name,
        endpoint: args.endpoint,
        ca_data,
    })
}

/// Reads a base64 CA certificate, dropping line breaks
fn read_ca_data(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read CA certificate from {:?}", path))?;

    let ca_data: String = content.split_whitespace().collect();
    if ca_data.is_empty() {
        anyhow::bail!("CA certificate file {:?} is empty", path);
    }

    Ok(ca_data)
}

fn read_service(path: &Path) -> Result<Service> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read service from {:?}", path))?;

    serde_json::from_str(&content).with_context(|| format!("Invalid service JSON in {:?}", path))
}

/// Print the cluster and image plan
fn plan(stack: &StackDeclaration, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(stack)?);
        return Ok(());
    }

    let cluster = &stack.cluster;
    let node = &cluster.node_config;

    println!(
        "{}",
        format!(
            "Stack {} ({} profile)",
            stack.settings.stack, stack.profile
        )
        .bold()
    );
    println!();
    println!("  {} Cluster {}", "▸".cyan(), cluster.resource_name.bold());
    println!("    Project:      {}", cluster.project);
    println!("    Location:     {}", cluster.location);
    println!("    Nodes:        {}", cluster.initial_node_count);
    println!(
        "    Machine:      {}{}",
        node.machine_type,
        if node.preemptible {
            " (preemptible)".dimmed().to_string()
        } else {
            String::new()
        }
    );
    if let Some(disk) = node.disk_size_gb {
        println!("    Disk:         {} GB", disk);
    }
    println!();
    println!("  {} Image {}", "▸".cyan(), stack.image.resource_name.bold());
    println!("    Name:         {}", stack.image.image_name.cyan());
    println!("    Dockerfile:   {}", stack.image.dockerfile);
    println!(
        "    Push:         {}",
        if stack.image.skip_push { "no" } else { "yes" }
    );
    println!();
    println!(
        "  {} Workload: deployment{}",
        "▸".cyan(),
        if stack.service.is_some() {
            " + load balancer service"
        } else {
            ""
        }
    );

    Ok(())
}

/// Write one YAML file per Kubernetes object
fn write_manifests(stack: &StackDeclaration, output: &Path) -> Result<()> {
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {:?}", output))?;

    for (name, yaml) in stack.manifests().files()? {
        let path = output.join(&name);
        fs::write(&path, yaml).with_context(|| format!("Failed to write {:?}", path))?;
        println!("  {} {}", "Created".green(), path.display());
    }

    println!("{}", "✓ Manifests written!".green().bold());
    println!(
        "  Apply them with {}",
        format!("kubectl apply -f {}", output.display()).cyan()
    );

    Ok(())
}
