pub mod toml_config;

use crate::domain::model::{BrokerSettings, DeploySpec, ResourceRequirements};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "scalectl.toml";

#[derive(Debug, Clone, Parser)]
#[command(name = "scalectl")]
#[command(about = "Deploy queue-driven workloads with KEDA autoscaling via kubectl and helm")]
pub struct CliConfig {
    /// Path to TOML tool configuration (defaults to ./scalectl.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory the rendered manifests are written to
    #[arg(short, long, global = true, default_value = ".")]
    pub output_dir: PathBuf,

    /// Print external commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check that kubectl and helm are installed
    #[command(name = "installtools", alias = "install")]
    InstallTools,

    /// Install the KEDA autoscaler with helm
    Setup,

    /// Render and apply the Deployment, Service and ScaledObject manifests
    Deploy(DeployArgs),

    /// Show deployment status and pod metrics
    Health(HealthArgs),
}

#[derive(Debug, Clone, Args)]
pub struct DeployArgs {
    pub namespace: String,
    pub name: String,
    pub image: String,
    pub tag: String,
    pub port: String,
    pub cpu_request: String,
    pub memory_request: String,
    pub cpu_limit: String,
    pub memory_limit: String,
    /// RabbitMQ connection URL (amqp:// or amqps://)
    pub broker_host: String,
    pub queue_name: String,
    /// Target messages per replica
    pub queue_length: String,
}

impl DeployArgs {
    /// 驗證並轉換為部署規格
    pub fn to_spec(&self) -> Result<DeploySpec> {
        validation::validate_dns_label("namespace", &self.namespace)?;
        // name 也是 Service 名稱，需符合 RFC 1035
        validation::validate_rfc1035_label("name", &self.name)?;
        validation::validate_image_ref("image", &self.image)?;
        validation::validate_image_tag("tag", &self.tag)?;

        let port: u16 = validation::parse_number("port", &self.port)?;
        validation::validate_range("port", port, 1, u16::MAX)?;

        validation::validate_quantity("cpu_request", &self.cpu_request)?;
        validation::validate_quantity("memory_request", &self.memory_request)?;
        validation::validate_quantity("cpu_limit", &self.cpu_limit)?;
        validation::validate_quantity("memory_limit", &self.memory_limit)?;

        validation::validate_url("broker_host", &self.broker_host, &["amqp", "amqps"])?;
        validation::validate_quoted_scalar("broker_host", &self.broker_host)?;
        validation::validate_quoted_scalar("queue_name", &self.queue_name)?;
        let queue_length: u32 = validation::parse_number("queue_length", &self.queue_length)?;
        validation::validate_range("queue_length", queue_length, 1, u32::MAX)?;

        Ok(DeploySpec {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            image: self.image.clone(),
            tag: self.tag.clone(),
            port,
            resources: ResourceRequirements {
                cpu_request: self.cpu_request.clone(),
                memory_request: self.memory_request.clone(),
                cpu_limit: self.cpu_limit.clone(),
                memory_limit: self.memory_limit.clone(),
            },
            broker: BrokerSettings {
                host: self.broker_host.clone(),
                queue_name: self.queue_name.clone(),
                queue_length,
            },
        })
    }
}

impl Validate for DeployArgs {
    fn validate(&self) -> Result<()> {
        self.to_spec().map(|_| ())
    }
}

#[derive(Debug, Clone, Args)]
pub struct HealthArgs {
    pub namespace: String,
    pub deployment_name: String,
}

impl Validate for HealthArgs {
    fn validate(&self) -> Result<()> {
        validation::validate_dns_label("namespace", &self.namespace)?;
        validation::validate_dns_subdomain("deployment_name", &self.deployment_name)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("output_dir", &self.output_dir.to_string_lossy())?;
        match &self.command {
            Command::Deploy(args) => args.validate(),
            Command::Health(args) => args.validate(),
            Command::InstallTools | Command::Setup => Ok(()),
        }
    }
}
