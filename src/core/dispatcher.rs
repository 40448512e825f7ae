use crate::config::toml_config::ToolConfig;
use crate::config::Command;
use crate::core::helm::Helm;
use crate::core::kubectl::{self, Kubectl};
use crate::core::manifest::ManifestRenderer;
use crate::core::{CommandRunner, Storage};
use crate::domain::model::{CommandOutput, DeploySpec, Invocation};
use crate::utils::error::{DeployError, Result};
use std::io::Write;

/// Runs each subcommand as a straight sequence of external calls and stops
/// at the first failure. Already-applied resources are left in place.
pub struct Dispatcher<R: CommandRunner, S: Storage> {
    runner: R,
    storage: S,
    config: ToolConfig,
    kubectl: Kubectl,
    helm: Helm,
}

impl<R: CommandRunner, S: Storage> Dispatcher<R, S> {
    pub fn new(runner: R, storage: S, config: ToolConfig) -> Self {
        Self {
            kubectl: Kubectl::new(&config.tools),
            helm: Helm::new(&config.tools),
            runner,
            storage,
            config,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub async fn run(&self, command: &Command) -> Result<()> {
        match command {
            Command::InstallTools => {
                for version in self.install_tools().await? {
                    println!("✅ {}", version);
                }
                println!("✅ All required tools are installed");
            }
            Command::Setup => {
                self.setup().await?;
                println!(
                    "✅ Autoscaler '{}' installed in namespace '{}'",
                    self.config.autoscaler.release, self.config.autoscaler.namespace
                );
            }
            Command::Deploy(args) => {
                let spec = args.to_spec()?;
                let written = self.deploy(&spec).await?;
                for path in &written {
                    println!("📄 {}", path);
                }
                println!(
                    "✅ Deployed {} ({}) to namespace '{}'",
                    spec.name,
                    spec.image_ref(),
                    spec.namespace
                );
            }
            Command::Health(args) => {
                self.health(&args.namespace, &args.deployment_name, &mut std::io::stdout())
                    .await?;
            }
        }
        Ok(())
    }

    /// Returns the first line each tool printed for its version. Tools that
    /// printed nothing (dry run) are left out.
    pub async fn install_tools(&self) -> Result<Vec<String>> {
        let mut versions = Vec::new();
        for (tool, invocation) in [
            (self.kubectl.binary(), self.kubectl.client_version()),
            (self.helm.binary(), self.helm.version()),
        ] {
            tracing::info!("🔍 Checking {}", tool);
            let output = self.run_checked(&invocation).await?;
            let version = output.stdout.lines().next().unwrap_or_default().trim();
            if !version.is_empty() {
                versions.push(format!("{}: {}", tool, version));
            }
        }
        Ok(versions)
    }

    pub async fn setup(&self) -> Result<()> {
        let autoscaler = &self.config.autoscaler;

        tracing::info!("📦 Adding chart repository {}", autoscaler.repo_url);
        self.run_checked(&self.helm.repo_add(autoscaler)).await?;
        self.run_checked(&self.helm.repo_update()).await?;

        tracing::info!(
            "🚀 Installing {} as release '{}'",
            autoscaler.chart,
            autoscaler.release
        );
        self.run_checked(&self.helm.install(autoscaler)).await?;
        Ok(())
    }

    /// Returns the paths of the manifests written, in apply order.
    pub async fn deploy(&self, spec: &DeploySpec) -> Result<Vec<String>> {
        tracing::info!("📁 Ensuring namespace '{}'", spec.namespace);
        if !self
            .run_tolerating_exists(&self.kubectl.create_namespace(&spec.namespace))
            .await?
        {
            tracing::info!("Namespace '{}' already exists", spec.namespace);
        }

        let renderer = ManifestRenderer::new(self.config.clone());
        let mut written = Vec::new();
        for manifest in renderer.render_all(spec)? {
            let path = self
                .storage
                .write_file(manifest.kind.file_name(), manifest.content.as_bytes())
                .await?;
            tracing::debug!("Wrote {:?} manifest to {}", manifest.kind, path);
            written.push(path);
        }

        for path in &written {
            tracing::info!("⬆️  Applying {}", path);
            self.run_checked(&self.kubectl.apply_file(path)).await?;
        }

        Ok(written)
    }

    /// Writes the deployment status to `out` before asking for metrics, so
    /// the status is shown even when `kubectl top` fails.
    pub async fn health<W: Write>(&self, namespace: &str, name: &str, out: &mut W) -> Result<()> {
        tracing::info!("🩺 Checking deployment {}/{}", namespace, name);
        let deployment = self
            .run_checked(&self.kubectl.get_deployment(namespace, name))
            .await?;
        writeln!(out, "{}", deployment.stdout.trim_end())?;
        out.flush()?;

        let metrics = self
            .run_checked(&self.kubectl.top_pods(namespace, name))
            .await?;
        writeln!(out, "{}", metrics.stdout.trim_end())?;
        Ok(())
    }

    async fn run_checked(&self, invocation: &Invocation) -> Result<CommandOutput> {
        tracing::debug!("Running: {}", invocation);
        let output = self.runner.run(invocation).await?;
        if output.success() {
            Ok(output)
        } else {
            Err(command_failed(invocation, output))
        }
    }

    /// `Ok(true)` when the command succeeded, `Ok(false)` when the target
    /// already existed.
    async fn run_tolerating_exists(&self, invocation: &Invocation) -> Result<bool> {
        tracing::debug!("Running: {}", invocation);
        let output = self.runner.run(invocation).await?;
        if output.success() {
            Ok(true)
        } else if kubectl::is_already_exists(&output.stderr) {
            Ok(false)
        } else {
            Err(command_failed(invocation, output))
        }
    }
}

fn command_failed(invocation: &Invocation, output: CommandOutput) -> DeployError {
    DeployError::CommandFailedError {
        command: invocation.to_string(),
        code: output.code,
        stderr: output.stderr,
    }
}
