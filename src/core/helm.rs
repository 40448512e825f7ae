use crate::config::toml_config::{AutoscalerConfig, ToolsConfig};
use crate::domain::model::Invocation;

#[derive(Debug, Clone)]
pub struct Helm {
    binary: String,
    kube_context: Option<String>,
}

impl Helm {
    pub fn new(tools: &ToolsConfig) -> Self {
        Self {
            binary: tools.helm.clone(),
            kube_context: tools.kube_context.clone(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn version(&self) -> Invocation {
        Invocation::new(&self.binary).args(["version", "--short"])
    }

    /// `--force-update` repoints an existing entry at `repo_url` instead of
    /// keeping whatever URL was configured before.
    pub fn repo_add(&self, autoscaler: &AutoscalerConfig) -> Invocation {
        Invocation::new(&self.binary).args([
            "repo",
            "add",
            autoscaler.repo_name.as_str(),
            autoscaler.repo_url.as_str(),
            "--force-update",
        ])
    }

    pub fn repo_update(&self) -> Invocation {
        Invocation::new(&self.binary).args(["repo", "update"])
    }

    pub fn install(&self, autoscaler: &AutoscalerConfig) -> Invocation {
        let mut invocation = Invocation::new(&self.binary).args([
            "install",
            autoscaler.release.as_str(),
            autoscaler.chart.as_str(),
            "--namespace",
            autoscaler.namespace.as_str(),
            "--create-namespace",
        ]);
        if let Some(version) = &autoscaler.version {
            invocation = invocation.args(["--version", version.as_str()]);
        }
        if let Some(context) = &self.kube_context {
            invocation = invocation.args(["--kube-context", context.as_str()]);
        }
        invocation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_install() {
        let helm = Helm::new(&ToolsConfig::default());
        let autoscaler = AutoscalerConfig::default();

        assert_eq!(
            helm.repo_add(&autoscaler).to_string(),
            "helm repo add kedacore https://kedacore.github.io/charts --force-update"
        );
        assert_eq!(
            helm.install(&autoscaler).to_string(),
            "helm install keda kedacore/keda --namespace keda --create-namespace"
        );
    }

    #[test]
    fn test_pinned_version_and_context() {
        let tools = ToolsConfig {
            helm: "helm3".to_string(),
            kube_context: Some("prod".to_string()),
            ..Default::default()
        };
        let autoscaler = AutoscalerConfig {
            version: Some("2.14.0".to_string()),
            ..Default::default()
        };

        assert_eq!(
            Helm::new(&tools).install(&autoscaler).to_string(),
            "helm3 install keda kedacore/keda --namespace keda --create-namespace --version 2.14.0 --kube-context prod"
        );
    }
}
