use crate::config::toml_config::ToolsConfig;
use crate::domain::model::Invocation;

/// Builds kubectl command lines. Nothing here runs a process.
#[derive(Debug, Clone)]
pub struct Kubectl {
    binary: String,
    context: Option<String>,
}

impl Kubectl {
    pub fn new(tools: &ToolsConfig) -> Self {
        Self {
            binary: tools.kubectl.clone(),
            context: tools.kube_context.clone(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    fn base(&self) -> Invocation {
        let invocation = Invocation::new(&self.binary);
        match &self.context {
            Some(context) => invocation.args(["--context", context.as_str()]),
            None => invocation,
        }
    }

    // --client keeps the check offline
    pub fn client_version(&self) -> Invocation {
        Invocation::new(&self.binary).args(["version", "--client"])
    }

    pub fn create_namespace(&self, namespace: &str) -> Invocation {
        self.base().args(["create", "namespace", namespace])
    }

    pub fn apply_file(&self, path: &str) -> Invocation {
        self.base().args(["apply", "-f", path])
    }

    pub fn get_deployment(&self, namespace: &str, name: &str) -> Invocation {
        self.base().args(["get", "deployment", name, "-n", namespace])
    }

    /// Needs metrics-server in the cluster.
    pub fn top_pods(&self, namespace: &str, name: &str) -> Invocation {
        self.base()
            .args(["top", "pods", "-n", namespace, "-l"])
            .arg(format!("app={}", name))
    }
}

/// kubectl reports a duplicate `create` as `AlreadyExists` on stderr.
pub fn is_already_exists(stderr: &str) -> bool {
    stderr.contains("AlreadyExists") || stderr.contains("already exists")
}
