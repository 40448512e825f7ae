use crate::utils::error::{DeployError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

const SERVICE_TYPES: [&str; 3] = ["ClusterIP", "NodePort", "LoadBalancer"];

/// 外部工具與自動擴展元件的設定 (scalectl.toml)，所有欄位皆有預設值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub tools: ToolsConfig,
    pub autoscaler: AutoscalerConfig,
    pub scaling: ScalingConfig,
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub kubectl: String,
    pub helm: String,
    pub kube_context: Option<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            kubectl: "kubectl".to_string(),
            helm: "helm".to_string(),
            kube_context: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoscalerConfig {
    pub repo_name: String,
    pub repo_url: String,
    pub chart: String,
    pub release: String,
    pub namespace: String,
    pub version: Option<String>,
}

impl Default for AutoscalerConfig {
    fn default() -> Self {
        Self {
            repo_name: "kedacore".to_string(),
            repo_url: "https://kedacore.github.io/charts".to_string(),
            chart: "kedacore/keda".to_string(),
            release: "keda".to_string(),
            namespace: "keda".to_string(),
            version: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalingConfig {
    pub min_replicas: u32,
    pub max_replicas: u32,
    pub polling_interval: u32,
    pub cooldown_period: u32,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            min_replicas: 1,
            max_replicas: 10,
            polling_interval: 30,
            cooldown_period: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub r#type: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            r#type: "ClusterIP".to_string(),
        }
    }
}

impl ToolConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 檔案存在時載入，否則使用預設值
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(
                "No config file at {}, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| DeployError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${KUBE_CONTEXT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl Validate for ToolConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_token("tools.kubectl", &self.tools.kubectl)?;
        validation::validate_token("tools.helm", &self.tools.helm)?;
        if let Some(context) = &self.tools.kube_context {
            validation::validate_token("tools.kube_context", context)?;
        }

        validation::validate_url(
            "autoscaler.repo_url",
            &self.autoscaler.repo_url,
            &["http", "https"],
        )?;
        validation::validate_token("autoscaler.repo_name", &self.autoscaler.repo_name)?;
        validation::validate_token("autoscaler.chart", &self.autoscaler.chart)?;
        validation::validate_dns_label("autoscaler.release", &self.autoscaler.release)?;
        validation::validate_dns_label("autoscaler.namespace", &self.autoscaler.namespace)?;
        if let Some(version) = &self.autoscaler.version {
            validation::validate_token("autoscaler.version", version)?;
        }

        validation::validate_range("scaling.max_replicas", self.scaling.max_replicas, 1, 1000)?;
        if self.scaling.min_replicas > self.scaling.max_replicas {
            return Err(DeployError::ConfigValidationError {
                field: "scaling.min_replicas".to_string(),
                message: format!(
                    "min_replicas ({}) cannot exceed max_replicas ({})",
                    self.scaling.min_replicas, self.scaling.max_replicas
                ),
            });
        }

        validation::validate_one_of("service.type", &self.service.r#type, &SERVICE_TYPES)
    }
}
