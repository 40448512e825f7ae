use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Required tool '{tool}' was not found on PATH")]
    ToolNotFoundError { tool: String },

    #[error("Command `{command}` failed (exit code {code:?}): {stderr}")]
    CommandFailedError {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Template error: {message}")]
    TemplateError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Environment,
    Cluster,
    Configuration,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 依嚴重程度決定行程退出碼
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl DeployError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DeployError::IoError(_) => ErrorCategory::Io,
            DeployError::ToolNotFoundError { .. } => ErrorCategory::Environment,
            DeployError::CommandFailedError { .. } => ErrorCategory::Cluster,
            DeployError::InvalidConfigValueError { .. }
            | DeployError::ConfigValidationError { .. }
            | DeployError::TemplateError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Environment | ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Cluster => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DeployError::IoError(e) => format!("File system error: {}", e),
            DeployError::ToolNotFoundError { tool } => {
                format!("'{}' is not installed or not on PATH", tool)
            }
            DeployError::CommandFailedError { command, stderr, .. } => {
                let detail = stderr.trim();
                if detail.is_empty() {
                    format!("`{}` failed", command)
                } else {
                    format!("`{}` failed: {}", command, detail)
                }
            }
            DeployError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("Invalid {} '{}': {}", field, value, reason),
            DeployError::ConfigValidationError { field, message } => {
                format!("Configuration problem in {}: {}", field, message)
            }
            DeployError::TemplateError { message } => {
                format!("Could not render manifest: {}", message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DeployError::IoError(_) => "Check that the output directory exists and is writable",
            DeployError::ToolNotFoundError { .. } => {
                "Install kubectl and helm, or point [tools] in the config file at their location"
            }
            DeployError::CommandFailedError { .. } => {
                "Check the cluster credentials (kubectl config current-context) and the tool output above"
            }
            DeployError::InvalidConfigValueError { .. } | DeployError::ConfigValidationError { .. } => {
                "Fix the argument or configuration value and run the command again"
            }
            DeployError::TemplateError { .. } => "This is a bug in the bundled manifest templates",
        }
    }
}

pub type Result<T> = std::result::Result<T, DeployError>;
