use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CureError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Pattern error: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Cannot order ports of {module}: {ports} declared ports but {connections} connection lines")]
    PortCountMismatch {
        module: String,
        ports: usize,
        connections: usize,
    },

    #[error("Cannot order ports of {module}: no connection line for port '{port}'")]
    MissingConnection { module: String, port: String },
}

impl CureError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CureError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CureError::Io { .. } => "Check that the file exists and that you have read/write permission",
            CureError::ConfigError { .. } => "Fix the TOML syntax of the configuration file",
            CureError::InvalidConfigValueError { .. } => "Correct the reported argument or configuration value",
            CureError::PatternError(_) => "Report the module or port name that triggered this error",
            CureError::PortCountMismatch { .. } | CureError::MissingConnection { .. } => {
                "Put each port connection on its own line (including the first one after the opening parenthesis), or run without --order"
            }
        }
    }

    /// Process exit code for a run that failed with this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CureError::ConfigError { .. } | CureError::InvalidConfigValueError { .. } => 1,
            CureError::PortCountMismatch { .. } | CureError::MissingConnection { .. } => 2,
            CureError::Io { .. } | CureError::PatternError(_) => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, CureError>;
