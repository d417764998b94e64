use crate::utils::error::{CureError, Result};
use serde::Deserialize;
use std::path::Path;

/// Optional project file, e.g. `antidotv.toml`:
///
/// ```toml
/// [discovery]
/// extensions = ["sv", "svh"]
///
/// [rewrite]
/// order = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub discovery: Option<DiscoveryConfig>,
    pub rewrite: Option<RewriteConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscoveryConfig {
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RewriteConfig {
    pub order: Option<bool>,
    pub dry_run: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CureError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CureError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn extensions(&self) -> Option<&[String]> {
        self.discovery.as_ref()?.extensions.as_deref()
    }

    pub fn order(&self) -> bool {
        self.rewrite.as_ref().and_then(|r| r.order).unwrap_or(false)
    }

    pub fn dry_run(&self) -> bool {
        self.rewrite.as_ref().and_then(|r| r.dry_run).unwrap_or(false)
    }
}
