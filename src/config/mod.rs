#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::discovery::default_extensions;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_existing_path, validate_extensions, Validate};
use std::path::{Path, PathBuf};

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CureOptions {
    pub target_path: PathBuf,
    pub search_root: PathBuf,
    pub extensions: Vec<String>,
    pub order_ports: bool,
    pub dry_run: bool,
}

impl Default for CureOptions {
    fn default() -> Self {
        Self {
            target_path: PathBuf::from("."),
            search_root: PathBuf::from("."),
            extensions: default_extensions(),
            order_ports: false,
            dry_run: false,
        }
    }
}

impl ConfigProvider for CureOptions {
    fn target_path(&self) -> &Path {
        &self.target_path
    }

    fn search_root(&self) -> &Path {
        &self.search_root
    }

    fn extensions(&self) -> &[String] {
        &self.extensions
    }

    fn order_ports(&self) -> bool {
        self.order_ports
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }
}

impl Validate for CureOptions {
    fn validate(&self) -> Result<()> {
        validate_existing_path("path", &self.target_path)?;
        validate_existing_path("root", &self.search_root)?;
        validate_extensions("extensions", &self.extensions)?;
        Ok(())
    }
}
