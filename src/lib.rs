pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::storage::LocalStorage;
pub use crate::config::CureOptions;
pub use crate::core::cure::{cure_text, CureEngine};
pub use crate::utils::error::{CureError, Result};
