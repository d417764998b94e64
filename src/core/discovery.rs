//! Source file discovery: which files are hardware-description sources and
//! which of those still use the wildcard.

use crate::domain::model::WILDCARD;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Suffixes recognized as Verilog or SystemVerilog sources.
pub const DEFAULT_EXTENSIONS: [&str; 6] = ["v", "verilog", "vlg", "vh", "sv", "svh"];

pub fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
}

/// Whether `path` carries one of `extensions` (given without the leading dot).
pub fn is_hdl_source(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|allowed| allowed == ext))
        .unwrap_or(false)
}

pub fn contains_wildcard(content: &str) -> bool {
    content.contains(WILDCARD)
}

/// Every source file under `root`, sorted by path.
pub fn discover_sources<S: Storage>(
    storage: &S,
    root: &Path,
    extensions: &[String],
) -> Result<Vec<PathBuf>> {
    Ok(storage
        .list_files(root)?
        .into_iter()
        .filter(|path| is_hdl_source(path, extensions))
        .collect())
}

/// Source files under `root` that contain the wildcard token.
pub fn find_wildcard_files<S: Storage>(
    storage: &S,
    root: &Path,
    extensions: &[String],
) -> Result<Vec<PathBuf>> {
    let mut flagged = Vec::new();
    for path in discover_sources(storage, root, extensions)? {
        if contains_wildcard(&storage.read_file(&path)?) {
            tracing::debug!("wildcard found in {}", path.display());
            flagged.push(path);
        }
    }
    Ok(flagged)
}
