use crate::core::discovery::discover_sources;
use crate::core::extract::extract_modules;
use crate::domain::model::ModuleTable;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::Path;

/// Reads every source file under `root` and records the modules it defines.
pub fn build_module_table<S: Storage>(
    storage: &S,
    root: &Path,
    extensions: &[String],
) -> Result<ModuleTable> {
    let mut table = ModuleTable::new();
    for path in discover_sources(storage, root, extensions)? {
        let content = storage.read_file(&path)?;
        let modules = extract_modules(&content);
        tracing::debug!("{}: {} module(s)", path.display(), modules.len());
        table.insert(path, modules);
    }
    Ok(table)
}

pub fn module_count(table: &ModuleTable) -> usize {
    table.values().map(Vec::len).sum()
}
