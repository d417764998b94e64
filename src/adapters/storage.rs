use crate::domain::ports::Storage;
use crate::utils::error::{CureError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Files on the local filesystem, rewritten in place.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| CureError::io(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| CureError::io(dir, e))?.path();
        if path.is_dir() {
            walk_dir(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| CureError::io(path, e))
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).map_err(|e| CureError::io(path, e))
    }

    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if root.is_file() {
            return Ok(vec![root.to_path_buf()]);
        }

        let mut files = Vec::new();
        walk_dir(root, &mut files)?;
        files.sort();
        Ok(files)
    }
}
