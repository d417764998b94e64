use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Where source files come from and go back to.
pub trait Storage {
    fn read_file(&self, path: &Path) -> Result<String>;
    fn write_file(&self, path: &Path, content: &str) -> Result<()>;
    /// Every file under `root` (or `root` itself when it is a file), sorted by path.
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

pub trait ConfigProvider {
    fn target_path(&self) -> &Path;
    fn search_root(&self) -> &Path;
    fn extensions(&self) -> &[String];
    fn order_ports(&self) -> bool;
    fn dry_run(&self) -> bool;
}
