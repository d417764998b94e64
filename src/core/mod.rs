pub mod cure;
pub mod discovery;
pub mod expand;
pub mod extract;
pub mod instance;
pub mod module_table;
pub mod order;
pub mod patch;

pub use crate::domain::model::{CureReport, FileBuffer, InstanceSpan, Module, ModuleTable};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
