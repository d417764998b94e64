use crate::utils::error::{CureError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_existing_path(field_name: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(CureError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if !path.exists() {
        return Err(CureError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.display().to_string(),
            reason: "No such file or directory".to_string(),
        });
    }

    Ok(())
}

/// Checks a list of file suffixes. A leading dot is allowed and ignored.
pub fn validate_extensions(field_name: &str, extensions: &[String]) -> Result<()> {
    if extensions.is_empty() {
        return Err(CureError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "At least one file extension is required".to_string(),
        });
    }

    for extension in extensions {
        let bare = extension.trim_start_matches('.');
        if bare.trim().is_empty() {
            return Err(CureError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: extension.clone(),
                reason: "Extension cannot be empty".to_string(),
            });
        }
        if bare.contains('/') || bare.contains('\\') {
            return Err(CureError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: extension.clone(),
                reason: "Extension cannot contain path separators".to_string(),
            });
        }
    }

    Ok(())
}

pub fn normalize_extensions(extensions: &[String]) -> Vec<String> {
    extensions
        .iter()
        .map(|ext| ext.trim().trim_start_matches('.').to_string())
        .collect()
}
