use crate::domain::model::InstanceSpan;
use crate::utils::error::Result;
use regex::Regex;

/// Pattern for one instantiation of `module_name`: an indented line starting
/// with the module name, an optional `#(...)` parameter override, an optional
/// instance name, then the port list up to the first `);`.
fn instance_pattern(module_name: &str) -> Result<Regex> {
    let pattern = format!(
        r"(?ms)^[ \t]+\b{}\b\s*(?:#\s*\(.*?\)\s*)?(?:\w+\s*)?\(.*?\)\s*;",
        regex::escape(module_name)
    );
    Ok(Regex::new(&pattern)?)
}

/// Non-overlapping instantiations of `module_name` in `text`, left to right.
pub fn locate_instances(text: &str, module_name: &str) -> Result<Vec<InstanceSpan>> {
    let pattern = instance_pattern(module_name)?;
    Ok(pattern
        .find_iter(text)
        .map(|m| InstanceSpan {
            start: m.start(),
            end: m.end(),
            text: m.as_str().to_string(),
        })
        .collect())
}
