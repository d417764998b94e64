//! Port and module extraction from raw source text.
//!
//! Both scans are line/pattern based rather than a real parse: a port is any
//! line that starts with a direction keyword and ends with one identifier
//! followed by `,` or `);`. Multi-identifier declarations and commented-out
//! ports are not special-cased.

use crate::domain::model::Module;
use regex::Regex;
use std::sync::LazyLock;

static PORT_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*\b(?:input|output|inout)\b.+?(\w+)[ \t]*(?:,|\s*\)\s*;)")
        .expect("port declaration pattern must compile")
});

static MODULE_DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)^\s*module\s+(\w+).*?\bendmodule\b")
        .expect("module definition pattern must compile")
});

/// Ports declared in `module_text`, in the order they appear.
pub fn extract_ports(module_text: &str) -> Vec<String> {
    PORT_DECLARATION
        .captures_iter(module_text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Every `module ... endmodule` block in `content`. Each block ends at the
/// first `endmodule` after its header.
pub fn extract_modules(content: &str) -> Vec<Module> {
    MODULE_DEFINITION
        .captures_iter(content)
        .map(|caps| {
            let name = caps[1].to_string();
            let ports = extract_ports(&caps[0]);
            tracing::debug!("module {} declares {} port(s)", name, ports.len());
            Module::new(name, ports)
        })
        .collect()
}
