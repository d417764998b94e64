use crate::domain::model::{Module, WILDCARD};
use crate::utils::error::Result;
use regex::Regex;
use std::sync::LazyLock;

static WILDCARD_INDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"( *)\.\*").expect("wildcard indent pattern must compile"));

static WILDCARD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*\.\*[ \t]*,?[ \t]*\r?\n").expect("wildcard line pattern must compile")
});

static WILDCARD_LAST_INLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r",\s*\.\*\s*(\))").expect("trailing inline wildcard pattern must compile")
});

static WILDCARD_INLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.\*[ \t]*,?[ \t]*").expect("inline wildcard pattern must compile")
});

/// Number of spaces directly in front of the wildcard token.
fn wildcard_indent(instance: &str) -> usize {
    WILDCARD_INDENT
        .captures(instance)
        .map(|caps| caps[1].len())
        .unwrap_or(0)
}

/// Byte offset of the first explicit `.port` connection in `instance`, if any.
pub fn connection_offset(instance: &str, port: &str) -> Result<Option<usize>> {
    let pattern = Regex::new(&format!(r"(?:^|[^\w.\])])(\.{}\b)", regex::escape(port)))?;
    Ok(pattern
        .captures(instance)
        .and_then(|caps| caps.get(1))
        .map(|m| m.start()))
}

/// Whether `instance` already connects `port` explicitly (`.port` as a whole word).
pub fn is_connected(instance: &str, port: &str) -> Result<bool> {
    Ok(connection_offset(instance, port)?.is_some())
}

/// Declared ports of `module` that `instance` does not connect, in declaration order.
pub fn missing_ports<'m>(instance: &str, module: &'m Module) -> Result<Vec<&'m str>> {
    let mut missing = Vec::new();
    for port in &module.ports {
        if !is_connected(instance, port)? {
            missing.push(port.as_str());
        }
    }
    Ok(missing)
}

/// Replaces the wildcard in `instance` with one `.port,` line per unconnected port.
///
/// Generated lines share the wildcard's indentation. The first line goes where
/// the token was, so it carries no indentation of its own, and the last one
/// drops its separator (the token's own separator, if any, follows it).
pub fn expand_wildcard(instance: &str, module: &Module) -> Result<String> {
    let indent = " ".repeat(wildcard_indent(instance));
    let missing = missing_ports(instance, module)?;

    let block = missing
        .iter()
        .map(|port| {
            tracing::debug!("{}: connecting .{}", module.name, port);
            format!("{}.{},", indent, port)
        })
        .collect::<Vec<_>>()
        .join("\n");
    let block = block.strip_suffix(',').unwrap_or(&block).trim_start();

    if block.is_empty() {
        // Nothing left to connect: drop the token together with its separator.
        let without_line = WILDCARD_LINE.replace_all(instance, "");
        if !without_line.contains(WILDCARD) {
            return Ok(without_line.into_owned());
        }
        // `.a(a), .*)` loses the separator in front of the token instead.
        let without_last = WILDCARD_LAST_INLINE.replace_all(&without_line, "${1}");
        return Ok(WILDCARD_INLINE.replace_all(&without_last, "").into_owned());
    }

    Ok(instance.replace(WILDCARD, block))
}
