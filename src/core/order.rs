//! Reorders the port connections of an expanded instantiation.
//!
//! Lines that connect one of the module's ports keep their positions; only
//! their content is reassigned so that, top to bottom, they follow the
//! module's declaration order.

use crate::core::expand::connection_offset;
use crate::domain::model::Module;
use crate::utils::error::{CureError, Result};
use std::collections::HashMap;

/// One connection line split into the parts that move and the parts that stay.
#[derive(Debug, Clone, Copy)]
struct ConnectionLine<'a> {
    indent: &'a str,
    body: &'a str,
    closing: &'a str,
    comment: &'a str,
    line_end: &'a str,
}

impl<'a> ConnectionLine<'a> {
    fn parse(line: &'a str) -> Self {
        let (line, line_end) = match line.strip_suffix('\r') {
            Some(head) => (head, "\r"),
            None => (line, ""),
        };
        let code_start = line.len() - line.trim_start().len();
        let (indent, rest) = line.split_at(code_start);
        let (code, comment) = match rest.find("//") {
            Some(idx) => (&rest[..idx], rest[idx..].trim_end()),
            None => (rest, ""),
        };
        let code = code.trim_end();

        // `.port(sig));` also carries the statement terminator, which stays put.
        let (code, closing) = match code.strip_suffix(';') {
            Some(head) if unbalanced_close(head) => {
                let head = head.trim_end();
                let paren = head.len() - 1;
                (&head[..paren], &code[paren..])
            }
            _ => (code, ""),
        };

        Self {
            indent,
            body: code.trim_end().trim_end_matches(',').trim_end(),
            closing,
            comment,
            line_end,
        }
    }

    /// Renders `self`'s content at the position held by `slot`.
    fn render_at(&self, slot: &ConnectionLine<'_>, separated: bool) -> String {
        let mut line = format!("{}{}", self.indent, self.body);
        if separated {
            line.push(',');
        }
        line.push_str(slot.closing);
        if !self.comment.is_empty() {
            line.push(' ');
            line.push_str(self.comment);
        }
        line.push_str(slot.line_end);
        line
    }
}

fn unbalanced_close(code: &str) -> bool {
    let code = code.trim_end();
    code.ends_with(')') && code.matches(')').count() > code.matches('(').count()
}

/// The declared port a line connects, if it starts with `.port` as a whole word.
fn connected_port<'m>(line: &str, ports: &'m [String]) -> Option<&'m str> {
    let rest = line.trim_start().strip_prefix('.')?;
    let end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .unwrap_or(rest.len());
    let name = &rest[..end];
    ports.iter().find(|port| port.as_str() == name).map(String::as_str)
}

/// Whether every port of `module` is connected in `instance`, first
/// connections appearing in declaration order.
fn in_declared_order(instance: &str, module: &Module) -> Result<bool> {
    let mut previous = None;
    for port in &module.ports {
        match connection_offset(instance, port)? {
            Some(offset) if previous.map_or(true, |prev| offset > prev) => previous = Some(offset),
            _ => return Ok(false),
        }
    }
    Ok(true)
}

/// Rewrites `instance` so its connection lines follow `module`'s port order.
///
/// An instance already in declared order is returned as is. Otherwise it
/// needs exactly one connection line per declared port; anything else is
/// refused rather than guessed at.
pub fn order_connections(instance: &str, module: &Module) -> Result<String> {
    if in_declared_order(instance, module)? {
        return Ok(instance.to_string());
    }

    let lines: Vec<&str> = instance.split('\n').collect();

    let mut first_line_of: HashMap<&str, usize> = HashMap::new();
    let mut slots = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        if let Some(port) = connected_port(line, &module.ports) {
            first_line_of.entry(port).or_insert(idx);
            slots.push(idx);
        }
    }

    if slots.len() != module.ports.len() {
        return Err(CureError::PortCountMismatch {
            module: module.name.clone(),
            ports: module.ports.len(),
            connections: slots.len(),
        });
    }

    // Any later line starting with `.` still needs a separator in front of it.
    let last_connection = lines
        .iter()
        .rposition(|line| line.trim_start().starts_with('.'))
        .unwrap_or(0);

    let mut ordered: Vec<String> = lines.iter().map(|line| line.to_string()).collect();
    for (port, &slot) in module.ports.iter().zip(&slots) {
        let source = *first_line_of
            .get(port.as_str())
            .ok_or_else(|| CureError::MissingConnection {
                module: module.name.clone(),
                port: port.clone(),
            })?;
        let content = ConnectionLine::parse(lines[source]);
        let position = ConnectionLine::parse(lines[slot]);
        ordered[slot] = content.render_at(&position, slot < last_connection);
        tracing::debug!("{}: .{} placed on line {}", module.name, port, slot + 1);
    }

    Ok(ordered.join("\n"))
}
