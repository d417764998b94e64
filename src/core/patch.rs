use crate::domain::model::{FileBuffer, InstanceSpan};
use regex::Regex;
use std::sync::LazyLock;

static DANGLING_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r",[ \t]*(\r?\n)(?:[ \t]*\r?\n)*([ \t]*)\)[ \t]*;")
        .expect("dangling separator pattern must compile")
});

/// Splices `patches` into `buffer`.
///
/// All spans must come from the buffer's text as it was before this call,
/// sorted by start offset and non-overlapping.
pub fn apply_patches(buffer: &mut FileBuffer, patches: &[(InstanceSpan, String)]) {
    buffer.rebase();
    for (span, replacement) in patches {
        buffer.splice(span, replacement);
    }
}

/// Drops a separator left dangling right before a `);` terminator, keeping
/// the terminator on its own line at its original indentation.
pub fn repair_syntax(text: &str) -> String {
    DANGLING_SEPARATOR
        .replace_all(text, "${1}${2});")
        .into_owned()
}
