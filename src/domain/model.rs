use std::collections::BTreeMap;
use std::path::PathBuf;

/// The implicit "connect all ports" marker in an instantiation.
pub const WILDCARD: &str = ".*";

/// A module definition: its name and the ports declared in its body, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub ports: Vec<String>,
}

impl Module {
    pub fn new(name: impl Into<String>, ports: Vec<String>) -> Self {
        Self {
            name: name.into(),
            ports,
        }
    }
}

/// Every visited source file mapped to the modules it defines.
///
/// Files without any module definition are still present, with an empty list.
pub type ModuleTable = BTreeMap<PathBuf, Vec<Module>>;

/// One instantiation statement inside a specific snapshot of file text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceSpan {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl InstanceSpan {
    pub fn has_wildcard(&self) -> bool {
        self.text.contains(WILDCARD)
    }
}

/// Text of one file being rewritten, plus the running length delta of the
/// replacements applied since the last snapshot was taken.
#[derive(Debug, Clone)]
pub struct FileBuffer {
    pub path: PathBuf,
    pub text: String,
    offset_delta: isize,
}

impl FileBuffer {
    pub fn new(path: impl Into<PathBuf>, text: String) -> Self {
        Self {
            path: path.into(),
            text,
            offset_delta: 0,
        }
    }

    pub fn offset_delta(&self) -> isize {
        self.offset_delta
    }

    /// Replaces `span` (recorded against the last snapshot) with `replacement`.
    ///
    /// Spans must be spliced in increasing start order and must not overlap.
    pub fn splice(&mut self, span: &InstanceSpan, replacement: &str) {
        let start = shift(span.start, self.offset_delta);
        let end = shift(span.end, self.offset_delta);
        self.text.replace_range(start..end, replacement);
        self.offset_delta += replacement.len() as isize - (span.end - span.start) as isize;
    }

    /// Marks the current text as the snapshot that new spans are found against.
    pub fn rebase(&mut self) {
        self.offset_delta = 0;
    }
}

fn shift(offset: usize, delta: isize) -> usize {
    (offset as isize + delta) as usize
}

/// Outcome of one cure run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CureReport {
    pub files_scanned: usize,
    pub files_changed: Vec<PathBuf>,
    pub instances_cured: usize,
}
