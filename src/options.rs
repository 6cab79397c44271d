use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Patterns that are always merged into the ignore set unless explicitly disabled.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "__pycache__",
    "*.pyc",
    "*.log",
    "target",
    "Cargo.lock",
];

/// Files larger than this many bytes are recorded without content.
pub const DEFAULT_MAX_SIZE: u64 = 1024 * 1024;

pub const DEFAULT_OUTPUT: &str = "directory_snapshot.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryDetection {
    /// A NUL byte in the leading sample marks the file as binary.
    Simple,
    /// Classification by `content_inspector`.
    Accurate,
    /// Never treat a file as binary; undecodable bytes are substituted.
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    pub root: PathBuf,
    pub output: PathBuf,
    /// Effective ignore set, defaults included.
    pub ignore_patterns: Vec<String>,
    pub max_size: u64,
    pub no_content: bool,
    pub binary_detection: BinaryDetection,
    pub respect_gitignore: bool,
    pub follow_links: bool,
    pub include_structure: bool,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        SnapshotBuilder::new(".").build()
    }
}

#[derive(Debug)]
pub struct SnapshotBuilder {
    root: PathBuf,
    output: PathBuf,
    ignore_patterns: Vec<String>,
    use_default_ignores: bool,
    max_size: u64,
    no_content: bool,
    binary_detection: BinaryDetection,
    respect_gitignore: bool,
    follow_links: bool,
    include_structure: bool,
}

impl SnapshotBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            ignore_patterns: Vec::new(),
            use_default_ignores: true,
            max_size: DEFAULT_MAX_SIZE,
            no_content: false,
            binary_detection: BinaryDetection::Simple,
            respect_gitignore: false,
            follow_links: false,
            include_structure: false,
        }
    }
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }
    /// Additional patterns, merged after the defaults.
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }
    pub fn use_default_ignores(mut self, yes: bool) -> Self {
        self.use_default_ignores = yes;
        self
    }
    pub fn max_size(mut self, bytes: u64) -> Self {
        self.max_size = bytes;
        self
    }
    pub fn no_content(mut self, yes: bool) -> Self {
        self.no_content = yes;
        self
    }
    pub fn binary_detection(mut self, method: BinaryDetection) -> Self {
        self.binary_detection = method;
        self
    }
    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.respect_gitignore = yes;
        self
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.follow_links = yes;
        self
    }
    pub fn include_structure(mut self, yes: bool) -> Self {
        self.include_structure = yes;
        self
    }
    pub fn build(self) -> SnapshotConfig {
        let defaults: &[&str] = if self.use_default_ignores {
            DEFAULT_IGNORE_PATTERNS
        } else {
            &[]
        };
        SnapshotConfig {
            root: self.root,
            output: self.output,
            ignore_patterns: merge_patterns(defaults, self.ignore_patterns),
            max_size: self.max_size,
            no_content: self.no_content,
            binary_detection: self.binary_detection,
            respect_gitignore: self.respect_gitignore,
            follow_links: self.follow_links,
            include_structure: self.include_structure,
        }
    }
}

fn merge_patterns(defaults: &[&str], extra: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    defaults
        .iter()
        .map(|p| p.to_string())
        .chain(extra)
        .filter(|p| seen.insert(p.clone()))
        .collect()
}
