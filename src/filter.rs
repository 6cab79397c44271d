//! Ignore-pattern matching.
//!
//! Each pattern is a shell-style glob. An entry is ignored when a pattern matches
//! its base name or its `/`-separated path relative to the root. `*`, `?` and
//! classes never match `/`, so only `**` spans segments. Because ignored
//! directories are pruned before descent, matching the base name of every visited
//! entry is equivalent to matching any segment of its path.

use crate::error::SnapshotError;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

#[derive(Debug, Clone)]
pub(crate) struct IgnoreMatcher {
    set: GlobSet,
}

impl IgnoreMatcher {
    pub(crate) fn new(patterns: &[String]) -> Result<Self, SnapshotError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = GlobBuilder::new(pattern)
                .case_insensitive(false)
                .literal_separator(true)
                .build()
                .map_err(|source| SnapshotError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|source| SnapshotError::Pattern {
            pattern: patterns.join(" "),
            source,
        })?;
        Ok(Self { set })
    }

    /// `relative` is the entry's path below the root, `/`-separated.
    pub(crate) fn is_ignored(&self, relative: &str) -> bool {
        if self.set.is_empty() || relative.is_empty() {
            return false;
        }
        let name = relative.rsplit('/').next().unwrap_or(relative);
        self.set.is_match(name) || self.set.is_match(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(patterns: &[&str]) -> IgnoreMatcher {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        IgnoreMatcher::new(&patterns).unwrap()
    }

    #[test]
    fn matches_base_name_at_any_depth() {
        let m = matcher(&[".git", "*.log"]);
        assert!(m.is_ignored(".git"));
        assert!(m.is_ignored("vendor/lib/.git"));
        assert!(m.is_ignored("app.log"));
        assert!(m.is_ignored("deep/nested/server.log"));
        assert!(!m.is_ignored("app.txt"));
        assert!(!m.is_ignored("logs/app.txt"));
    }

    #[test]
    fn matches_relative_path_patterns() {
        let m = matcher(&["docs/*.md", "src/gen"]);
        assert!(m.is_ignored("docs/readme.md"));
        assert!(m.is_ignored("src/gen"));
        assert!(!m.is_ignored("readme.md"));
        assert!(!m.is_ignored("gen"));
    }

    #[test]
    fn wildcard_stays_within_one_segment() {
        let m = matcher(&["s*.rs", "docs*"]);
        assert!(m.is_ignored("setup.rs"));
        assert!(m.is_ignored("lib/sync.rs"));
        assert!(!m.is_ignored("src/main.rs"));
        assert!(m.is_ignored("docs"));
        assert!(!m.is_ignored("docs/guide.md"));
    }

    #[test]
    fn double_star_spans_segments() {
        let m = matcher(&["gen/**/*.rs"]);
        assert!(m.is_ignored("gen/a/b/out.rs"));
        assert!(!m.is_ignored("src/gen/out.rs"));
    }

    #[test]
    fn is_case_sensitive() {
        let m = matcher(&["*.TXT"]);
        assert!(m.is_ignored("A.TXT"));
        assert!(!m.is_ignored("a.txt"));
    }

    #[test]
    fn supports_question_mark_and_classes() {
        let m = matcher(&["file?.[ch]"]);
        assert!(m.is_ignored("file1.c"));
        assert!(m.is_ignored("src/fileX.h"));
        assert!(!m.is_ignored("file10.c"));
        assert!(!m.is_ignored("file1.rs"));
    }

    #[test]
    fn root_is_never_ignored() {
        let m = matcher(&["*"]);
        assert!(!m.is_ignored(""));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = IgnoreMatcher::new(&["[unterminated".to_string()]).unwrap_err();
        assert!(matches!(err, SnapshotError::Pattern { .. }));
    }
}
