//! Internal module for rendering the `file_structure` tree from relative paths.

use std::collections::BTreeMap;

#[derive(Default)]
struct Node {
    is_dir: bool,
    children: BTreeMap<String, Node>,
}

impl Node {
    fn insert(&mut self, relative: &str, is_dir: bool) {
        let mut node = self;
        let mut segments = relative.split('/').filter(|s| !s.is_empty()).peekable();
        while let Some(segment) = segments.next() {
            node = node.children.entry(segment.to_string()).or_default();
            // Every segment but the last is a directory.
            if segments.peek().is_some() || is_dir {
                node.is_dir = true;
            }
        }
    }

    fn render(&self, prefix: &str, lines: &mut Vec<String>) {
        let count = self.children.len();
        for (i, (name, child)) in self.children.iter().enumerate() {
            let last = i + 1 == count;
            let connector = if last { "└── " } else { "├── " };
            let suffix = if child.is_dir { "/" } else { "" };
            lines.push(format!("{prefix}{connector}{name}{suffix}"));
            if child.is_dir {
                let next = format!("{prefix}{}", if last { "    " } else { "│   " });
                child.render(&next, lines);
            }
        }
    }
}

/// Builds a `tree`-style listing of `entries` (relative path, is-directory).
///
/// The root itself is not shown; siblings are sorted by name and directories
/// carry a trailing `/`.
pub(crate) fn build_tree<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, bool)>,
{
    let mut root = Node::default();
    for (relative, is_dir) in entries {
        root.insert(relative, is_dir);
    }
    let mut lines = Vec::new();
    root.render("", &mut lines);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_entries_with_connectors() {
        let tree = build_tree([
            ("src", true),
            ("src/main.rs", false),
            ("src/util", true),
            ("src/util/io.rs", false),
            ("Cargo.toml", false),
            ("README.md", false),
        ]);
        let expected = [
            "├── Cargo.toml",
            "├── README.md",
            "└── src/",
            "    ├── main.rs",
            "    └── util/",
            "        └── io.rs",
        ]
        .join("\n");
        assert_eq!(tree, expected);
    }

    #[test]
    fn intermediate_directories_are_implied() {
        let tree = build_tree([("a/b/c.txt", false), ("z.txt", false)]);
        let expected = ["├── a/", "│   └── b/", "│       └── c.txt", "└── z.txt"].join("\n");
        assert_eq!(tree, expected);
    }

    #[test]
    fn empty_directory_is_listed() {
        assert_eq!(build_tree([("empty", true)]), "└── empty/");
    }

    #[test]
    fn nothing_renders_empty() {
        assert_eq!(build_tree(Vec::<(&str, bool)>::new()), "");
    }
}
