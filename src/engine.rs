use crate::content;
use crate::error::SnapshotError;
use crate::filter::IgnoreMatcher;
use crate::options::SnapshotConfig;
use crate::tree::build_tree;
use crate::types::{ErrorEntry, FileEntry, SnapshotResult};
use ignore::WalkBuilder;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What the walk found, in traversal order.
enum Visit {
    File { path: PathBuf, relative: String },
    Dir(String),
    Failed(ErrorEntry),
}

/// A visit after the content-inclusion gate has run.
enum Outcome {
    Included(FileEntry),
    Failed(ErrorEntry),
    Dir(String),
    /// A symlink to a directory that is not being followed.
    Skipped,
}

struct Walker {
    root: PathBuf,
    inner: ignore::Walk,
}

impl Walker {
    fn new(config: &SnapshotConfig) -> Result<Self, SnapshotError> {
        let matcher = IgnoreMatcher::new(&config.ignore_patterns)?;
        let output_target = fs::canonicalize(&config.output).ok();
        let root = config.root.clone();

        let mut builder = WalkBuilder::new(&config.root);
        builder
            .standard_filters(false)
            .git_ignore(config.respect_gitignore)
            .git_exclude(config.respect_gitignore)
            .git_global(config.respect_gitignore)
            .parents(config.respect_gitignore)
            .follow_links(config.follow_links)
            .sort_by_file_path(files_before_dirs);

        let filter_root = root.clone();
        builder.filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            let relative = relative_path(&filter_root, entry.path());
            if matcher.is_ignored(&relative) {
                #[cfg(feature = "logging")]
                tracing::debug!("Ignoring {}", relative);
                return false;
            }
            !is_output_file(entry.path(), output_target.as_deref())
        });

        Ok(Self {
            root,
            inner: builder.build(),
        })
    }

    fn collect_visits(self) -> Result<Vec<Visit>, SnapshotError> {
        let root = self.root;
        let mut visits = Vec::new();
        for result in self.inner {
            match result {
                Ok(entry) => {
                    if entry.depth() == 0 {
                        continue;
                    }
                    let relative = relative_path(&root, entry.path());
                    if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                        visits.push(Visit::Dir(relative));
                    } else {
                        visits.push(Visit::File {
                            path: entry.into_path(),
                            relative,
                        });
                    }
                }
                Err(err) => {
                    let relative = error_path(&err).map(|p| relative_path(&root, p));
                    let message = error_message(&err);
                    if relative.as_deref() == Some("") {
                        // Failing to read the root itself is fatal.
                        let source = err
                            .into_io_error()
                            .unwrap_or_else(|| io::Error::other(message));
                        return Err(SnapshotError::io(&root, source));
                    }
                    let relative = relative.unwrap_or_else(|| ".".to_string());
                    #[cfg(feature = "logging")]
                    tracing::warn!("Walk error at {}: {}", relative, message);
                    visits.push(Visit::Failed(ErrorEntry {
                        path: relative,
                        error: message,
                    }));
                }
            }
        }
        Ok(visits)
    }
}

/// Regular files of a directory come before its subdirectories; each group is name-ordered.
fn files_before_dirs(a: &Path, b: &Path) -> Ordering {
    a.is_dir()
        .cmp(&b.is_dir())
        .then_with(|| a.file_name().cmp(&b.file_name()))
}

fn is_output_file(path: &Path, target: Option<&Path>) -> bool {
    let Some(target) = target else {
        return false;
    };
    if path.file_name() != target.file_name() {
        return false;
    }
    fs::canonicalize(path).is_ok_and(|p| p == target)
}

/// `path` relative to `root`, joined with `/` whatever the host separator.
fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        ignore::Error::Partial(errs) => errs.iter().find_map(error_path),
        _ => None,
    }
}

/// The error text without the path prefix, which is recorded separately.
fn error_message(err: &ignore::Error) -> String {
    match err {
        ignore::Error::WithPath { err, .. } | ignore::Error::WithDepth { err, .. } => {
            error_message(err)
        }
        other => other.to_string(),
    }
}

fn resolve(visit: Visit, config: &SnapshotConfig) -> Outcome {
    match visit {
        Visit::Dir(relative) => Outcome::Dir(relative),
        Visit::Failed(entry) => Outcome::Failed(entry),
        Visit::File { path, relative } => process_file(&path, relative, config),
    }
}

fn process_file(path: &Path, relative: String, config: &SnapshotConfig) -> Outcome {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) => return failed(relative, e),
    };
    if metadata.is_dir() {
        return Outcome::Skipped;
    }
    if config.no_content {
        return Outcome::Included(FileEntry {
            path: relative,
            content: None,
        });
    }
    if metadata.len() > config.max_size {
        #[cfg(feature = "logging")]
        tracing::debug!(
            "File too large ({} > {}), skipping content: {}",
            metadata.len(),
            config.max_size,
            relative
        );
        return Outcome::Included(FileEntry {
            path: relative,
            content: None,
        });
    }
    match content::read_text(path, config.binary_detection) {
        Ok(content) => Outcome::Included(FileEntry {
            path: relative,
            content,
        }),
        Err(e) => failed(relative, e),
    }
}

fn failed(relative: String, e: io::Error) -> Outcome {
    #[cfg(feature = "logging")]
    tracing::warn!("Failed to process {}: {}", relative, e);
    Outcome::Failed(ErrorEntry {
        path: relative,
        error: e.to_string(),
    })
}

#[cfg(not(feature = "parallel"))]
fn process_visits(visits: Vec<Visit>, config: &SnapshotConfig) -> Vec<Outcome> {
    visits.into_iter().map(|v| resolve(v, config)).collect()
}

#[cfg(feature = "parallel")]
fn process_visits(visits: Vec<Visit>, config: &SnapshotConfig) -> Vec<Outcome> {
    visits
        .into_par_iter()
        .map(|v| resolve(v, config))
        .collect()
}

fn check_root(root: &Path) -> Result<(), SnapshotError> {
    match fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        _ => Err(SnapshotError::InvalidRoot {
            path: root.to_path_buf(),
        }),
    }
}

/// Walks `config.root` and builds the snapshot in memory.
///
/// Per-file failures are recorded in [`SnapshotResult::errors`]; only an invalid
/// root, an unreadable root, or a malformed ignore pattern fails the call.
pub fn snapshot(config: &SnapshotConfig) -> Result<SnapshotResult, SnapshotError> {
    #[cfg(feature = "logging")]
    tracing::debug!("Starting snapshot with root: {}", config.root.display());
    check_root(&config.root)?;

    let visits = Walker::new(config)?.collect_visits()?;
    let mut result = SnapshotResult::default();
    let mut dirs = Vec::new();
    for outcome in process_visits(visits, config) {
        match outcome {
            Outcome::Included(entry) => result.files.push(entry),
            Outcome::Failed(entry) => result.errors.push(entry),
            Outcome::Dir(relative) => dirs.push(relative),
            Outcome::Skipped => {}
        }
    }

    if config.include_structure {
        result.file_structure = Some(structure_of(&dirs, &result.files));
    }

    #[cfg(feature = "logging")]
    tracing::debug!(
        "Snapshot complete: {} files, {} errors",
        result.files.len(),
        result.errors.len()
    );
    Ok(result)
}

/// Renders just the tree of non-ignored directories and files under `config.root`.
///
/// Content is never read.
pub fn file_structure(config: &SnapshotConfig) -> Result<String, SnapshotError> {
    let config = SnapshotConfig {
        no_content: true,
        include_structure: true,
        ..config.clone()
    };
    let result = snapshot(&config)?;
    Ok(result.file_structure.unwrap_or_default())
}

fn structure_of(dirs: &[String], files: &[FileEntry]) -> String {
    build_tree(
        dirs.iter()
            .map(|d| (d.as_str(), true))
            .chain(files.iter().map(|f| (f.path.as_str(), false))),
    )
}
