//! Command-line interface for dirsnap.
//!
//! Walks a directory and writes a JSON snapshot of its files to disk.

use clap::Parser;
use dirsnap::{
    BinaryDetection, DEFAULT_MAX_SIZE, DEFAULT_OUTPUT, SnapshotBuilder, SnapshotConfig,
    file_structure, output, snapshot,
};
use std::path::PathBuf;
use std::process::exit;
use std::time::Instant;

/// dirsnap — directory snapshot for later analysis
#[derive(Parser)]
#[command(name = "dirsnap", version, about, long_about = None)]
struct Cli {
    /// Input directory
    #[arg(short, long, default_value = ".")]
    input: PathBuf,

    /// Output JSON file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Additional glob patterns to exclude (merged with the built-in defaults)
    #[arg(long = "ignore", value_name = "PATTERN", num_args = 1..)]
    ignore_patterns: Vec<String>,

    /// Do not apply the built-in ignore patterns
    #[arg(long)]
    no_default_ignores: bool,

    /// Maximum file size, in bytes, for content to be included
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_SIZE)]
    max_size: u64,

    /// Exclude file contents from the snapshot
    #[arg(long)]
    no_content: bool,

    /// Binary detection strategy
    #[arg(long, default_value = "simple", value_parser = parse_binary_detection)]
    binary_detection: BinaryDetection,

    /// Also honour .gitignore files
    #[arg(long)]
    gitignore: bool,

    /// Follow symlinks
    #[arg(long)]
    follow_links: bool,

    /// Add a file_structure tree to the snapshot
    #[arg(long)]
    structure: bool,

    /// Print only the file structure and exit
    #[arg(long, conflicts_with = "structure")]
    structure_only: bool,

    /// Write single-line JSON instead of indented
    #[arg(long)]
    compact: bool,

    /// Log debug events to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Parse string into BinaryDetection enum.
fn parse_binary_detection(s: &str) -> Result<BinaryDetection, String> {
    match s {
        "simple" => Ok(BinaryDetection::Simple),
        "accurate" => Ok(BinaryDetection::Accurate),
        "none" => Ok(BinaryDetection::None),
        _ => Err(format!("invalid binary detection method: {}", s)),
    }
}

impl Cli {
    fn into_config(self) -> SnapshotConfig {
        SnapshotBuilder::new(self.input)
            .output(self.output)
            .ignore_patterns(self.ignore_patterns)
            .use_default_ignores(!self.no_default_ignores)
            .max_size(self.max_size)
            .no_content(self.no_content)
            .binary_detection(self.binary_detection)
            .respect_gitignore(self.gitignore)
            .follow_links(self.follow_links)
            .include_structure(self.structure)
            .build()
    }
}

#[cfg(feature = "logging")]
fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    #[cfg(feature = "logging")]
    init_logging(cli.verbose);
    #[cfg(not(feature = "logging"))]
    let _ = cli.verbose;
    let structure_only = cli.structure_only;
    let pretty = !cli.compact;
    let config = cli.into_config();

    if structure_only {
        run_structure_only(&config);
        return;
    }

    run_normal(&config, pretty);
}

fn run_structure_only(config: &SnapshotConfig) {
    match file_structure(config) {
        Ok(tree) => println!("{}", tree),
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}

fn run_normal(config: &SnapshotConfig, pretty: bool) {
    let started = Instant::now();
    let result = match snapshot(config) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };
    if let Err(e) = output::write_snapshot(&result, &config.output, pretty) {
        eprintln!("Error: {}", e);
        exit(1);
    }

    println!(
        "Snapshot generated in {:.2} seconds.",
        started.elapsed().as_secs_f64()
    );
    println!("Total files processed: {}", result.files.len());
    if !result.errors.is_empty() {
        println!("Errors encountered: {}", result.errors.len());
    }
    println!("Output written to: {}", config.output.display());

    if let Some(tree) = &result.file_structure {
        println!("\nFile Structure:");
        println!("{}", tree);
    }
}
