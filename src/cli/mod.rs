//! Thin demonstration CLI for the similarity engine. Argument parsing,
//! progress rendering, and the `keep` confirmation prompt live here and
//! nowhere else; this binary only ever calls the public `core` API.

use simdupe::core::{self, KeepPolicy, ScanOptions};
use simdupe::progress::{Phase, ProgressDetail, ProgressSink};
use simdupe::Result;
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "simdupe")]
#[command(author, version, about = "Find near-duplicate images by perceptual hash", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan one directory and print clusters of similar images
    Scan {
        root: PathBuf,
        #[arg(short, long, default_value_t = 2)]
        level: u8,
        #[arg(short, long)]
        threshold: Option<u32>,
        /// Only scan the root directory's direct children
        #[arg(long)]
        no_recursive: bool,
        #[arg(long)]
        fast: bool,
        /// Print the files that would be deleted under a keep policy
        #[arg(long, value_enum)]
        keep: Option<KeepArg>,
    },
    /// Compare two directories and print the cross-root similar pairs
    CompareDirs {
        dir1: PathBuf,
        dir2: PathBuf,
        #[arg(short, long, default_value_t = 2)]
        level: u8,
        #[arg(short, long)]
        threshold: Option<u32>,
        /// Only scan each directory's direct children
        #[arg(long)]
        no_recursive: bool,
    },
    /// Compare exactly two image files
    Compare { path1: PathBuf, path2: PathBuf },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum KeepArg {
    Newer,
    Older,
}

impl From<KeepArg> for KeepPolicy {
    fn from(arg: KeepArg) -> Self {
        match arg {
            KeepArg::Newer => KeepPolicy::Newer,
            KeepArg::Older => KeepPolicy::Older,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Scan {
            root,
            level,
            threshold,
            no_recursive,
            fast,
            keep,
        } => run_scan(root, level, threshold, !no_recursive, fast, keep),
        Commands::CompareDirs {
            dir1,
            dir2,
            level,
            threshold,
            no_recursive,
        } => run_compare_dirs(dir1, dir2, level, threshold, !no_recursive),
        Commands::Compare { path1, path2 } => {
            run_compare(path1, path2);
            Ok(())
        }
    }
}

fn progress_bar_sink(len: u64) -> (ProgressBar, ProgressSink) {
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("█▓░"),
    );
    let bar_clone = bar.clone();
    let sink = ProgressSink::new(move |phase, current, total, detail, _similarity| {
        bar_clone.set_length(total as u64);
        bar_clone.set_position(current as u64);
        let label = match (phase, &detail) {
            (Phase::Hash, ProgressDetail::Path(p)) => {
                p.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default()
            }
            (Phase::Compare, _) => "comparing".to_string(),
            _ => String::new(),
        };
        bar_clone.set_message(label);
    });
    (bar, sink)
}

fn run_scan(
    root: PathBuf,
    level: u8,
    threshold: Option<u32>,
    recursive: bool,
    fast: bool,
    keep: Option<KeepArg>,
) -> Result<()> {
    info!(?root, level, recursive, fast, "starting scan");
    let (bar, sink) = progress_bar_sink(0);

    let options = ScanOptions {
        level,
        threshold,
        recursive,
        fast_same_folder_only: fast,
        ..ScanOptions::new()
    };
    let pairs = core::find_similar_pairs_with_scores(&root, &options, Some(&sink))?;
    bar.finish_and_clear();

    let groups = core::pairs_to_groups(&pairs);
    println!(
        "{}",
        style(format!("{} similar pairs in {} clusters", pairs.len(), groups.len())).bold()
    );
    for (i, group) in groups.iter().enumerate() {
        println!("{}", style(format!("Group {}:", i + 1)).bold().cyan());
        for path in group {
            println!("  {}", path.display());
        }
    }

    if let Some(keep) = keep {
        let to_delete = core::get_files_to_delete_from_groups(&groups, keep.into());
        println!();
        println!("{}", style("Delete candidates (nothing is deleted):").yellow());
        for path in &to_delete {
            println!("  {}", path.display());
        }
    }

    Ok(())
}

fn run_compare_dirs(
    dir1: PathBuf,
    dir2: PathBuf,
    level: u8,
    threshold: Option<u32>,
    recursive: bool,
) -> Result<()> {
    let (bar, sink) = progress_bar_sink(0);
    let pairs = core::compare_dirs(&dir1, &dir2, level, threshold, recursive, Some(&sink))?;
    bar.finish_and_clear();

    println!("{}", style(format!("{} cross-directory matches", pairs.len())).bold());
    for (a, b, similarity) in &pairs {
        println!("  {} <-> {}  ({:.4})", a.display(), b.display(), similarity);
    }
    Ok(())
}

fn run_compare(path1: PathBuf, path2: PathBuf) {
    match core::compare_two_images(&path1, &path2) {
        Some((similarity, distance)) => {
            println!(
                "similarity = {:.4}, hamming distance = {}",
                similarity, distance
            );
        }
        None => {
            println!("{}", style("could not decode one or both images").red());
        }
    }
}
