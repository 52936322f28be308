//! Public operations.
//!
//! This is the crate's stable surface: every other `core` module is an
//! implementation detail wired together here.

use super::candidates;
use super::collector;
use super::comparator::{self, SimilarPair};
use super::exif::{DefaultExifReader, ExifReader};
use super::grouper;
use super::hasher::decode::DefaultImageDecoder;
use super::hasher::{ImageHash, PerceptualHasher};
use super::level::{self, KeepPolicy};
use super::representative;
use super::scheduler;
use crate::error::{Result, SimilarityError};
use crate::progress::ProgressSink;
use std::path::{Path, PathBuf};

fn validate_level(level: u8, threshold: Option<u32>) -> Result<()> {
    if threshold.is_none() && !(1..=3).contains(&level) {
        return Err(SimilarityError::InvalidLevel { level });
    }
    Ok(())
}

fn validate_threshold(threshold: Option<u32>) -> Result<()> {
    if let Some(value) = threshold {
        if value > level::HASH_BITS {
            return Err(SimilarityError::InvalidThreshold { value });
        }
    }
    Ok(())
}

fn validate_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SimilarityError::DirectoryNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(SimilarityError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Parameters controlling a single-directory similarity scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub level: u8,
    pub threshold: Option<u32>,
    pub recursive: bool,
    pub fast_same_folder_only: bool,
    pub time_window_seconds: Option<i64>,
    pub exif_time_window_seconds: Option<i64>,
    pub num_threads: Option<usize>,
}

impl ScanOptions {
    pub fn new() -> Self {
        Self {
            level: level::DEFAULT_LEVEL,
            recursive: true,
            ..Default::default()
        }
    }
}

/// Scan `root` for similar pairs.
pub fn find_similar_pairs_with_scores(
    root: &Path,
    options: &ScanOptions,
    progress: Option<&ProgressSink>,
) -> Result<Vec<(PathBuf, PathBuf, f64)>> {
    validate_level(options.level, options.threshold)?;
    validate_threshold(options.threshold)?;
    validate_directory(root)?;

    let threshold = level::resolve_threshold(options.level, options.threshold);
    let threads = options.num_threads.unwrap_or_else(scheduler::default_threads);
    let paths = collector::collect_images(root, options.recursive);
    if paths.len() < 2 {
        return Ok(Vec::new());
    }

    let hasher = PerceptualHasher::<DefaultImageDecoder>::new();
    let hashes = scheduler::hash_all(&paths, &hasher, threads, progress);

    let exif_reader = DefaultExifReader;
    let candidate_pairs = if options.fast_same_folder_only && options.recursive {
        build_fast_same_folder_candidates(&paths, options, &exif_reader)
    } else {
        let mut pairs = candidates::full_pairs(&paths);
        if let Some(window) = options.time_window_seconds {
            pairs = candidates::filter_by_filename_time(pairs, window);
        }
        pairs
    };

    let similar = scheduler::compare_all(&candidate_pairs, &hashes, threshold, threads, progress);
    Ok(similar
        .into_iter()
        .map(|pair| (pair.photo_a, pair.photo_b, round4(pair.similarity)))
        .collect())
}

fn build_fast_same_folder_candidates(
    paths: &[PathBuf],
    options: &ScanOptions,
    exif_reader: &dyn ExifReader,
) -> Vec<(PathBuf, PathBuf)> {
    let use_exif_window = options.exif_time_window_seconds.is_some_and(|w| w > 0);
    let groups = candidates::group_by_parent(paths);

    if use_exif_window {
        let window = options.exif_time_window_seconds.unwrap();
        groups
            .into_iter()
            .flat_map(|(_, group)| candidates::exif_windowed_pairs(&group, exif_reader, window))
            .collect()
    } else {
        // Default window when fast mode is on and the caller didn't set one.
        let window = options.time_window_seconds.unwrap_or(1);
        let mut pairs: Vec<(PathBuf, PathBuf)> = groups
            .into_iter()
            .flat_map(|(_, group)| candidates::full_pairs(&group))
            .collect();
        pairs = candidates::filter_by_filename_time(pairs, window);
        pairs
    }
}

/// Compare two directories pairwise: cartesian product only, no
/// intra-root pairs.
pub fn compare_dirs(
    dir1: &Path,
    dir2: &Path,
    level_value: u8,
    threshold: Option<u32>,
    recursive: bool,
    progress: Option<&ProgressSink>,
) -> Result<Vec<(PathBuf, PathBuf, f64)>> {
    validate_level(level_value, threshold)?;
    validate_threshold(threshold)?;
    validate_directory(dir1)?;
    validate_directory(dir2)?;

    let ham = level::resolve_threshold(level_value, threshold);
    let threads = scheduler::default_threads();

    let paths1 = collector::collect_images(dir1, recursive);
    let paths2 = collector::collect_images(dir2, recursive);
    if paths1.is_empty() || paths2.is_empty() {
        return Ok(Vec::new());
    }

    let hasher = PerceptualHasher::<DefaultImageDecoder>::new();
    let mut all_paths = paths1.clone();
    all_paths.extend(paths2.iter().cloned());
    let hashes = scheduler::hash_all(&all_paths, &hasher, threads, progress);

    let candidate_pairs = candidates::cartesian_pairs(&paths1, &paths2);
    let similar = scheduler::compare_all(&candidate_pairs, &hashes, ham, threads, progress);

    Ok(similar
        .into_iter()
        .map(|pair| (pair.photo_a, pair.photo_b, round4(pair.similarity)))
        .collect())
}

/// Compare exactly two images. Returns `None` if either fails to decode.
pub fn compare_two_images(path1: &Path, path2: &Path) -> Option<(f64, u32)> {
    let decoder = DefaultImageDecoder;
    let hasher = PerceptualHasher::with_decoder(decoder);
    let hash1 = hasher.hash_file(path1)?;
    let hash2 = hasher.hash_file(path2)?;
    let distance = hash1.distance(&hash2);
    Some((round4(hash1.similarity(&hash2)), distance))
}

/// Scan `root` and group similar images into clusters.
pub fn find_similar_groups(
    root: &Path,
    level_value: u8,
    threshold: Option<u32>,
    recursive: bool,
) -> Result<Vec<Vec<PathBuf>>> {
    let options = ScanOptions {
        level: level_value,
        threshold,
        recursive,
        ..ScanOptions::new()
    };
    let pairs = find_similar_pairs_with_scores(root, &options, None)?;
    Ok(pairs_to_groups(&pairs))
}

/// Merge a pair list into clusters.
pub fn pairs_to_groups(pairs: &[(PathBuf, PathBuf, f64)]) -> Vec<Vec<PathBuf>> {
    let edges: Vec<(PathBuf, PathBuf)> = pairs.iter().map(|(a, b, _)| (a.clone(), b.clone())).collect();
    grouper::pairs_to_groups(&edges)
}

/// Decide deletion candidates for every cluster under a keep-policy.
pub fn get_files_to_delete_from_groups(groups: &[Vec<PathBuf>], keep: KeepPolicy) -> Vec<PathBuf> {
    representative::files_to_delete(groups, keep, &DefaultExifReader)
}

/// Similarity score for a hash pair.
pub fn similarity_score(h1: &ImageHash, h2: &ImageHash) -> f64 {
    comparator::similarity_score(h1, h2)
}

/// Suggested thread count.
pub fn default_threads() -> usize {
    scheduler::default_threads()
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
