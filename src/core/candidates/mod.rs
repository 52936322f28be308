//! Before any hash is compared, the pipeline decides *which* pairs are
//! worth comparing at all. These enumerators are independent and
//! composable; the scheduler picks between them based on the caller's
//! flags.

use crate::core::exif::ExifReader;
use crate::core::filename_time;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// All `n*(n-1)/2` pairs within a single flat list.
pub fn full_pairs(paths: &[PathBuf]) -> Vec<(PathBuf, PathBuf)> {
    let mut pairs = Vec::with_capacity(paths.len().saturating_sub(1) * paths.len() / 2);
    for i in 0..paths.len() {
        for j in (i + 1)..paths.len() {
            pairs.push((paths[i].clone(), paths[j].clone()));
        }
    }
    pairs
}

/// The cartesian product of two directory listings (used by
/// [`crate::core::api::compare_dirs`]).
pub fn cartesian_pairs(paths_a: &[PathBuf], paths_b: &[PathBuf]) -> Vec<(PathBuf, PathBuf)> {
    let mut pairs = Vec::with_capacity(paths_a.len() * paths_b.len());
    for a in paths_a {
        for b in paths_b {
            pairs.push((a.clone(), b.clone()));
        }
    }
    pairs
}

/// Partition a path list by parent directory, preserving each bucket's
/// relative order.
pub fn group_by_parent(paths: &[PathBuf]) -> Vec<(PathBuf, Vec<PathBuf>)> {
    let mut by_dir: HashMap<PathBuf, Vec<PathBuf>> = HashMap::new();
    for path in paths {
        let parent = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
        by_dir.entry(parent).or_default().push(path.clone());
    }
    let mut dirs: Vec<_> = by_dir.into_iter().collect();
    dirs.sort_by(|a, b| a.0.cmp(&b.0));
    dirs
}

/// Same-folder full pairs: `full_pairs` applied independently within
/// each parent-directory bucket. No cross-folder pairs are emitted.
pub fn same_folder_pairs(paths: &[PathBuf]) -> Vec<(PathBuf, PathBuf)> {
    group_by_parent(paths)
        .into_iter()
        .flat_map(|(_, group)| full_pairs(&group))
        .collect()
}

/// Keep only pairs whose filename-derived timestamps are within
/// `window_seconds` of each other. A pair where either timestamp is
/// unparseable is always kept — this heuristic never drops a pair it
/// cannot place in time.
pub fn filter_by_filename_time(
    pairs: Vec<(PathBuf, PathBuf)>,
    window_seconds: i64,
) -> Vec<(PathBuf, PathBuf)> {
    pairs
        .into_iter()
        .filter(|(a, b)| {
            let ta = filename_time::parse_from_path(a);
            let tb = filename_time::parse_from_path(b);
            match (ta, tb) {
                (Some(ta), Some(tb)) => (ta - tb).num_seconds().abs() <= window_seconds,
                _ => true,
            }
        })
        .collect()
}

fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Two file sizes are "close" when neither is zero (unknown) and they
/// differ by at most 5% of the smaller one.
fn sizes_close(a: u64, b: u64) -> bool {
    if a == 0 || b == 0 {
        return true;
    }
    let smaller = a.min(b) as f64;
    let diff = (a as f64 - b as f64).abs();
    diff <= smaller * 0.05
}

/// EXIF-time sliding-window candidate generation for a single folder
/// group: images with EXIF time are sorted oldest-first and only
/// compared within a sliding time window, with a no-EXIF tail compared
/// pairwise among itself. Every candidate pair must additionally pass
/// the 5%-size-tolerance filter.
pub fn exif_windowed_pairs(
    group: &[PathBuf],
    exif_reader: &dyn ExifReader,
    window_seconds: i64,
) -> Vec<(PathBuf, PathBuf)> {
    if window_seconds <= 0 || group.len() < 2 {
        return Vec::new();
    }

    let times: HashMap<PathBuf, Option<NaiveDateTime>> = group
        .iter()
        .map(|p| (p.clone(), exif_reader.read_time(p)))
        .collect();
    let sizes: HashMap<PathBuf, u64> = group.iter().map(|p| (p.clone(), file_size(p))).collect();

    let mut sorted: Vec<PathBuf> = group.to_vec();
    sorted.sort_by(|a, b| {
        let ta = times[a];
        let tb = times[b];
        match (ta, tb) {
            (Some(ta), Some(tb)) => ta.cmp(&tb).then_with(|| a.cmp(b)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    });

    let exif_prefix: Vec<&PathBuf> = sorted.iter().filter(|p| times[*p].is_some()).collect();
    let no_exif_suffix: Vec<&PathBuf> = sorted.iter().filter(|p| times[*p].is_none()).collect();

    let mut pairs = Vec::new();
    for i in 0..exif_prefix.len() {
        let t_i = times[exif_prefix[i]].unwrap();
        for j in (i + 1)..exif_prefix.len() {
            let t_j = times[exif_prefix[j]].unwrap();
            if (t_j - t_i).num_seconds() > window_seconds {
                break;
            }
            if sizes_close(sizes[exif_prefix[i]], sizes[exif_prefix[j]]) {
                pairs.push((exif_prefix[i].clone(), exif_prefix[j].clone()));
            }
        }
    }
    for i in 0..no_exif_suffix.len() {
        for j in (i + 1)..no_exif_suffix.len() {
            if sizes_close(sizes[no_exif_suffix[i]], sizes[no_exif_suffix[j]]) {
                pairs.push((no_exif_suffix[i].clone(), no_exif_suffix[j].clone()));
            }
        }
    }
    pairs
}
