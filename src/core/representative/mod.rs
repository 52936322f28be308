//! Keep-policy representative selection: within each cluster, sort by
//! `(has_exif, exif_time, path)` so that images without EXIF sort as the
//! oldest, then keep either the newest or the oldest member per
//! [`KeepPolicy`] and mark the rest for deletion.

use super::level::KeepPolicy;
use crate::core::exif::ExifReader;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

fn sort_key(path: &Path, exif_reader: &dyn ExifReader) -> (bool, NaiveDateTime, PathBuf) {
    match exif_reader.read_time(path) {
        Some(t) => (true, t, path.to_path_buf()),
        None => (false, NaiveDateTime::MIN, path.to_path_buf()),
    }
}

/// For each cluster, decide which path to keep and return every other
/// member as a deletion candidate. The core never deletes a file
/// itself — this only classifies.
pub fn files_to_delete(
    groups: &[Vec<PathBuf>],
    keep: KeepPolicy,
    exif_reader: &dyn ExifReader,
) -> Vec<PathBuf> {
    let mut to_delete = Vec::new();
    for group in groups {
        if group.len() < 2 {
            continue;
        }
        let mut sorted: Vec<&PathBuf> = group.iter().collect();
        sorted.sort_by_key(|p| sort_key(p, exif_reader));

        let keep_path = match keep {
            KeepPolicy::Newer => sorted.last().copied(),
            KeepPolicy::Older => sorted.first().copied(),
        };
        if let Some(keep_path) = keep_path {
            to_delete.extend(group.iter().filter(|p| *p != keep_path).cloned());
        }
    }
    to_delete
}
