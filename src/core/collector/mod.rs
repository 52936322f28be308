//! Walks a root path and returns the ordered sequence of regular files
//! whose extension belongs to the closed image-extension set.
//! Unreadable subdirectories are skipped silently; there is nothing to
//! report there.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Image extensions recognized by the collector, compared
/// case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "bmp", "gif", "tiff", "tif", "webp", "heic", "raw",
];

fn is_image_extension(ext: &str) -> bool {
    let lower = ext.to_lowercase();
    IMAGE_EXTENSIONS.contains(&lower.as_str())
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(is_image_extension)
        .unwrap_or(false)
}

/// Collect image file paths under `root`.
///
/// - `recursive = true` walks the whole subtree; `false` lists only the
///   root directory's direct children.
/// - Symlinks are followed (once; `walkdir` does not re-descend into a
///   symlink loop because it tracks visited directories by device+inode).
/// - Unreadable subdirectories are skipped silently.
/// - The result is sorted lexicographically by full path so comparison
///   order is reproducible across runs.
pub fn collect_images(root: &Path, recursive: bool) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = if recursive {
        WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| has_image_extension(path))
            .collect()
    } else {
        WalkDir::new(root)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| has_image_extension(path))
            .collect()
    };

    paths.sort();
    paths
}
