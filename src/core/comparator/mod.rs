//! Hamming-distance comparison and similarity scoring. Grouping itself
//! is a plain set of paths, built by [`super::grouper`] from the flat
//! pair list this module produces.

use crate::core::hasher::ImageHash;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A pair of images found within the similarity threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarPair {
    pub photo_a: PathBuf,
    pub photo_b: PathBuf,
    pub distance: u32,
    pub similarity: f64,
    /// `true` when `distance == 0` — identical hashes are always
    /// flagged as duplicates regardless of threshold.
    pub is_duplicate: bool,
}

/// Similarity score in `[0, 1]` for a hash pair: `max(0, 1 - d/bits)`.
pub fn similarity_score(a: &ImageHash, b: &ImageHash) -> f64 {
    a.similarity(b)
}

/// Compare one candidate pair of hashes against a threshold, producing a
/// [`SimilarPair`] iff the pair is within threshold or identical.
pub fn compare_pair(
    path_a: &Path,
    hash_a: &ImageHash,
    path_b: &Path,
    hash_b: &ImageHash,
    threshold: u32,
) -> Option<SimilarPair> {
    let distance = hash_a.distance(hash_b);
    if distance > threshold && distance != 0 {
        return None;
    }
    Some(SimilarPair {
        photo_a: path_a.to_path_buf(),
        photo_b: path_b.to_path_buf(),
        distance,
        similarity: hash_a.similarity(hash_b),
        is_duplicate: distance == 0,
    })
}

/// Compare every candidate pair against `threshold`, keeping the ones
/// that pass. `hashes` maps a path to its precomputed hash; candidates
/// whose hash is missing (a prior decode failure) are silently skipped.
pub fn compare_candidates(
    candidates: &[(PathBuf, PathBuf)],
    hashes: &std::collections::HashMap<PathBuf, ImageHash>,
    threshold: u32,
) -> Vec<SimilarPair> {
    candidates
        .iter()
        .filter_map(|(a, b)| {
            let hash_a = hashes.get(a)?;
            let hash_b = hashes.get(b)?;
            compare_pair(a, hash_a, b, hash_b, threshold)
        })
        .collect()
}
