//! # simdupe
//!
//! A perceptual near-duplicate image similarity engine: pHash-based
//! hashing, locality-aware candidate pruning, Hamming-distance
//! comparison, and union-find clustering across one directory, two
//! directories, or a pair of explicit files.
//!
//! ## Architecture
//! - `core` - The similarity pipeline engine (hashing, candidates, comparison, grouping)
//! - `progress` - The progress-sink callback contract
//! - `error` - The invalid-argument error taxonomy
//! - `cli` - A thin demonstration command-line binary

pub mod core;
pub mod error;
pub mod progress;

pub use core::{
    compare_dirs, compare_two_images, default_threads, find_similar_groups,
    find_similar_pairs_with_scores, get_files_to_delete_from_groups, pairs_to_groups,
    similarity_score, ImageHash, KeepPolicy, ScanOptions, SimilarPair,
};
pub use error::{Result, SimilarityError};
