//! # Core Module
//!
//! The similarity pipeline engine: scan, hash, enumerate candidate
//! pairs, compare, schedule across threads, group, and select
//! representatives.
//!
//! ## Modules
//! - `collector` - Discovers image files in directories
//! - `filename_time` - Parses capture time out of filenames
//! - `hasher` - Computes perceptual hashes
//! - `exif` - Reads EXIF capture time
//! - `candidates` - Enumerates candidate pairs to compare
//! - `comparator` - Hamming distance / similarity scoring
//! - `scheduler` - Parallel orchestration of hashing and comparison
//! - `grouper` - Union-find clustering of similar pairs
//! - `representative` - Keep/delete selection within a cluster
//! - `level` - Level-to-threshold policy
//! - `api` - The public operations

pub mod api;
pub mod candidates;
pub mod collector;
pub mod comparator;
pub mod exif;
pub mod filename_time;
pub mod grouper;
pub mod hasher;
pub mod level;
pub mod representative;
pub mod scheduler;

pub use api::{
    compare_dirs, compare_two_images, default_threads, find_similar_groups,
    find_similar_pairs_with_scores, get_files_to_delete_from_groups, pairs_to_groups,
    similarity_score, ScanOptions,
};
pub use comparator::SimilarPair;
pub use hasher::ImageHash;
pub use level::KeepPolicy;
