//! Parallel orchestration of hashing and comparison. A `threads <= 1`
//! request takes a sequential path that keeps behavior simple and
//! allocation-light for single-threaded callers; otherwise a
//! `rayon`-backed pool hashes and compares concurrently. Bounded pool
//! size follows `default_threads`: `min(32, available_parallelism)`.

use crate::core::comparator::{self, SimilarPair};
use crate::core::hasher::{decode::ImageDecoder, ImageHash, PerceptualHasher};
use crate::progress::{Phase, ProgressDetail, ProgressSink};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;

/// Suggested thread count when the caller does not choose one
/// explicitly.
pub fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
        .min(32)
}

/// Compute a hash for every path, reporting progress through `sink` if
/// present. Paths whose decode fails are simply absent from the
/// returned map. Runs sequentially when `threads <= 1`, otherwise uses a
/// bounded `rayon` pool.
pub fn hash_all<D: ImageDecoder>(
    paths: &[PathBuf],
    hasher: &PerceptualHasher<D>,
    threads: usize,
    sink: Option<&ProgressSink>,
) -> HashMap<PathBuf, ImageHash> {
    let total = paths.len();

    if threads <= 1 {
        let mut hashes = HashMap::with_capacity(total);
        for (i, path) in paths.iter().enumerate() {
            if let Some(sink) = sink {
                sink.report(Phase::Hash, i, total, ProgressDetail::path(path), None);
            }
            if let Some(hash) = hasher.hash_file(path) {
                hashes.insert(path.clone(), hash);
            }
        }
        return hashes;
    }

    let counter = std::sync::atomic::AtomicUsize::new(0);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .expect("thread pool with a positive thread count always builds");

    pool.install(|| {
        paths
            .par_iter()
            .filter_map(|path| {
                let hash = hasher.hash_file(path);
                if let Some(sink) = sink {
                    let i = counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                    sink.report(Phase::Hash, i, total, ProgressDetail::path(path), None);
                }
                hash.map(|h| (path.clone(), h))
            })
            .collect()
    })
}

/// Compare every candidate pair, reporting progress through `sink` if
/// present. Runs sequentially when `threads <= 1`, otherwise uses a
/// bounded `rayon` pool.
pub fn compare_all(
    candidates: &[(PathBuf, PathBuf)],
    hashes: &HashMap<PathBuf, ImageHash>,
    threshold: u32,
    threads: usize,
    sink: Option<&ProgressSink>,
) -> Vec<SimilarPair> {
    let total = candidates.len();

    if threads <= 1 {
        let mut result = Vec::new();
        for (i, (a, b)) in candidates.iter().enumerate() {
            let pair = hashes
                .get(a)
                .zip(hashes.get(b))
                .and_then(|(ha, hb)| comparator::compare_pair(a, ha, b, hb, threshold));
            if let Some(sink) = sink {
                let similarity = hashes
                    .get(a)
                    .zip(hashes.get(b))
                    .map(|(ha, hb)| comparator::similarity_score(ha, hb));
                sink.report(Phase::Compare, i, total, ProgressDetail::pair(a, b), similarity);
            }
            if let Some(pair) = pair {
                result.push(pair);
            }
        }
        return result;
    }

    let counter = std::sync::atomic::AtomicUsize::new(0);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .expect("thread pool with a positive thread count always builds");

    pool.install(|| {
        candidates
            .par_iter()
            .filter_map(|(a, b)| {
                let hash_pair = hashes.get(a).zip(hashes.get(b));
                if let Some(sink) = sink {
                    let similarity = hash_pair.map(|(ha, hb)| comparator::similarity_score(ha, hb));
                    let i = counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                    sink.report(Phase::Compare, i, total, ProgressDetail::pair(a, b), similarity);
                }
                hash_pair.and_then(|(ha, hb)| comparator::compare_pair(a, ha, b, hb, threshold))
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hasher::decode::ImageDecoder as _;
    use image::{DynamicImage, ImageBuffer, Rgb};
    use std::path::Path;

    struct SolidDecoder;
    impl ImageDecoder for SolidDecoder {
        fn decode(&self, path: &Path) -> Option<DynamicImage> {
            // Distinguish paths by a pixel value derived from the filename's
            // first byte so hashes differ across synthetic inputs.
            let seed = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.bytes().next())
                .unwrap_or(0);
            Some(DynamicImage::ImageRgb8(ImageBuffer::from_fn(32, 32, move |_, _| {
                Rgb([seed, seed, seed])
            })))
        }
    }

    #[test]
    fn sequential_and_parallel_hash_agree() {
        let paths: Vec<PathBuf> = (0..6).map(|i| PathBuf::from(format!("img{i}.png"))).collect();
        let hasher = PerceptualHasher::with_decoder(SolidDecoder);

        let sequential = hash_all(&paths, &hasher, 1, None);
        let parallel = hash_all(&paths, &hasher, 4, None);

        assert_eq!(sequential.len(), parallel.len());
        for path in &paths {
            assert_eq!(sequential.get(path), parallel.get(path));
        }
    }

    #[test]
    fn compare_all_reports_progress_for_every_candidate() {
        let mut hashes = HashMap::new();
        hashes.insert(PathBuf::from("a.jpg"), ImageHash::from_bytes(vec![0x00]));
        hashes.insert(PathBuf::from("b.jpg"), ImageHash::from_bytes(vec![0x01]));
        let candidates = vec![(PathBuf::from("a.jpg"), PathBuf::from("b.jpg"))];

        let seen = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let seen_clone = seen.clone();
        let sink = ProgressSink::new(move |_, _, _, _, _| {
            seen_clone.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        });

        let pairs = compare_all(&candidates, &hashes, 8, 1, Some(&sink));
        assert_eq!(pairs.len(), 1);
        assert_eq!(seen.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
