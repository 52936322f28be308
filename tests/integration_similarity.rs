//! End-to-end tests against the public API.

use image::{DynamicImage, ImageBuffer, Rgb};
use simdupe::{KeepPolicy, ScanOptions};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_solid(dir: &Path, name: &str, r: u8, g: u8, b: u8) -> PathBuf {
    let path = dir.join(name);
    let img = DynamicImage::ImageRgb8(ImageBuffer::from_fn(64, 64, move |_, _| Rgb([r, g, b])));
    img.save(&path).unwrap();
    path
}

fn write_checkerboard(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let img = DynamicImage::ImageRgb8(ImageBuffer::from_fn(64, 64, |x, y| {
        if (x / 8 + y / 8) % 2 == 0 {
            Rgb([255, 255, 255])
        } else {
            Rgb([0, 0, 0])
        }
    }));
    img.save(&path).unwrap();
    path
}

#[test]
fn reflexivity_compare_two_images_with_itself() {
    let dir = TempDir::new().unwrap();
    let a = write_checkerboard(dir.path(), "a.png");

    let (similarity, distance) = simdupe::compare_two_images(&a, &a).unwrap();
    assert_eq!(similarity, 1.0);
    assert_eq!(distance, 0);
}

#[test]
fn identical_images_cluster_together() {
    let dir = TempDir::new().unwrap();
    write_solid(dir.path(), "a.png", 100, 120, 140);
    write_solid(dir.path(), "b.png", 100, 120, 140);
    write_checkerboard(dir.path(), "different.png");

    let groups = simdupe::find_similar_groups(dir.path(), 1, None, true).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
}

#[test]
fn cluster_closure_every_pair_shares_a_group() {
    let dir = TempDir::new().unwrap();
    write_solid(dir.path(), "a.png", 1, 2, 3);
    write_solid(dir.path(), "b.png", 1, 2, 3);
    write_solid(dir.path(), "c.png", 1, 2, 3);

    let options = ScanOptions {
        threshold: Some(256),
        ..ScanOptions::new()
    };
    let pairs = simdupe::find_similar_pairs_with_scores(dir.path(), &options, None).unwrap();
    let groups = simdupe::pairs_to_groups(&pairs);

    assert_eq!(groups.len(), 1);
    for (a, b, _) in &pairs {
        assert!(groups[0].contains(a));
        assert!(groups[0].contains(b));
    }
    for group in &groups {
        assert!(group.len() >= 2);
    }
}

#[test]
fn threshold_monotonicity() {
    let dir = TempDir::new().unwrap();
    write_solid(dir.path(), "a.png", 10, 10, 10);
    write_checkerboard(dir.path(), "b.png");

    let tight = simdupe::find_similar_pairs_with_scores(
        dir.path(),
        &ScanOptions {
            threshold: Some(1),
            ..ScanOptions::new()
        },
        None,
    )
    .unwrap();
    let loose = simdupe::find_similar_pairs_with_scores(
        dir.path(),
        &ScanOptions {
            threshold: Some(200),
            ..ScanOptions::new()
        },
        None,
    )
    .unwrap();

    assert!(tight.len() <= loose.len());
}

#[test]
fn level_mapping_is_nested() {
    let dir = TempDir::new().unwrap();
    for i in 0..6 {
        write_solid(dir.path(), &format!("img{i}.png"), (i * 40) as u8, 10, 200);
    }

    let level1 = simdupe::find_similar_groups(dir.path(), 1, None, true).unwrap();
    let level2 = simdupe::find_similar_groups(dir.path(), 2, None, true).unwrap();
    let level3 = simdupe::find_similar_groups(dir.path(), 3, None, true).unwrap();

    let count = |groups: &[Vec<PathBuf>]| -> usize { groups.iter().map(|g| g.len()).sum() };
    assert!(count(&level1) <= count(&level2));
    assert!(count(&level2) <= count(&level3));
}

#[test]
fn determinism_across_thread_counts() {
    let dir = TempDir::new().unwrap();
    for i in 0..8 {
        write_solid(dir.path(), &format!("img{i}.png"), (i * 30) as u8, 50, 90);
    }

    let single = simdupe::find_similar_pairs_with_scores(
        dir.path(),
        &ScanOptions {
            num_threads: Some(1),
            ..ScanOptions::new()
        },
        None,
    )
    .unwrap();
    let multi = simdupe::find_similar_pairs_with_scores(
        dir.path(),
        &ScanOptions {
            num_threads: Some(4),
            ..ScanOptions::new()
        },
        None,
    )
    .unwrap();

    let mut single_set: Vec<_> = single.into_iter().map(|(a, b, s)| (a, b, (s * 1e6) as i64)).collect();
    let mut multi_set: Vec<_> = multi.into_iter().map(|(a, b, s)| (a, b, (s * 1e6) as i64)).collect();
    single_set.sort();
    multi_set.sort();
    assert_eq!(single_set, multi_set);
}

#[test]
fn fast_mode_is_subset_of_full_scan() {
    let dir = TempDir::new().unwrap();
    let sub_a = dir.path().join("a");
    let sub_b = dir.path().join("b");
    std::fs::create_dir_all(&sub_a).unwrap();
    std::fs::create_dir_all(&sub_b).unwrap();
    write_solid(&sub_a, "1.png", 77, 88, 99);
    write_solid(&sub_b, "2.png", 77, 88, 99);

    let full = simdupe::find_similar_pairs_with_scores(
        dir.path(),
        &ScanOptions {
            threshold: Some(256),
            ..ScanOptions::new()
        },
        None,
    )
    .unwrap();
    let fast = simdupe::find_similar_pairs_with_scores(
        dir.path(),
        &ScanOptions {
            threshold: Some(256),
            fast_same_folder_only: true,
            time_window_seconds: Some(i64::MAX),
            ..ScanOptions::new()
        },
        None,
    )
    .unwrap();

    for pair in &fast {
        assert!(full.contains(pair));
    }
}

#[test]
fn keep_newer_policy_keeps_the_latest_member() {
    let dir = TempDir::new().unwrap();
    write_solid(dir.path(), "a.png", 5, 5, 5);
    write_solid(dir.path(), "b.png", 5, 5, 5);

    let groups = simdupe::find_similar_groups(dir.path(), 1, None, true).unwrap();
    assert_eq!(groups.len(), 1);

    let to_delete = simdupe::get_files_to_delete_from_groups(&groups, KeepPolicy::Newer);
    // Neither file has EXIF data, so deletion still reduces the cluster to one survivor.
    assert_eq!(to_delete.len(), groups[0].len() - 1);
}

#[test]
fn compare_dirs_excludes_intra_root_pairs() {
    let dir1 = TempDir::new().unwrap();
    let dir2 = TempDir::new().unwrap();
    write_solid(dir1.path(), "x.png", 3, 3, 3);
    write_solid(dir1.path(), "y.png", 3, 3, 3);
    write_solid(dir2.path(), "z.png", 3, 3, 3);

    let pairs = simdupe::compare_dirs(dir1.path(), dir2.path(), 1, None, true, None).unwrap();
    assert_eq!(pairs.len(), 2);
    for (a, b, _) in &pairs {
        assert!(a.starts_with(dir1.path()) && b.starts_with(dir2.path()));
    }
}

#[test]
fn unrelated_scan_roots_error_before_hashing() {
    let result = simdupe::find_similar_groups(Path::new("/definitely/not/a/real/path"), 2, None, true);
    assert!(result.is_err());
}
