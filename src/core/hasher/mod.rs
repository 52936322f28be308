//! # Hasher Module
//!
//! Computes the fixed-bit perceptual hash the rest of the pipeline
//! compares. Wraps the `image_hasher` crate's `HashAlg::DoubleGradient`
//! at a configurable side length (default 16 -> 256 bits).

pub mod decode;

use decode::ImageDecoder;
use image_hasher::{HashAlg, HasherConfig};
use std::path::Path;

/// A fixed-length perceptual hash. Default side length 16 -> 256 bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHash {
    bytes: Vec<u8>,
}

impl ImageHash {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Total number of bits in this hash.
    pub fn bit_count(&self) -> u32 {
        (self.bytes.len() * 8) as u32
    }

    /// Hamming distance to another hash: the number of differing bits.
    pub fn distance(&self, other: &Self) -> u32 {
        self.bytes
            .iter()
            .zip(other.bytes.iter())
            .map(|(a, b)| (a ^ b).count_ones())
            .sum()
    }

    /// Similarity in `[0, 1]`; `1.0` iff the hashes are identical:
    /// `max(0, 1 - d/bits)`.
    pub fn similarity(&self, other: &Self) -> f64 {
        let bits = self.bit_count();
        if bits == 0 {
            return 1.0;
        }
        let d = self.distance(other);
        (1.0 - (d as f64 / bits as f64)).max(0.0)
    }
}

/// Computes perceptual hashes for images, using an injected
/// [`ImageDecoder`] so callers can substitute a fake for tests.
pub struct PerceptualHasher<D: ImageDecoder> {
    decoder: D,
    hasher: image_hasher::Hasher,
}

impl PerceptualHasher<decode::DefaultImageDecoder> {
    /// Build a hasher with the production decoder at the default
    /// side length (16 -> 256 bits).
    pub fn new() -> Self {
        Self::with_decoder(decode::DefaultImageDecoder)
    }
}

impl Default for PerceptualHasher<decode::DefaultImageDecoder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: ImageDecoder> PerceptualHasher<D> {
    /// Build a hasher with a custom side length and decoder.
    pub fn with_decoder_and_side(decoder: D, side: u32) -> Self {
        let hasher = HasherConfig::new()
            .hash_size(side, side)
            .hash_alg(HashAlg::DoubleGradient)
            .to_hasher();
        Self { decoder, hasher }
    }

    /// Build a hasher at the default side length (16) with a custom
    /// decoder (used by tests to inject fakes).
    pub fn with_decoder(decoder: D) -> Self {
        Self::with_decoder_and_side(decoder, super::level::HASH_SIDE)
    }

    /// Decode and hash a file. Returns `None` on any decode failure —
    /// never panics, never propagates an error.
    pub fn hash_file(&self, path: &Path) -> Option<ImageHash> {
        let image = self.decoder.decode(path)?;
        let hash = self.hasher.hash_image(&image);
        Some(ImageHash::from_bytes(hash.as_bytes().to_vec()))
    }
}
