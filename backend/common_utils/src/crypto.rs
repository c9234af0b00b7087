//! Utilities for cryptographic algorithms

/// Trait for generating a digest for SHA
pub trait GenerateDigest {
    /// takes a message and creates a digest for it
    fn generate_digest(&self, message: &[u8]) -> Vec<u8>;

    /// same as [`GenerateDigest::generate_digest`], hex encoded in lowercase
    fn generate_hex_digest(&self, message: &[u8]) -> String {
        hex::encode(self.generate_digest(message))
    }
}

/// Secure Hash Algorithm 256
#[derive(Debug)]
pub struct Sha256;

impl GenerateDigest for Sha256 {
    fn generate_digest(&self, message: &[u8]) -> Vec<u8> {
        ring::digest::digest(&ring::digest::SHA256, message)
            .as_ref()
            .to_vec()
    }
}

/// Compares two byte slices without short-circuiting on the first mismatch.
/// Only the lengths leak through timing.
#[inline]
pub fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    ring::constant_time::verify_slices_are_equal(left, right).is_ok()
}
