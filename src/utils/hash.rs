//! Content hashing with FxHash.
//!
//! Deterministic across runs, which is all asset fingerprints need.

use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Compute 64-bit hash from byte data.
#[inline]
pub fn compute<T: AsRef<[u8]> + ?Sized>(data: &T) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(data.as_ref());
    hasher.finish()
}

/// 8-char hex fingerprint for cache-busting filenames (`scrollspy.a1b2c3d4.js`).
#[inline]
pub fn fingerprint<T: AsRef<[u8]> + ?Sized>(value: &T) -> String {
    format!("{:016x}", compute(value))[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_stable_and_short() {
        let a = fingerprint("console.log(1)");
        assert_eq!(a.len(), 8);
        assert_eq!(a, fingerprint("console.log(1)"));
        assert_ne!(a, fingerprint("console.log(2)"));
    }
}
