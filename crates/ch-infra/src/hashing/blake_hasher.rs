use anyhow::Result;
use ch_core::{ports::ContentHashPort, ContentHash, HashAlgorithm};

/// Fingerprints canonical image bytes with BLAKE3.
pub struct Blake3Hasher;

impl ContentHashPort for Blake3Hasher {
    fn hash_bytes(&self, bytes: &[u8]) -> Result<ContentHash> {
        let hash = blake3::hash(bytes);
        Ok(ContentHash {
            alg: HashAlgorithm::Blake3V1,
            bytes: hash.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_bytes_same_hash() {
        let hasher = Blake3Hasher;
        let a = hasher.hash_bytes(b"pixels").unwrap();
        let b = hasher.hash_bytes(b"pixels").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, hasher.hash_bytes(b"pixels!").unwrap());
    }

    #[test]
    fn wraps_the_blake3_digest() {
        let hash = Blake3Hasher.hash_bytes(b"abc").unwrap();
        assert_eq!(hash, ContentHash::blake3(*blake3::hash(b"abc").as_bytes()));
        assert_eq!(hash.alg, HashAlgorithm::Blake3V1);
    }
}
