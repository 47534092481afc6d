use anyhow::Result;

use crate::clipboard::ContentHash;

pub trait ContentHashPort: Send + Sync {
    fn hash_bytes(&self, bytes: &[u8]) -> Result<ContentHash>;
}
