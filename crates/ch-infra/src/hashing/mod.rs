mod blake_hasher;

pub use blake_hasher::Blake3Hasher;
