mod normalizer;

pub use normalizer::ContentNormalizer;
