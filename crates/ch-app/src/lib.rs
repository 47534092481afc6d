//! Clipboard History application layer
//!
//! The [`HistoryEngine`] owns the history and serializes every mutation; use
//! cases wrap it together with the ports they need, and [`Activation`] is the
//! single surface a presentation layer talks to.

pub mod activation;
pub mod deps;
pub mod engine;
pub mod usecases;

pub use activation::Activation;
pub use deps::AppDeps;
pub use engine::HistoryEngine;
