//! Adapters layered on top of the future-based API.

pub mod callback;

pub use callback::*;
