//! Utility functions.

pub mod link;

pub use link::extract_id_with_fallback;
