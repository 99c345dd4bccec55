//! Block cipher modes of operation
//!
//! Non-authenticated modes live here; the authenticated GCM construction
//! is in [`crate::aead`].

pub mod cbc;

// Re-exports
pub use cbc::Cbc;
