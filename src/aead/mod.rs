//! Authenticated encryption with associated data
//!
//! This module implements the Galois/Counter Mode (GCM) construction over
//! any [`crate::block::BlockCipher`] with a 128-bit block.

pub mod gcm;

// Re-exports
pub use gcm::Gcm;
