//! Symmetric block-cipher engine with CBC and GCM modes of operation
//!
//! This crate implements a 128-bit block cipher (AES-128 per FIPS 197)
//! together with two chaining constructions: CBC and GCM, the latter an
//! authenticated-encryption mode built on GF(2^128) arithmetic. The modes
//! are generic over any implementer of the [`BlockCipher`] trait, so other
//! 128-bit block ciphers can be substituted without touching mode logic.
//!
//! # Security Notes
//!
//! - Key material is wrapped in zeroizing containers and wiped on drop.
//! - The in-place GCM operations are *compute-only*: `decrypt_in_place`
//!   returns the authentication tag and never compares it. Callers that
//!   skip the comparison silently accept forged data; use [`aead::Gcm::decrypt`]
//!   to get the comparison forced in constant time.
//! - Reusing a (key, nonce) pair for GCM across two messages destroys the
//!   mode's security guarantees. This crate does not and cannot enforce
//!   nonce uniqueness.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Type system
pub mod types;
pub use types::{
    ConstantTimeEq, FixedSize, Nonce, RandomGeneration, SecretBuffer, SecretBytes,
    SecureZeroingType, Tag,
};

// Block cipher and non-authenticated modes
pub mod block;
pub use block::{Aes128, BlockCipher, Cbc};

// AEAD cipher implementations
pub mod aead;
pub use aead::Gcm;
