//! Type-safe wrappers for cryptographic values
//!
//! This module provides domain-specific types with compile-time and runtime
//! guarantees for cipher operations, designed to be ergonomic while
//! preventing common mistakes such as passing a CBC-sized IV to GCM.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

// Submodules
pub mod key;
pub mod nonce;
pub mod tag;

// Sealed trait module (not public)
pub(crate) mod sealed;

// Re-export main types
pub use key::{SecretBuffer, SecretBytes};
pub use nonce::Nonce;
pub use tag::Tag;

use rand::{CryptoRng, RngCore};

/// Trait for cryptographic types with constant-time equality
pub trait ConstantTimeEq {
    /// Compare two values in constant time
    fn ct_eq(&self, other: &Self) -> bool;
}

/// Trait for cryptographic types that can be randomly generated
pub trait RandomGeneration: Sized {
    /// Generate a random instance using the provided RNG
    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> crate::error::Result<Self>;
}

/// Trait for types that have a fixed size
pub trait FixedSize {
    /// Get the size in bytes
    fn size() -> usize;
}

/// Trait for types that can be securely zeroed and cloned
pub trait SecureZeroingType: zeroize::Zeroize + Clone {
    /// Create a zeroed instance
    fn zeroed() -> Self;

    /// Create a clone that preserves zeroization guarantees
    fn secure_clone(&self) -> Self {
        self.clone()
    }
}

/// Trait for types that can be serialized to a byte representation
#[cfg(feature = "alloc")]
pub trait ByteSerializable: Sized {
    /// Convert to a byte vector
    fn to_bytes(&self) -> Vec<u8>;

    /// Try to create from a byte slice
    fn from_bytes(bytes: &[u8]) -> crate::error::Result<Self>;
}

// Re-export mode compatibility traits from submodules
pub use nonce::{CbcCompatible, GcmNonceCompatible};
pub use tag::GcmCompatible;
