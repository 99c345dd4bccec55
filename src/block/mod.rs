//! Block cipher engine and non-authenticated modes of operation

use rand::{CryptoRng, RngCore};

use crate::error::Result;

/// A block cipher with a fixed block and key size
///
/// The modes in this crate ([`Cbc`], [`crate::aead::Gcm`]) are generic over
/// any implementer with a 16-byte block, so other 128-bit block ciphers can
/// be substituted for AES without changing mode logic.
///
/// Implementations must be deterministic and free of side effects beyond
/// the block buffer: the key schedule is derived once at construction and
/// never mutated afterward.
pub trait BlockCipher: Sized {
    /// The key type installed at construction
    type Key;

    /// Key size in bytes
    const KEY_SIZE: usize;

    /// Block size in bytes
    const BLOCK_SIZE: usize;

    /// Create a cipher instance, expanding the key schedule
    fn new(key: &Self::Key) -> Self;

    /// Encrypt a single block in place
    ///
    /// Returns `Error::Length` if `block` is not exactly `BLOCK_SIZE` bytes.
    fn encrypt_block(&self, block: &mut [u8]) -> Result<()>;

    /// Decrypt a single block in place
    ///
    /// Returns `Error::Length` if `block` is not exactly `BLOCK_SIZE` bytes.
    fn decrypt_block(&self, block: &mut [u8]) -> Result<()>;

    /// Generate a random key for this cipher
    fn generate_key<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Key;

    /// Human-readable algorithm name
    fn name() -> &'static str;

    /// Block size accessor for generic code
    fn block_size() -> usize {
        Self::BLOCK_SIZE
    }

    /// Key size accessor for generic code
    fn key_size() -> usize {
        Self::KEY_SIZE
    }
}

// Block cipher implementations
pub mod aes;
pub use aes::Aes128;

// Modes of operation
pub mod modes;
pub use modes::Cbc;
