//! Cipher Block Chaining (CBC) mode implementation
//!
//! CBC mode provides confidentiality by XORing each plaintext block with
//! the previous ciphertext block before encryption; the first block is
//! XORed with a full-block initialization vector. Encryption is strictly
//! sequential. Decryption captures each original ciphertext block before
//! overwriting it, because the chaining XOR needs ciphertext, not the
//! recovered plaintext.
//!
//! CBC performs no integrity check: a wrong key or IV silently produces
//! garbage plaintext rather than an error. Padding to a whole number of
//! blocks (e.g. PKCS#7) is the caller's responsibility and must happen
//! before encryption.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::super::BlockCipher;
use crate::error::{validate, Result};
use crate::types::nonce::CbcCompatible;
use crate::types::Nonce;

/// CBC block size in bytes; the modes in this crate are fixed to
/// 128-bit-block ciphers
const CBC_BLOCK_SIZE: usize = 16;

/// CBC mode wrapper around a block cipher
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Cbc<B: BlockCipher + Zeroize + ZeroizeOnDrop> {
    cipher: B,
    iv: [u8; CBC_BLOCK_SIZE],
}

impl<B: BlockCipher + Zeroize + ZeroizeOnDrop> Cbc<B> {
    /// Creates a new CBC mode instance with the given cipher and IV
    ///
    /// The IV must be a full cipher block; the `CbcCompatible` bound
    /// enforces this at compile time for 16-byte nonces.
    pub fn new<const N: usize>(cipher: B, iv: &Nonce<N>) -> Result<Self>
    where
        Nonce<N>: CbcCompatible,
    {
        validate::length("CBC cipher block size", B::BLOCK_SIZE, CBC_BLOCK_SIZE)?;
        validate::length("CBC initialization vector", N, B::BLOCK_SIZE)?;

        let mut iv_bytes = [0u8; CBC_BLOCK_SIZE];
        iv_bytes.copy_from_slice(iv.as_ref());

        Ok(Self {
            cipher,
            iv: iv_bytes,
        })
    }

    /// Encrypts a buffer in place using CBC mode
    ///
    /// The buffer length must be a multiple of the block size; apply
    /// padding before calling. Each block depends on the previous block's
    /// ciphertext, so this direction cannot be parallelized.
    pub fn encrypt_in_place(&self, buf: &mut [u8]) -> Result<()> {
        validate::block_multiple("CBC plaintext", buf.len(), CBC_BLOCK_SIZE)?;

        let mut chain = self.iv;
        for block in buf.chunks_exact_mut(CBC_BLOCK_SIZE) {
            // XOR with previous ciphertext block (or IV for the first block)
            for i in 0..CBC_BLOCK_SIZE {
                block[i] ^= chain[i];
            }

            self.cipher.encrypt_block(block)?;
            chain.copy_from_slice(block);
        }

        Ok(())
    }

    /// Decrypts a buffer in place using CBC mode
    ///
    /// The buffer length must be a multiple of the block size. Blocks are
    /// independent here; only the capture of the original ciphertext block
    /// before it is overwritten orders the work.
    pub fn decrypt_in_place(&self, buf: &mut [u8]) -> Result<()> {
        validate::block_multiple("CBC ciphertext", buf.len(), CBC_BLOCK_SIZE)?;

        let mut chain = self.iv;
        for block in buf.chunks_exact_mut(CBC_BLOCK_SIZE) {
            // Save current ciphertext block before it is overwritten
            let mut saved = [0u8; CBC_BLOCK_SIZE];
            saved.copy_from_slice(block);

            self.cipher.decrypt_block(block)?;

            // XOR with previous ciphertext block (or IV for the first block)
            for i in 0..CBC_BLOCK_SIZE {
                block[i] ^= chain[i];
            }

            chain = saved;
        }

        Ok(())
    }

    /// Encrypts a message, returning a freshly allocated ciphertext
    #[cfg(feature = "alloc")]
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut out = plaintext.to_vec();
        self.encrypt_in_place(&mut out)?;
        Ok(out)
    }

    /// Decrypts a message, returning a freshly allocated plaintext
    #[cfg(feature = "alloc")]
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let mut out = ciphertext.to_vec();
        self.decrypt_in_place(&mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests;
