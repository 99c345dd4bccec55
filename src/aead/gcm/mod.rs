//! Galois/Counter Mode (GCM) authenticated encryption
//!
//! GCM composes a counter-mode keystream with a GHASH polynomial
//! accumulator over the associated data and the ciphertext. Data blocks
//! use counter values 2, 3, ...; counter value 1 is reserved exclusively
//! for masking the tag and never touches data.
//!
//! ## Compute-only core
//!
//! The in-place operations return the authentication tag and never compare
//! it: [`Gcm::decrypt_in_place`] "succeeds" on forged input and hands the
//! tag back for the caller to check in constant time. Callers that skip
//! the comparison silently accept forged data. The buffer-returning
//! [`Gcm::decrypt`] wrapper forces the comparison and should be preferred.
//!
//! ## Nonce handling
//!
//! Only 96-bit nonces are supported, enforced at compile time through the
//! [`GcmNonceCompatible`] bound. Reuse of a (key, nonce) pair across two
//! messages is a caller-level invariant this type does not enforce.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;

use byteorder::{BigEndian, ByteOrder};
#[cfg(feature = "alloc")]
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::block::BlockCipher;
#[cfg(feature = "alloc")]
use crate::error::Error;
use crate::error::{validate, Result};
use crate::types::nonce::GcmNonceCompatible;
use crate::types::{Nonce, Tag};

pub mod ghash;
use ghash::GHash;

/// GCM nonce size in bytes (96 bits)
pub const GCM_NONCE_SIZE: usize = 12;
/// GCM block size in bytes
pub const GCM_BLOCK_SIZE: usize = 16;
/// GCM authentication tag size in bytes
pub const GCM_TAG_SIZE: usize = 16;

/// GCM mode wrapper around a block cipher
///
/// One instance is bound to a single (key, nonce) pair; perform exactly
/// one encrypt-or-decrypt per installed nonce.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Gcm<B: BlockCipher + Zeroize + ZeroizeOnDrop> {
    cipher: B,
    nonce: [u8; GCM_NONCE_SIZE],
}

impl<B: BlockCipher + Zeroize + ZeroizeOnDrop> Gcm<B> {
    /// Creates a new GCM mode instance with the given cipher and nonce
    pub fn new<const N: usize>(cipher: B, nonce: &Nonce<N>) -> Result<Self>
    where
        Nonce<N>: GcmNonceCompatible,
    {
        validate::length("GCM cipher block size", B::BLOCK_SIZE, GCM_BLOCK_SIZE)?;

        let mut nonce_bytes = [0u8; GCM_NONCE_SIZE];
        nonce_bytes.copy_from_slice(nonce.as_ref());

        Ok(Self {
            cipher,
            nonce: nonce_bytes,
        })
    }

    /// Encrypts a buffer in place, returning the authentication tag
    ///
    /// The tag covers the associated data and the ciphertext this call
    /// leaves in `buf`.
    pub fn encrypt_in_place(&self, buf: &mut [u8], aad: Option<&[u8]>) -> Result<Tag<GCM_TAG_SIZE>> {
        self.apply_keystream(buf)?;
        self.compute_tag(aad.unwrap_or(&[]), buf)
    }

    /// Decrypts a buffer in place, returning the authentication tag
    ///
    /// Compute-only: the returned tag is for the caller to compare against
    /// the expected one in constant time ([`crate::types::ConstantTimeEq::ct_eq`]).
    /// This method signals no verification failure of its own.
    pub fn decrypt_in_place(&self, buf: &mut [u8], aad: Option<&[u8]>) -> Result<Tag<GCM_TAG_SIZE>> {
        // GHASH is defined over ciphertext, so the tag must be computed
        // before the keystream touches the buffer
        let tag = self.compute_tag(aad.unwrap_or(&[]), buf)?;
        self.apply_keystream(buf)?;
        Ok(tag)
    }

    /// Encrypts a message, returning ciphertext with the tag appended
    #[cfg(feature = "alloc")]
    pub fn encrypt(&self, plaintext: &[u8], aad: Option<&[u8]>) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(plaintext.len() + GCM_TAG_SIZE);
        out.extend_from_slice(plaintext);

        let tag = self.encrypt_in_place(&mut out, aad)?;
        out.extend_from_slice(tag.as_ref());
        Ok(out)
    }

    /// Decrypts a ciphertext-with-trailing-tag message, verifying the tag
    ///
    /// Splits the trailing 16-byte tag, recomputes it over the ciphertext,
    /// and compares in constant time. Returns `Error::Authentication` and
    /// releases no plaintext on mismatch.
    #[cfg(feature = "alloc")]
    pub fn decrypt(&self, ciphertext: &[u8], aad: Option<&[u8]>) -> Result<Vec<u8>> {
        validate::min_length("GCM ciphertext", ciphertext.len(), GCM_TAG_SIZE)?;

        let (ct, expected_tag) = ciphertext.split_at(ciphertext.len() - GCM_TAG_SIZE);
        let mut out = ct.to_vec();
        let tag = self.decrypt_in_place(&mut out, aad)?;

        let tag_ok: bool = tag.as_ref().ct_eq(expected_tag).into();
        if !tag_ok {
            out.zeroize();
            return Err(Error::Authentication { algorithm: "GCM" });
        }
        Ok(out)
    }

    /// Encrypt the counter block (nonce || big-endian counter)
    fn keystream_block(&self, counter: u32) -> Result<[u8; GCM_BLOCK_SIZE]> {
        let mut block = [0u8; GCM_BLOCK_SIZE];
        block[..GCM_NONCE_SIZE].copy_from_slice(&self.nonce);
        BigEndian::write_u32(&mut block[GCM_NONCE_SIZE..], counter);

        self.cipher.encrypt_block(&mut block)?;
        Ok(block)
    }

    /// XOR the data keystream into the buffer
    ///
    /// Block i uses counter value i + 2 and is applied at offset 16*i; the
    /// final partial block consumes only as much keystream as remains.
    /// Blocks are independent of each other in this direction.
    fn apply_keystream(&self, buf: &mut [u8]) -> Result<()> {
        for (i, chunk) in buf.chunks_mut(GCM_BLOCK_SIZE).enumerate() {
            let mut keystream = self.keystream_block((i as u32).wrapping_add(2))?;
            for (byte, k) in chunk.iter_mut().zip(keystream.iter()) {
                *byte ^= *k;
            }
            keystream.zeroize();
        }
        Ok(())
    }

    /// GHASH over AAD and ciphertext, masked with the counter-1 keystream
    fn compute_tag(&self, aad: &[u8], ciphertext: &[u8]) -> Result<Tag<GCM_TAG_SIZE>> {
        // H is the encryption of the all-zero block
        let mut h = [0u8; GCM_BLOCK_SIZE];
        self.cipher.encrypt_block(&mut h)?;

        let mut ghash = GHash::new(&h);
        ghash.update_block(aad, aad.len())?;
        ghash.update_block(ciphertext, ciphertext.len())?;
        ghash.update_lengths(aad.len() as u64, ciphertext.len() as u64)?;
        let mut tag = ghash.finalize();

        // Counter value 1 is reserved for this mask and never used for data
        let mut mask = self.keystream_block(1)?;
        for i in 0..GCM_TAG_SIZE {
            tag[i] ^= mask[i];
        }

        mask.zeroize();
        h.zeroize();
        Ok(Tag::new(tag))
    }
}

#[cfg(test)]
mod tests;
