//! GHASH: the GF(2^128) polynomial accumulator used by GCM
//!
//! GHASH evaluates a polynomial in the hash subkey `H` over the 16-byte
//! blocks of the associated data, the ciphertext, and a final bit-length
//! block: each step XORs a block into the accumulator and multiplies the
//! result by `H` in GF(2^128), reduced modulo x^128 + x^7 + x^2 + x + 1.
//!
//! The field multiply below is the reference bit-serial form: 128
//! conditional XORs and shifts per multiply. It deliberately assumes no
//! hardware carryless-multiply instruction.

use byteorder::{BigEndian, ByteOrder};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{validate, Result};

/// GHASH block size in bytes
pub const GHASH_BLOCK_SIZE: usize = 16;

/// Incremental GHASH accumulator
///
/// Fold AAD blocks first, then ciphertext blocks, then the lengths; the
/// fold is a strict sequential dependency chain and block order must be
/// preserved.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct GHash {
    h: [u8; GHASH_BLOCK_SIZE],
    y: [u8; GHASH_BLOCK_SIZE],
}

impl GHash {
    /// Create a new accumulator from the hash subkey `H`
    ///
    /// In GCM, `H` is the encryption of the all-zero block under the data
    /// key.
    pub fn new(h: &[u8; GHASH_BLOCK_SIZE]) -> Self {
        Self {
            h: *h,
            y: [0u8; GHASH_BLOCK_SIZE],
        }
    }

    /// Fold `data[..len]` into the accumulator in 16-byte blocks
    ///
    /// The final partial block, if any, is zero-padded. Calling this twice
    /// (AAD, then ciphertext) continues the same accumulator, which is
    /// exactly the GCM tag layout.
    pub fn update_block(&mut self, data: &[u8], len: usize) -> Result<()> {
        validate::parameter(len <= data.len(), "len", "exceeds data length")?;

        for chunk in data[..len].chunks(GHASH_BLOCK_SIZE) {
            let mut block = [0u8; GHASH_BLOCK_SIZE];
            block[..chunk.len()].copy_from_slice(chunk);
            self.absorb(&block);
        }
        Ok(())
    }

    /// Fold the closing length block: AAD bit-length in the first 8 bytes,
    /// ciphertext bit-length in the last 8, both big-endian
    ///
    /// Lengths are byte counts; the conversion to bits happens here.
    pub fn update_lengths(&mut self, aad_len: u64, ct_len: u64) -> Result<()> {
        let mut block = [0u8; GHASH_BLOCK_SIZE];
        BigEndian::write_u64(&mut block[..8], aad_len.wrapping_mul(8));
        BigEndian::write_u64(&mut block[8..], ct_len.wrapping_mul(8));
        self.absorb(&block);
        Ok(())
    }

    /// Consume the accumulator and return the unmasked hash value
    pub fn finalize(self) -> [u8; GHASH_BLOCK_SIZE] {
        self.y
    }

    /// XOR-then-multiply step shared by data and length folding
    fn absorb(&mut self, block: &[u8; GHASH_BLOCK_SIZE]) {
        for i in 0..GHASH_BLOCK_SIZE {
            self.y[i] ^= block[i];
        }
        self.y = Self::gf_multiply(&self.y, &self.h);
    }

    /// Multiply two elements of GF(2^128)
    ///
    /// Walks the 128 bits of `y` from most to least significant, XORing a
    /// running copy of `x` into the accumulator wherever the bit is set and
    /// doubling the copy after every bit.
    pub fn gf_multiply(
        x: &[u8; GHASH_BLOCK_SIZE],
        y: &[u8; GHASH_BLOCK_SIZE],
    ) -> [u8; GHASH_BLOCK_SIZE] {
        let mut acc = [0u8; GHASH_BLOCK_SIZE];
        let mut v = *x;

        for byte in y.iter() {
            let mut bit = 0x80u8;
            while bit != 0 {
                if byte & bit != 0 {
                    for k in 0..GHASH_BLOCK_SIZE {
                        acc[k] ^= v[k];
                    }
                }
                v = Self::gf_double(&v);
                bit >>= 1;
            }
        }

        v.zeroize();
        acc
    }

    /// Double a field element (multiply by x)
    ///
    /// GCM's bit order is reflected within each byte, so multiplying by x
    /// is a bytewise shift toward byte 15; a coefficient carried out of
    /// x^127 is reduced by XORing 0xe1 (the reduction polynomial
    /// x^128 + x^7 + x^2 + x + 1) into byte 0 after the shift.
    fn gf_double(p: &[u8; GHASH_BLOCK_SIZE]) -> [u8; GHASH_BLOCK_SIZE] {
        let carry = p[GHASH_BLOCK_SIZE - 1] & 1;

        let mut out = [0u8; GHASH_BLOCK_SIZE];
        out[0] = p[0] >> 1;
        for i in 1..GHASH_BLOCK_SIZE {
            out[i] = (p[i] >> 1) | ((p[i - 1] & 1) << 7);
        }

        if carry == 1 {
            out[0] ^= 0xe1;
        }
        out
    }
}

/// One-shot GHASH over associated data and ciphertext
pub fn process_ghash(
    h: &[u8; GHASH_BLOCK_SIZE],
    aad: &[u8],
    ciphertext: &[u8],
) -> Result<[u8; GHASH_BLOCK_SIZE]> {
    let mut ghash = GHash::new(h);
    ghash.update_block(aad, aad.len())?;
    ghash.update_block(ciphertext, ciphertext.len())?;
    ghash.update_lengths(aad.len() as u64, ciphertext.len() as u64)?;
    Ok(ghash.finalize())
}
