//! Block and word types plus the byte-level primitives the cipher is built from.

use crate::error::{Error, Result};
use crate::tables::LookupTable;

/// AES block of 16 bytes.
pub type Block = [u8; 16];

/// Key-schedule word of 4 bytes.
pub type Word = [u8; 4];

/// Size of an AES block in bytes.
pub const BLOCK_SIZE: usize = 16;

/// XORs two equal-length buffers into a new vector.
pub fn xor(lhs: &[u8], rhs: &[u8]) -> Result<Vec<u8>> {
    let mut out = lhs.to_vec();
    xor_in_place(&mut out, rhs)?;
    Ok(out)
}

/// XORs `rhs` into `dst`, failing if the lengths differ.
pub fn xor_in_place(dst: &mut [u8], rhs: &[u8]) -> Result<()> {
    if dst.len() != rhs.len() {
        return Err(Error::LengthMismatch {
            lhs: dst.len(),
            rhs: rhs.len(),
        });
    }
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
    Ok(())
}

/// XORs two fixed-size arrays; equal lengths are guaranteed by the type.
#[inline]
pub fn xor_array<const N: usize>(dst: &mut [u8; N], rhs: &[u8; N]) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

/// Rotates `buf` left by `n` bytes, wrapping around.
#[inline]
pub fn rotate_left(buf: &mut [u8], n: usize) {
    if buf.is_empty() {
        return;
    }
    let n = n % buf.len();
    buf.rotate_left(n);
}

/// Replaces every byte of `buf` with its entry in `table`.
#[inline]
pub fn substitute(buf: &mut [u8], table: &LookupTable) {
    for byte in buf.iter_mut() {
        *byte = table.get(*byte);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{INV_SBOX, SBOX};

    #[test]
    fn xor_rejects_mismatched_lengths() {
        assert_eq!(
            xor(&[1, 2, 3], &[1, 2]),
            Err(Error::LengthMismatch { lhs: 3, rhs: 2 })
        );
        let mut dst = [0u8; 16];
        assert_eq!(
            xor_in_place(&mut dst, &[0u8; 17]),
            Err(Error::LengthMismatch { lhs: 16, rhs: 17 })
        );
    }

    #[test]
    fn xor_combines_bytes() {
        let out = xor(&[0xff, 0x0f, 0x00], &[0x0f, 0x0f, 0xaa]).unwrap();
        assert_eq!(out, vec![0xf0, 0x00, 0xaa]);
    }

    #[test]
    fn xor_array_is_self_inverse() {
        let original: Block = core::array::from_fn(|i| i as u8 * 7);
        let mask: Block = core::array::from_fn(|i| 0xa5 ^ i as u8);
        let mut value = original;
        xor_array(&mut value, &mask);
        assert_ne!(value, original);
        xor_array(&mut value, &mask);
        assert_eq!(value, original);
    }

    #[test]
    fn rotate_wraps_around() {
        let mut word: Word = [0x09, 0xcf, 0x4f, 0x3c];
        rotate_left(&mut word, 1);
        assert_eq!(word, [0xcf, 0x4f, 0x3c, 0x09]);
        rotate_left(&mut word, 7);
        assert_eq!(word, [0x09, 0xcf, 0x4f, 0x3c]);

        let mut empty: [u8; 0] = [];
        rotate_left(&mut empty, 3);
    }

    #[test]
    fn substitute_preserves_length_and_inverts() {
        let mut buf = [0x00, 0x53, 0xff, 0x10, 0x20];
        substitute(&mut buf, &SBOX);
        assert_eq!(buf.len(), 5);
        assert_eq!(buf[..3], [0x63, 0xed, 0x16]);
        substitute(&mut buf, &INV_SBOX);
        assert_eq!(buf, [0x00, 0x53, 0xff, 0x10, 0x20]);
    }
}
