//! PKCS#7 padding for 16-byte blocks.

use crate::bytes::BLOCK_SIZE;
use crate::error::{Error, Result};

/// Padding scheme applied around CBC processing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Padding {
    /// PKCS#7: append `p` copies of the byte `p`, `1 <= p <= 16`.
    /// Removal is strict and rejects any inconsistent tail.
    #[default]
    Pkcs7,
    /// No padding; inputs must already be block-aligned.
    None,
}

/// Returns `data` followed by 1..=16 bytes of PKCS#7 padding.
pub fn pad(data: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_SIZE - data.len() % BLOCK_SIZE;
    let mut out = Vec::with_capacity(data.len() + pad_len);
    out.extend_from_slice(data);
    out.resize(data.len() + pad_len, pad_len as u8);
    out
}

/// Strips PKCS#7 padding, returning the message without its pad bytes.
///
/// The last byte is read as the pad length `p`. It must lie in `1..=16`, must
/// not exceed the buffer, and the last `p` bytes must all equal `p`; otherwise
/// [`Error::InvalidPadding`] is returned.
pub fn unpad(data: &[u8]) -> Result<&[u8]> {
    let &last = data.last().ok_or(Error::InvalidPadding)?;
    let pad_len = last as usize;
    if pad_len == 0 || pad_len > BLOCK_SIZE || pad_len > data.len() {
        return Err(Error::InvalidPadding);
    }
    let (message, tail) = data.split_at(data.len() - pad_len);
    if tail.iter().any(|&b| b != last) {
        return Err(Error::InvalidPadding);
    }
    Ok(message)
}
