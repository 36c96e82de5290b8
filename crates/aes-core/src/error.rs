//! Error type shared by the cipher, mode and padding layers.

use thiserror::Error;

/// Errors reported by AES-128 construction, CBC processing and padding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The key is not exactly 16 bytes.
    #[error("invalid AES-128 key length: expected 16 bytes, got {got}")]
    InvalidKeyLength {
        /// Length of the rejected key.
        got: usize,
    },

    /// The initialization vector is not exactly 16 bytes.
    #[error("invalid IV length: expected 16 bytes, got {got}")]
    InvalidIvLength {
        /// Length of the rejected IV.
        got: usize,
    },

    /// The input is empty or not a multiple of the 16-byte block size.
    #[error("invalid input length: {got} is not a positive multiple of 16 bytes")]
    InvalidBlockLength {
        /// Length of the rejected input.
        got: usize,
    },

    /// The trailing pad bytes of the decrypted message are inconsistent.
    #[error("invalid padding")]
    InvalidPadding,

    /// XOR operands of differing length.
    #[error("length mismatch: {lhs} bytes vs {rhs} bytes")]
    LengthMismatch {
        /// Length of the left operand.
        lhs: usize,
        /// Length of the right operand.
        rhs: usize,
    },
}

/// Result alias used across the crate.
pub type Result<T> = core::result::Result<T, Error>;
