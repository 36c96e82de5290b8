//! Table-driven AES-128 with CBC mode.
//!
//! This crate follows the FIPS-197 specification and provides:
//! - Compiled-in S-box and GF(2^8) multiplication tables.
//! - Key schedule for AES-128.
//! - Single-block encryption and decryption.
//! - CBC chaining with strict PKCS#7 padding removal.
//!
//! Every byte substitution and field multiplication is a table lookup, so the
//! implementation is not constant-time; it should not be treated as
//! side-channel hardened.
//!
//! ```
//! use aes_core::Aes128Cbc;
//!
//! let cbc = Aes128Cbc::new(&[0x2b; 16], &[0u8; 16]).unwrap();
//! let ct = cbc.encrypt(b"attack at dawn").unwrap();
//! assert_eq!(cbc.decrypt(&ct).unwrap(), b"attack at dawn");
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod bytes;
mod cbc;
mod cipher;
mod error;
mod key;
pub mod padding;
pub mod round;
mod schedule;
pub mod tables;

pub use crate::bytes::{
    rotate_left, substitute, xor, xor_array, xor_in_place, Block, Word, BLOCK_SIZE,
};
pub use crate::cbc::{Aes128Cbc, CbcConfig};
pub use crate::cipher::{decrypt_block, encrypt_block, Aes128};
pub use crate::error::{Error, Result};
pub use crate::key::{Aes128Key, RoundKeys};
pub use crate::padding::Padding;
pub use crate::schedule::{expand_key, expand_key_with};
pub use crate::tables::{LookupTable, Tables};
