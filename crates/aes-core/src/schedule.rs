//! AES-128 key expansion.

use crate::bytes::{rotate_left, substitute, xor_array, Block, Word};
use crate::key::{Aes128Key, RoundKeys};
use crate::tables::{LookupTable, Tables};

/// High bytes of the round constants; the remaining three bytes are zero.
const RCON: [u8; 10] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36];

fn words(block: &Block) -> [Word; 4] {
    core::array::from_fn(|i| [block[4 * i], block[4 * i + 1], block[4 * i + 2], block[4 * i + 3]])
}

fn join(words: &[Word; 4]) -> Block {
    let mut block = [0u8; 16];
    for (chunk, word) in block.chunks_exact_mut(4).zip(words.iter()) {
        chunk.copy_from_slice(word);
    }
    block
}

fn next_round_key(prev: &Block, rcon: u8, sbox: &LookupTable) -> Block {
    let [mut w0, mut w1, mut w2, mut w3] = words(prev);

    let mut t = w3;
    rotate_left(&mut t, 1);
    substitute(&mut t, sbox);
    t[0] ^= rcon;

    xor_array(&mut w0, &t);
    xor_array(&mut w1, &w0);
    xor_array(&mut w2, &w1);
    xor_array(&mut w3, &w2);

    join(&[w0, w1, w2, w3])
}

/// Expands a 128-bit key into 11 round keys using the standard S-box.
pub fn expand_key(key: &Aes128Key) -> RoundKeys {
    expand_key_with(key, Tables::standard())
}

/// Expands a 128-bit key with an explicit table set.
pub fn expand_key_with(key: &Aes128Key, tables: &Tables) -> RoundKeys {
    let mut round_keys = [[0u8; 16]; 11];
    round_keys[0] = key.0;
    for (i, rcon) in RCON.iter().enumerate() {
        round_keys[i + 1] = next_round_key(&round_keys[i], *rcon, tables.sbox);
    }
    RoundKeys(round_keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(hex: &str) -> Block {
        let mut out = [0u8; 16];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[2 * i..2 * i + 2], 16).unwrap();
        }
        out
    }

    #[test]
    fn fips_197_appendix_a1_expansion() {
        let key = Aes128Key::from(block("2b7e151628aed2a6abf7158809cf4f3c"));
        let rks = expand_key(&key);
        assert_eq!(*rks.get(0), key.0);
        assert_eq!(*rks.get(1), block("a0fafe1788542cb123a339392a6c7605"));
        assert_eq!(*rks.get(2), block("f2c295f27a96b9435935807a7359f67f"));
        assert_eq!(*rks.get(10), block("d014f9a8c9ee2589e13f0cc8b6630ca6"));
    }

    #[test]
    fn expansion_is_deterministic() {
        let key = Aes128Key::from([0x5a; 16]);
        assert_eq!(expand_key(&key), expand_key(&key));
        assert_ne!(expand_key(&key), expand_key(&Aes128Key::from([0x5b; 16])));
    }

    #[test]
    fn zero_key_first_round() {
        let rks = expand_key(&Aes128Key::from([0u8; 16]));
        assert_eq!(*rks.get(1), block("62636363626363636263636362636363"));
    }
}
