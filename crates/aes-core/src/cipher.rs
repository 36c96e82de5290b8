//! AES-128 block encryption and decryption.

use crate::bytes::Block;
use crate::key::{Aes128Key, RoundKeys};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::schedule::expand_key_with;
use crate::tables::Tables;

/// AES-128 block cipher: expanded round keys bound to a table set.
///
/// Both parts are immutable after construction, so a value can be shared
/// across threads and used for any number of blocks.
#[derive(Clone, Copy, Debug)]
pub struct Aes128 {
    round_keys: RoundKeys,
    tables: &'static Tables,
}

impl Aes128 {
    /// Expands `key` against the standard tables.
    pub fn new(key: &Aes128Key) -> Self {
        Self::with_tables(key, Tables::standard())
    }

    /// Expands `key` against an explicit table set.
    pub fn with_tables(key: &Aes128Key, tables: &'static Tables) -> Self {
        Self {
            round_keys: expand_key_with(key, tables),
            tables,
        }
    }

    /// Returns the expanded round keys.
    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }

    /// Encrypts a single block.
    pub fn encrypt_block(&self, block: &Block) -> Block {
        encrypt_with(block, &self.round_keys, self.tables)
    }

    /// Decrypts a single block.
    pub fn decrypt_block(&self, block: &Block) -> Block {
        decrypt_with(block, &self.round_keys, self.tables)
    }
}

fn encrypt_with(block: &Block, round_keys: &RoundKeys, tables: &Tables) -> Block {
    let mut state = *block;

    add_round_key(&mut state, round_keys.get(0));

    for round in 1..10 {
        sub_bytes(&mut state, tables);
        shift_rows(&mut state);
        mix_columns(&mut state, tables);
        add_round_key(&mut state, round_keys.get(round));
    }

    sub_bytes(&mut state, tables);
    shift_rows(&mut state);
    add_round_key(&mut state, round_keys.get(10));

    state
}

fn decrypt_with(block: &Block, round_keys: &RoundKeys, tables: &Tables) -> Block {
    let mut state = *block;

    add_round_key(&mut state, round_keys.get(10));
    for round in (1..10).rev() {
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state, tables);
        add_round_key(&mut state, round_keys.get(round));
        inv_mix_columns(&mut state, tables);
    }
    inv_shift_rows(&mut state);
    inv_sub_bytes(&mut state, tables);
    add_round_key(&mut state, round_keys.get(0));

    state
}

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    encrypt_with(block, round_keys, Tables::standard())
}

/// Decrypts a single 16-byte block with pre-expanded round keys.
pub fn decrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    decrypt_with(block, round_keys, Tables::standard())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Aes128Key;
    use crate::schedule::expand_key;
    use rand::RngCore;

    const NIST_KEY: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];
    const NIST_PLAIN: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];
    const NIST_CIPHER: [u8; 16] = [
        0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5,
        0x5a,
    ];

    #[test]
    fn encrypt_matches_nist_vector() {
        let key = Aes128Key::from(NIST_KEY);
        let round_keys = expand_key(&key);
        let ct = encrypt_block(&NIST_PLAIN, &round_keys);
        assert_eq!(ct, NIST_CIPHER);
    }

    #[test]
    fn decrypt_matches_nist_vector() {
        let key = Aes128Key::from(NIST_KEY);
        let round_keys = expand_key(&key);
        let pt = decrypt_block(&NIST_CIPHER, &round_keys);
        assert_eq!(pt, NIST_PLAIN);
    }

    #[test]
    fn handle_matches_free_functions() {
        let key = Aes128Key::from(NIST_KEY);
        let aes = Aes128::new(&key);
        assert_eq!(aes.round_keys(), &expand_key(&key));
        assert_eq!(aes.decrypt_block(&NIST_CIPHER), NIST_PLAIN);
        assert_eq!(aes.encrypt_block(&NIST_PLAIN), NIST_CIPHER);
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let mut key_bytes = [0u8; 16];
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut key_bytes);
            rng.fill_bytes(&mut block);
            let aes = Aes128::new(&Aes128Key::from(key_bytes));
            let ct = aes.encrypt_block(&block);
            let pt = aes.decrypt_block(&ct);
            assert_eq!(pt, block);
        }
    }
}
