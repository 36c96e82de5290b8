//! Cipher Block Chaining over [`Aes128`].

use log::{debug, warn};

use crate::bytes::{xor_array, Block, BLOCK_SIZE};
use crate::cipher::Aes128;
use crate::error::{Error, Result};
use crate::key::Aes128Key;
use crate::padding::{pad, unpad, Padding};

/// Configuration for CBC processing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CbcConfig {
    /// Padding applied on encrypt and removed on decrypt.
    pub padding: Padding,
}

/// AES-128 in CBC mode with a bound IV.
#[derive(Clone, Copy, Debug)]
pub struct Aes128Cbc {
    cipher: Aes128,
    iv: Block,
    config: CbcConfig,
}

fn parse_iv(iv: &[u8]) -> Result<Block> {
    iv.try_into()
        .map_err(|_| Error::InvalidIvLength { got: iv.len() })
}

fn check_block_aligned(len: usize) -> Result<()> {
    if len == 0 || len % BLOCK_SIZE != 0 {
        warn!("rejecting input of {len} bytes: not a positive multiple of {BLOCK_SIZE}");
        return Err(Error::InvalidBlockLength { got: len });
    }
    Ok(())
}

fn to_block(chunk: &[u8]) -> Block {
    let mut block = [0u8; 16];
    block.copy_from_slice(chunk);
    block
}

impl Aes128Cbc {
    /// Creates a CBC cipher with PKCS#7 padding.
    ///
    /// Fails with [`Error::InvalidKeyLength`] or [`Error::InvalidIvLength`]
    /// unless both inputs are exactly 16 bytes.
    pub fn new(key: &[u8], iv: &[u8]) -> Result<Self> {
        Self::with_config(key, iv, CbcConfig::default())
    }

    /// Creates a CBC cipher with explicit configuration.
    pub fn with_config(key: &[u8], iv: &[u8], config: CbcConfig) -> Result<Self> {
        let key = Aes128Key::try_from(key)?;
        let iv = parse_iv(iv)?;
        debug!("AES-128-CBC ready (padding: {:?})", config.padding);
        Ok(Self {
            cipher: Aes128::new(&key),
            iv,
            config,
        })
    }

    /// Returns the bound IV.
    pub fn iv(&self) -> &Block {
        &self.iv
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CbcConfig {
        &self.config
    }

    /// Decrypts `ciphertext` with the bound IV and removes padding.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.decrypt_with_iv(ciphertext, &self.iv)
    }

    /// Decrypts `ciphertext` chaining from `iv` instead of the bound IV.
    pub fn decrypt_with_iv(&self, ciphertext: &[u8], iv: &Block) -> Result<Vec<u8>> {
        check_block_aligned(ciphertext.len())?;

        let mut plaintext = Vec::with_capacity(ciphertext.len());
        let mut prev = *iv;
        for chunk in ciphertext.chunks_exact(BLOCK_SIZE) {
            let current = to_block(chunk);
            let mut block = self.cipher.decrypt_block(&current);
            xor_array(&mut block, &prev);
            plaintext.extend_from_slice(&block);
            prev = current;
        }
        debug!("decrypted {} blocks", ciphertext.len() / BLOCK_SIZE);

        match self.config.padding {
            Padding::None => Ok(plaintext),
            Padding::Pkcs7 => {
                let len = unpad(&plaintext)
                    .map_err(|err| {
                        warn!("padding check failed on decrypted message");
                        err
                    })?
                    .len();
                plaintext.truncate(len);
                Ok(plaintext)
            }
        }
    }

    /// Pads per configuration and encrypts with the bound IV.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.encrypt_with_iv(plaintext, &self.iv)
    }

    /// Pads per configuration and encrypts chaining from `iv`.
    pub fn encrypt_with_iv(&self, plaintext: &[u8], iv: &Block) -> Result<Vec<u8>> {
        let padded;
        let input = match self.config.padding {
            Padding::Pkcs7 => {
                padded = pad(plaintext);
                padded.as_slice()
            }
            Padding::None => plaintext,
        };
        check_block_aligned(input.len())?;

        let mut ciphertext = Vec::with_capacity(input.len());
        let mut prev = *iv;
        for chunk in input.chunks_exact(BLOCK_SIZE) {
            let mut block = to_block(chunk);
            xor_array(&mut block, &prev);
            prev = self.cipher.encrypt_block(&block);
            ciphertext.extend_from_slice(&prev);
        }
        debug!("encrypted {} blocks", input.len() / BLOCK_SIZE);
        Ok(ciphertext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    fn hex_bytes(hex: &str) -> Vec<u8> {
        (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
            .collect()
    }

    const SP800_38A_KEY: &str = "2b7e151628aed2a6abf7158809cf4f3c";
    const SP800_38A_IV: &str = "000102030405060708090a0b0c0d0e0f";
    const SP800_38A_PLAIN: &str = concat!(
        "6bc1bee22e409f96e93d7e117393172a",
        "ae2d8a571e03ac9c9eb76fac45af8e51",
        "30c81c46a35ce411e5fbc1191a0a52ef",
        "f69f2445df4f9b17ad2b417be66c3710",
    );
    const SP800_38A_CIPHER: &str = concat!(
        "7649abac8119b246cee98e9b12e9197d",
        "5086cb9b507219ee95db113a917678b2",
        "73bed6b8e3c1743b7116e69e22229516",
        "3ff1caa1681fac09120eca307586e1a7",
    );

    fn raw_cipher(key: &[u8], iv: &[u8]) -> Aes128Cbc {
        Aes128Cbc::with_config(
            key,
            iv,
            CbcConfig {
                padding: Padding::None,
            },
        )
        .unwrap()
    }

    #[test]
    fn sp800_38a_cbc_decrypt() {
        let cbc = raw_cipher(&hex_bytes(SP800_38A_KEY), &hex_bytes(SP800_38A_IV));
        let pt = cbc.decrypt(&hex_bytes(SP800_38A_CIPHER)).unwrap();
        assert_eq!(pt, hex_bytes(SP800_38A_PLAIN));
    }

    #[test]
    fn sp800_38a_cbc_encrypt() {
        let cbc = raw_cipher(&hex_bytes(SP800_38A_KEY), &hex_bytes(SP800_38A_IV));
        let ct = cbc.encrypt(&hex_bytes(SP800_38A_PLAIN)).unwrap();
        assert_eq!(ct, hex_bytes(SP800_38A_CIPHER));
    }

    #[test]
    fn single_block_with_zero_iv_is_plain_aes() {
        let key = hex_bytes("000102030405060708090a0b0c0d0e0f");
        let cbc = raw_cipher(&key, &[0u8; 16]);
        let pt = cbc
            .decrypt(&hex_bytes("69c4e0d86a7b0430d8cdb78070b4c55a"))
            .unwrap();
        assert_eq!(pt, hex_bytes("00112233445566778899aabbccddeeff"));
    }

    #[test]
    fn construction_checks_lengths() {
        assert_eq!(
            Aes128Cbc::new(&[0u8; 15], &[0u8; 16]).unwrap_err(),
            Error::InvalidKeyLength { got: 15 }
        );
        assert_eq!(
            Aes128Cbc::new(&[0u8; 24], &[0u8; 16]).unwrap_err(),
            Error::InvalidKeyLength { got: 24 }
        );
        assert_eq!(
            Aes128Cbc::new(&[0u8; 16], &[0u8; 8]).unwrap_err(),
            Error::InvalidIvLength { got: 8 }
        );
    }

    #[test]
    fn decrypt_rejects_unaligned_ciphertext() {
        let cbc = Aes128Cbc::new(&[1u8; 16], &[2u8; 16]).unwrap();
        for len in [0usize, 15, 17, 31] {
            assert_eq!(
                cbc.decrypt(&vec![0u8; len]),
                Err(Error::InvalidBlockLength { got: len })
            );
        }
    }

    #[test]
    fn encrypt_without_padding_requires_alignment() {
        let cbc = raw_cipher(&[1u8; 16], &[2u8; 16]);
        assert_eq!(
            cbc.encrypt(b"short"),
            Err(Error::InvalidBlockLength { got: 5 })
        );
        assert_eq!(cbc.encrypt(b""), Err(Error::InvalidBlockLength { got: 0 }));
    }

    #[test]
    fn strips_four_bytes_of_padding() {
        let key = [0x42u8; 16];
        let iv = [0x24u8; 16];
        let raw = raw_cipher(&key, &iv);
        let mut message = b"twelve bytes".to_vec();
        message.extend_from_slice(&[0x04; 4]);
        let ct = raw.encrypt(&message).unwrap();

        let cbc = Aes128Cbc::new(&key, &iv).unwrap();
        assert_eq!(cbc.decrypt(&ct).unwrap(), b"twelve bytes");
    }

    #[test]
    fn inconsistent_padding_is_rejected() {
        let key = [0x42u8; 16];
        let iv = [0x24u8; 16];
        let raw = raw_cipher(&key, &iv);
        let mut message = vec![0x61u8; 14];
        message.extend_from_slice(&[0x05, 0x03]);
        let ct = raw.encrypt(&message).unwrap();

        let cbc = Aes128Cbc::new(&key, &iv).unwrap();
        assert_eq!(cbc.decrypt(&ct), Err(Error::InvalidPadding));
        assert_eq!(raw.decrypt(&ct).unwrap(), message);
    }

    #[test]
    fn wrong_iv_only_corrupts_first_block() {
        let key = [9u8; 16];
        let raw = raw_cipher(&key, &[0u8; 16]);
        let message = [0x33u8; 48];
        let ct = raw.encrypt(&message).unwrap();
        let pt = raw.decrypt_with_iv(&ct, &[1u8; 16]).unwrap();
        assert_ne!(pt[..16], message[..16]);
        assert_eq!(pt[16..], message[16..]);
        assert_eq!(raw.iv(), &[0u8; 16]);
    }

    #[test]
    fn round_trip_random_messages() {
        let mut rng = ChaCha20Rng::from_seed([11u8; 32]);
        for _ in 0..64 {
            let mut key = [0u8; 16];
            let mut iv = [0u8; 16];
            rng.fill_bytes(&mut key);
            rng.fill_bytes(&mut iv);

            let len = rng.gen_range(0..200);
            let mut message = vec![0u8; len];
            rng.fill_bytes(&mut message);
            let cbc = Aes128Cbc::new(&key, &iv).unwrap();
            let ct = cbc.encrypt(&message).unwrap();
            assert_eq!(ct.len() % BLOCK_SIZE, 0);
            assert!(ct.len() > message.len());
            assert_eq!(cbc.decrypt(&ct).unwrap(), message);

            let aligned = vec![0x5au8; (len / 16 + 1) * 16];
            let raw = raw_cipher(&key, &iv);
            assert_eq!(raw.decrypt(&raw.encrypt(&aligned).unwrap()).unwrap(), aligned);
        }
    }

    #[test]
    fn shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Aes128Cbc>();

        let cbc = Aes128Cbc::new(&[3u8; 16], &[4u8; 16]).unwrap();
        let messages: Vec<Vec<u8>> = (0..4).map(|i| vec![i as u8; 40 + i]).collect();
        let ciphertexts: Vec<Vec<u8>> = messages.iter().map(|m| cbc.encrypt(m).unwrap()).collect();

        let cbc = &cbc;
        std::thread::scope(|scope| {
            let handles: Vec<_> = ciphertexts
                .iter()
                .map(|ct| scope.spawn(move || cbc.decrypt(ct).unwrap()))
                .collect();
            for (handle, expected) in handles.into_iter().zip(messages.iter()) {
                assert_eq!(&handle.join().unwrap(), expected);
            }
        });
    }
}
