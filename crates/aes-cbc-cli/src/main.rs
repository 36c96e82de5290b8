//! Command-line interface for table-driven AES-128-CBC.

#![forbid(unsafe_code)]

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use aes_core::{decrypt_block, expand_key, Aes128Cbc, Aes128Key, CbcConfig, Padding};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// AES-128-CBC CLI.
#[derive(Parser)]
#[command(
    name = "aescbc",
    version,
    author,
    about = "Table-driven AES-128 in CBC mode"
)]
struct Cli {
    /// Print progress details to stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

/// Arguments shared by `enc` and `dec`.
#[derive(Args)]
struct CipherArgs {
    /// AES-128 key as 32 hex characters.
    #[arg(long, value_name = "HEX")]
    key_hex: String,
    /// Initialization vector as 32 hex characters.
    #[arg(long, value_name = "HEX")]
    iv_hex: String,
    /// Input file; reads standard input when omitted.
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,
    /// Output file; writes standard output when omitted.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Treat input as hex text and write hex text.
    #[arg(long, default_value_t = false)]
    hex: bool,
    /// Skip PKCS#7 padding; data must be a multiple of 16 bytes.
    #[arg(long, default_value_t = false)]
    no_padding: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decrypt CBC ciphertext and strip padding.
    Dec(CipherArgs),
    /// Pad and encrypt plaintext in CBC mode.
    Enc(CipherArgs),
    /// Run the built-in FIPS-197 and SP 800-38A known-answer checks.
    Kat,
    /// Run a local demo: random key, IV and message, encrypt then decrypt.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Dec(args) => cmd_dec(&args, cli.verbose),
        Commands::Enc(args) => cmd_enc(&args, cli.verbose),
        Commands::Kat => cmd_kat(),
        Commands::Demo { seed } => cmd_demo(seed),
    }
}

fn cmd_dec(args: &CipherArgs, verbose: bool) -> Result<()> {
    let cbc = build_cipher(args)?;
    let input = read_input(args)?;
    let plaintext = cbc.decrypt(&input).context("decrypt")?;
    if verbose {
        eprintln!(
            "decrypted {} bytes into {} bytes",
            input.len(),
            plaintext.len()
        );
    }
    write_output(args, &plaintext)
}

fn cmd_enc(args: &CipherArgs, verbose: bool) -> Result<()> {
    let cbc = build_cipher(args)?;
    let input = read_input(args)?;
    let ciphertext = cbc.encrypt(&input).context("encrypt")?;
    if verbose {
        eprintln!(
            "encrypted {} bytes into {} bytes",
            input.len(),
            ciphertext.len()
        );
    }
    write_output(args, &ciphertext)
}

fn cmd_kat() -> Result<()> {
    let key = parse_key_hex("000102030405060708090a0b0c0d0e0f")?;
    let round_keys = expand_key(&key);
    let ct = parse_block_hex("69c4e0d86a7b0430d8cdb78070b4c55a")?;
    let pt = decrypt_block(&ct, &round_keys);
    if hex::encode(pt) != "00112233445566778899aabbccddeeff" {
        bail!("FIPS-197 C.1 block decryption mismatch");
    }
    println!("FIPS-197 C.1 block decrypt: ok");

    let cbc = Aes128Cbc::with_config(
        &hex::decode("2b7e151628aed2a6abf7158809cf4f3c")?,
        &hex::decode("000102030405060708090a0b0c0d0e0f")?,
        CbcConfig {
            padding: Padding::None,
        },
    )?;
    let ciphertext = hex::decode(concat!(
        "7649abac8119b246cee98e9b12e9197d",
        "5086cb9b507219ee95db113a917678b2",
        "73bed6b8e3c1743b7116e69e22229516",
        "3ff1caa1681fac09120eca307586e1a7",
    ))?;
    let expected = concat!(
        "6bc1bee22e409f96e93d7e117393172a",
        "ae2d8a571e03ac9c9eb76fac45af8e51",
        "30c81c46a35ce411e5fbc1191a0a52ef",
        "f69f2445df4f9b17ad2b417be66c3710",
    );
    if hex::encode(cbc.decrypt(&ciphertext)?) != expected {
        bail!("SP 800-38A F.2.2 CBC decryption mismatch");
    }
    println!("SP 800-38A F.2.2 CBC decrypt: ok");
    Ok(())
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut key = [0u8; 16];
    let mut iv = [0u8; 16];
    rng.fill_bytes(&mut key);
    rng.fill_bytes(&mut iv);
    let cbc = Aes128Cbc::new(&key, &iv)?;

    let mut message = vec![0u8; rng.gen_range(1..=64)];
    rng.fill_bytes(&mut message);
    let ciphertext = cbc.encrypt(&message)?;
    let decrypted = cbc.decrypt(&ciphertext)?;

    println!("demo key: {}", hex::encode(key));
    println!("iv: {}", hex::encode(iv));
    println!("plaintext: {}", hex::encode(&message));
    println!("ciphertext: {}", hex::encode(&ciphertext));
    println!("decrypted: {}", hex::encode(&decrypted));
    if decrypted != message {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn build_cipher(args: &CipherArgs) -> Result<Aes128Cbc> {
    let key = parse_key_hex(&args.key_hex)?;
    let iv = parse_block_hex(&args.iv_hex).context("parse IV")?;
    let padding = if args.no_padding {
        Padding::None
    } else {
        Padding::Pkcs7
    };
    Ok(Aes128Cbc::with_config(&key.0, &iv, CbcConfig { padding })?)
}

fn parse_key_hex(hex_str: &str) -> Result<Aes128Key> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    Aes128Key::try_from(bytes.as_slice())
        .context("AES-128 key must be 16 bytes (32 hex characters)")
}

fn parse_block_hex(hex_str: &str) -> Result<[u8; 16]> {
    let bytes = hex::decode(hex_str.trim()).context("decode hex")?;
    if bytes.len() != 16 {
        bail!("expected 16 bytes (32 hex characters), got {}", bytes.len());
    }
    let mut block = [0u8; 16];
    block.copy_from_slice(&bytes);
    Ok(block)
}

fn read_input(args: &CipherArgs) -> Result<Vec<u8>> {
    let raw = match &args.input {
        Some(path) => fs::read(path).with_context(|| format!("read {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("read standard input")?;
            buf
        }
    };
    if args.hex {
        let text = String::from_utf8(raw).context("hex input is not UTF-8")?;
        let compact: String = text.split_whitespace().collect();
        return hex::decode(compact).context("decode hex input");
    }
    Ok(raw)
}

fn write_output(args: &CipherArgs, data: &[u8]) -> Result<()> {
    let bytes = if args.hex {
        let mut text = hex::encode(data).into_bytes();
        text.push(b'\n');
        text
    } else {
        data.to_vec()
    };
    match &args.output {
        Some(path) => write_file(path, &bytes),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&bytes).context("write standard output")?;
            stdout.flush().context("flush standard output")
        }
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("write {}", path.display()))
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_key_and_rejects_bad_lengths() {
        let key = parse_key_hex(" 000102030405060708090a0b0c0d0e0f\n").unwrap();
        assert_eq!(key.0[15], 0x0f);
        assert!(parse_key_hex("0001").is_err());
        assert!(parse_key_hex("zz").is_err());
        assert!(parse_block_hex("00").is_err());
    }

    #[test]
    fn known_answer_checks_pass() {
        cmd_kat().unwrap();
    }

    #[test]
    fn demo_is_reproducible_with_seed() {
        cmd_demo(Some(42)).unwrap();
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
