// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! mailveil - obfuscate and recover email addresses

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use mailveil::config::{Overrides, load_settings};
use mailveil::logger::{self, LogFormat};
use mailveil::{DecodeMode, Decoder, DecryptionKey, KeyPairBuilder, mailto_uri};

#[derive(Parser)]
#[command(name = "mailveil", version)]
#[command(about = "Obfuscate email addresses with per-character modular exponentiation")]
struct Cli {
    /// Settings file (TOML, JSON or YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a ciphertext, or a key of the configured address table
    Decode {
        /// Ciphertext (space separated integers) or address table key
        cipher_ref: String,

        /// Modulus; omit or pass 0 to read it from the ciphertext
        #[arg(short, long, requires = "exponent")]
        modulus: Option<String>,

        /// Decryption exponent; omit or pass 0 to read it from the ciphertext
        #[arg(short, long, requires = "modulus")]
        exponent: Option<String>,

        /// Strip the `mailto:` prefix and any `?query` suffix
        #[arg(long)]
        email_only: bool,
    },

    /// Obfuscate text under a freshly generated key
    Encode {
        /// Text to obfuscate
        text: String,

        /// Treat TEXT as an address and wrap it in a mailto: URI
        #[arg(long)]
        mailto: bool,

        /// Subject added to the mailto: URI
        #[arg(long, requires = "mailto")]
        subject: Option<String>,

        /// Modulus size in bits
        #[arg(short, long)]
        bits: Option<usize>,

        /// Emit `n d c1 c2 ...` instead of the bare ciphertext
        #[arg(long)]
        packed: bool,
    },

    /// Generate a key pair
    Keygen {
        /// Modulus size in bits
        #[arg(short, long)]
        bits: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let bits = match &cli.command {
        Commands::Encode { bits, .. } | Commands::Keygen { bits } => *bits,
        Commands::Decode { .. } => None,
    };
    let overrides = Overrides {
        modulus_bits: bits,
        log_format: cli.log_format,
    };
    let settings = load_settings(cli.config.as_deref(), &overrides).context("loading settings")?;
    logger::init(settings.log_format);

    match cli.command {
        Commands::Decode {
            cipher_ref,
            modulus,
            exponent,
            email_only,
        } => {
            // a zero in either flag selects packed mode, like an omitted pair
            let key = match (modulus, exponent) {
                (Some(n), Some(d)) => DecryptionKey::from_decimal(&n, &d)
                    .with_context(|| format!("invalid key {} {}", n, d))?,
                (None, None) => None,
                _ => bail!("--modulus and --exponent must be given together"),
            };

            let decoder = Decoder::with_addresses(settings.addresses);
            let decoded = decoder
                .decode(&cipher_ref, key.as_ref(), DecodeMode::from_email_only(email_only))
                .with_context(|| format!("decoding {:?}", cipher_ref))?;
            println!("{}", decoded);
        }
        Commands::Encode {
            text,
            mailto,
            subject,
            packed,
            ..
        } => {
            let keypair = KeyPairBuilder::new()
                .modulus_bits(settings.modulus_bits)
                .build()?;
            let text = if mailto {
                mailto_uri(&text, subject.as_deref())
            } else {
                text
            };

            if packed {
                println!("{}", keypair.encode_packed(&text)?);
            } else {
                let ciphertext = mailveil::Encode::encode(&keypair, &text)?;
                println!("n = {}", keypair.decryption_key().n());
                println!("d = {}", keypair.decryption_key().exponent());
                println!("{}", ciphertext);
            }
        }
        Commands::Keygen { .. } => {
            let keypair = KeyPairBuilder::new()
                .modulus_bits(settings.modulus_bits)
                .build()?;
            println!("n = {}", keypair.encryption_key().n());
            println!("e = {}", keypair.encryption_key().exponent());
            println!("d = {}", keypair.decryption_key().exponent());
        }
    }

    Ok(())
}
