// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::path::Path;

use config as config_rs;
use serde::Deserialize;

use crate::address::AddressBook;
use crate::error::Result;
use crate::keypair::KeyPairBuilder;
use crate::logger::LogFormat;

/// Prefix of environment variables read by [`load_settings`].
pub const ENV_PREFIX: &str = "MAILVEIL";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Known ciphertexts, referenced by key when decoding.
    pub addresses: AddressBook,
    /// Modulus size for newly generated keys.
    pub modulus_bits: usize,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            addresses: AddressBook::new(),
            modulus_bits: KeyPairBuilder::DEFAULT_BITS,
            log_format: LogFormat::default(),
        }
    }
}

/// Values given on the command line, applied last.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub modulus_bits: Option<usize>,
    pub log_format: Option<LogFormat>,
}

/// Load settings from an optional file, `MAILVEIL_*` environment variables
/// and `overrides`, later sources winning.
pub fn load_settings(path: Option<&Path>, overrides: &Overrides) -> Result<Settings> {
    load_settings_with_prefix(path, ENV_PREFIX, overrides)
}

fn load_settings_with_prefix(
    path: Option<&Path>,
    env_prefix: &str,
    overrides: &Overrides,
) -> Result<Settings> {
    let mut builder = config_rs::Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(config_rs::File::from(path));
    }

    builder = builder.add_source(
        config_rs::Environment::with_prefix(env_prefix).try_parsing(true),
    );

    if let Some(bits) = overrides.modulus_bits {
        builder = builder.set_override("modulus_bits", bits as i64)?;
    }
    if let Some(format) = overrides.log_format {
        let value = match format {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        };
        builder = builder.set_override("log_format", value)?;
    }

    let settings: Settings = builder.build()?.try_deserialize()?;
    tracing::debug!(
        addresses = settings.addresses.len(),
        modulus_bits = settings.modulus_bits,
        "loaded settings"
    );
    Ok(settings)
}
