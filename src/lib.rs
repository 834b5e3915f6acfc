// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # mailveil
//!
//! Email address obfuscation by per-character modular exponentiation.
//!
//! Each character code `m` of a string such as `mailto:user@example.com` is
//! published as `c = m^e mod n`. A page ships the ciphertext together with
//! `(n, d)` and a decoder turns it back into text when a visitor clicks the
//! link, which is enough to defeat scrapers that only look for `@`.
//!
//! ## Example
//!
//! ```rust
//! use mailveil::{Decoder, DecodeMode, KeyPair, mailto_uri};
//!
//! let keypair = KeyPair::generate().expect("key generation failed");
//! let packed = keypair
//!     .encode_packed(&mailto_uri("user@example.com", Some("hi")))
//!     .expect("encoding failed");
//!
//! let decoder = Decoder::default();
//! let address = decoder
//!     .decode(&packed, None, DecodeMode::EmailOnly)
//!     .expect("decoding failed");
//! assert_eq!(address, "user@example.com");
//! ```

mod address;
mod cache;
mod ciphertext;
mod codec;
mod decoder;
mod error;
mod keypair;
mod util;

pub mod config;
pub mod logger;

pub use address::*;
pub use cache::*;
pub use ciphertext::*;
pub use codec::*;
pub use decoder::*;
pub use error::*;
pub use keypair::*;
pub use util::mod_pow;
