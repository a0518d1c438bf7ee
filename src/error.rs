// SPDX-License-Identifier: CC0-1.0

//! Crate-level error type.
//!
//! [`bip32::Error`](crate::bip32::Error) covers the key and path layer and
//! [`key::Error`](crate::key::Error) covers single key formats. [`Error`]
//! wraps both together with the mnemonic, seed and fixture failures of the
//! higher level API.

use core::fmt;

use crate::bip32::{self, DerivationPath};
use crate::key;

/// Result type alias for the higher level API.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors of the wallet, mnemonic, seed and fixture API.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// BIP32 derivation or encoding error
    Bip32(bip32::Error),
    /// WIF or public key format error
    Key(key::Error),
    /// Invalid BIP39 mnemonic
    Mnemonic(bip39::Error),
    /// Seed is not between 16 and 64 bytes long
    InvalidSeedLength(usize),
    /// Mnemonic word count is not one of 12, 15, 18, 21 or 24
    BadWordCount(usize),
    /// Derivation path does not follow the BIP44 layout
    InvalidBip44Path(DerivationPath),
    /// Hex decoding error
    Hex(hex::FromHexError),
    /// A fixture entry does not match the re-derived key
    VectorMismatch {
        /// Path of the entry
        path: String,
        /// Private key stored in the entry
        expected: String,
        /// Private key derived from the entry's seed
        actual: String,
    },
    /// JSON (de)serialization error
    #[cfg(feature = "serde")]
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;

        match *self {
            Bip32(ref e) => write!(f, "bip32 error: {}", e),
            Key(ref e) => write!(f, "key error: {}", e),
            Mnemonic(ref e) => write!(f, "invalid mnemonic: {}", e),
            InvalidSeedLength(len) =>
                write!(f, "seed length {} is not within [16, 64] bytes", len),
            BadWordCount(n) => write!(f, "mnemonic word count {} is not 12, 15, 18, 21 or 24", n),
            InvalidBip44Path(ref p) => write!(f, "{} is not a BIP44 path", p),
            Hex(ref e) => write!(f, "hex decoding error: {}", e),
            VectorMismatch { ref path, ref expected, ref actual } => write!(
                f,
                "derivation vector mismatch at {}: expected {}, derived {}",
                path, expected, actual
            ),
            #[cfg(feature = "serde")]
            Json(ref e) => write!(f, "json error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;

        match *self {
            Bip32(ref e) => Some(e),
            Key(ref e) => Some(e),
            Mnemonic(ref e) => Some(e),
            Hex(ref e) => Some(e),
            #[cfg(feature = "serde")]
            Json(ref e) => Some(e),
            InvalidSeedLength(_)
            | BadWordCount(_)
            | InvalidBip44Path(_)
            | VectorMismatch { .. } => None,
        }
    }
}

impl From<bip32::Error> for Error {
    fn from(e: bip32::Error) -> Error { Error::Bip32(e) }
}

impl From<key::Error> for Error {
    fn from(e: key::Error) -> Error { Error::Key(e) }
}

impl From<bip39::Error> for Error {
    fn from(e: bip39::Error) -> Error { Error::Mnemonic(e) }
}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Error { Error::Hex(e) }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error { Error::Json(e) }
}
