// SPDX-License-Identifier: CC0-1.0

//! BIP32 seeds.
//!
//! A [`Seed`] is the byte string a master key is generated from. It is
//! either supplied directly (hex fixtures, other wallets) or stretched from
//! a BIP39 mnemonic sentence.
//!

use core::fmt;
use core::ops::RangeInclusive;

use crate::error::{Error, Result};
use crate::mnemonic::Mnemonic;

/// Seed lengths accepted by BIP32, in bytes.
pub const SEED_LEN_RANGE: RangeInclusive<usize> = 16..=64;

/// Seed bytes for master key generation.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Seed(Vec<u8>);

impl Seed {
    /// Wraps raw seed bytes, checking the BIP32 length bounds.
    pub fn from_slice(data: &[u8]) -> Result<Seed> {
        if !SEED_LEN_RANGE.contains(&data.len()) {
            return Err(Error::InvalidSeedLength(data.len()));
        }
        Ok(Seed(data.to_vec()))
    }

    /// Parses a hex-encoded seed.
    pub fn from_hex(s: &str) -> Result<Seed> { Seed::from_slice(&hex::decode(s)?) }

    /// Derives the BIP39 seed of a mnemonic sentence, see
    /// [`Mnemonic::to_seed`].
    pub fn from_mnemonic(mnemonic: &Mnemonic, passphrase: &str) -> Seed {
        mnemonic.to_seed(passphrase)
    }

    /// Returns the seed bytes.
    pub fn as_bytes(&self) -> &[u8] { &self.0 }

    /// Length of the seed in bytes.
    pub fn len(&self) -> usize { self.0.len() }

    /// Always false, seeds are at least 16 bytes long.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Hex encoding of the seed.
    pub fn to_hex(&self) -> String { hex::encode(&self.0) }
}

impl From<[u8; 64]> for Seed {
    fn from(data: [u8; 64]) -> Seed { Seed(data.to_vec()) }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] { &self.0 }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Seed([{} bytes])", self.0.len())
    }
}
