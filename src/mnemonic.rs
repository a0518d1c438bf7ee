// SPDX-License-Identifier: CC0-1.0

//! BIP39 mnemonic sentences.
//!
//! Wordlist lookup and checksum validation are delegated to the `bip39`
//! crate, with the English wordlist, and so is BIP39 seed stretching.
//!

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};
use crate::seed::Seed;

/// Word counts a mnemonic sentence may have.
pub const WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// A checksummed BIP39 mnemonic sentence.
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic {
    inner: bip39::Mnemonic,
}

impl Mnemonic {
    /// Parses an English mnemonic sentence, validating its words and checksum.
    pub fn parse(phrase: &str) -> Result<Mnemonic> {
        let inner = bip39::Mnemonic::parse_in(bip39::Language::English, phrase.trim())?;
        Ok(Mnemonic { inner })
    }

    /// Encodes 16, 20, 24, 28 or 32 bytes of entropy as a mnemonic.
    pub fn from_entropy(entropy: &[u8]) -> Result<Mnemonic> {
        let inner = bip39::Mnemonic::from_entropy_in(bip39::Language::English, entropy)?;
        Ok(Mnemonic { inner })
    }

    /// Generates a mnemonic of `word_count` words.
    ///
    /// The entropy is drawn from a ChaCha20 stream keyed with 32 bytes of OS
    /// randomness.
    #[cfg(feature = "rand")]
    pub fn generate(word_count: usize) -> Result<Mnemonic> {
        use rand::rngs::OsRng;
        use rand::{RngCore, SeedableRng};
        use rand_chacha::ChaCha20Rng;

        if !WORD_COUNTS.contains(&word_count) {
            return Err(Error::BadWordCount(word_count));
        }
        let mut key = [0u8; 32];
        OsRng.fill_bytes(&mut key);
        let mut rng = ChaCha20Rng::from_seed(key);

        // Every three words carry 32 bits of entropy.
        let mut entropy = vec![0u8; word_count / 3 * 4];
        rng.fill_bytes(&mut entropy);
        Mnemonic::from_entropy(&entropy)
    }

    /// Iterates over the words of the sentence.
    pub fn words(&self) -> impl Iterator<Item = &'static str> + '_ { self.inner.words() }

    /// Number of words in the sentence.
    pub fn word_count(&self) -> usize { self.inner.word_count() }

    /// Recovers the entropy the sentence encodes.
    pub fn to_entropy(&self) -> Vec<u8> { self.inner.to_entropy() }

    /// Derives the BIP39 seed: PBKDF2-HMAC-SHA512 over the sentence, salted
    /// with `"mnemonic"` and the NFKD-normalized passphrase, 2048 rounds.
    /// Use an empty passphrase when there is none.
    pub fn to_seed(&self, passphrase: &str) -> Seed { Seed::from(self.inner.to_seed(passphrase)) }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, word) in self.words().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(word)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Mnemonic([{} words])", self.word_count())
    }
}

impl FromStr for Mnemonic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Mnemonic> { Mnemonic::parse(s) }
}
