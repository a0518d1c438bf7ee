// SPDX-License-Identifier: CC0-1.0

//! Derivation test vectors.
//!
//! A fixture is a JSON array of `{seed, path, private_key}` objects: a hex
//! seed, a derivation path in apostrophe notation and the hex private key
//! derived from the seed along the path. This module builds such entries
//! and checks them against the derivation engine.
//!

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::bip32::{DerivationPath, Xpriv};
use crate::error::{Error, Result};
use crate::network::Network;
use crate::seed::Seed;

/// Indentation used by [`to_json_pretty`].
const JSON_INDENT: &[u8] = b"    ";

/// One entry of a derivation fixture.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct DerivationVector {
    /// Hex encoded seed
    pub seed: String,
    /// Derivation path, hardened steps marked with `'`
    pub path: String,
    /// Hex encoded private key at `path`
    pub private_key: String,
}

impl DerivationVector {
    /// Builds the entry for `seed` at `path` by deriving its private key.
    pub fn derive(seed: &Seed, path: &DerivationPath) -> Result<DerivationVector> {
        let key = derive_key(seed, path)?;
        Ok(DerivationVector {
            seed: seed.to_hex(),
            path: path.to_string(),
            private_key: hex::encode(key),
        })
    }

    /// Re-derives the private key of this entry and compares it with the
    /// stored one.
    pub fn verify(&self) -> Result<()> {
        let seed = Seed::from_hex(&self.seed)?;
        let path: DerivationPath = self.path.parse()?;
        let actual = hex::encode(derive_key(&seed, &path)?);

        if !actual.eq_ignore_ascii_case(&self.private_key) {
            tracing::warn!(path = %self.path, "derivation vector mismatch");
            return Err(Error::VectorMismatch {
                path: self.path.clone(),
                expected: self.private_key.clone(),
                actual,
            });
        }
        Ok(())
    }
}

/// Raw private key at `path`. The network does not affect the key bytes.
fn derive_key(seed: &Seed, path: &DerivationPath) -> Result<[u8; 32]> {
    let secp = secp256k1::Secp256k1::signing_only();
    let master = Xpriv::new_master(Network::Mainnet, seed.as_bytes())?;
    Ok(master.derive_priv(&secp, path)?.private_key_bytes())
}

/// Parses a fixture.
pub fn from_json(json: &str) -> Result<Vec<DerivationVector>> { Ok(serde_json::from_str(json)?) }

/// Serializes a fixture as pretty-printed JSON with four-space indentation.
pub fn to_json_pretty(vectors: &[DerivationVector]) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
    vectors.serialize(&mut ser)?;
    // serde_json only emits UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Verifies every entry of a fixture, stopping at the first failure.
pub fn verify_all(vectors: &[DerivationVector]) -> Result<()> {
    for vector in vectors {
        vector.verify()?;
    }
    tracing::debug!(count = vectors.len(), "verified derivation vectors");
    Ok(())
}
