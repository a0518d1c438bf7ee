// SPDX-License-Identifier: CC0-1.0

//! Bitcoin keys.
//!
//! Single private and public keys, as produced by derivation, together with
//! their Wallet Import Format and SEC1 serializations.
//!

use core::fmt;
use core::str::FromStr;

use bitcoin_hashes::{hash160, Hash};
use secp256k1::{self, Secp256k1};

use crate::internal_macros::serde_string_impl;
use crate::network::Network;

/// Appended to the key bytes of a WIF string when the public key is compressed.
const WIF_COMPRESSED_FLAG: u8 = 0x01;

/// A key-related error.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Base58 encoding error
    Base58(bs58::decode::Error),
    /// secp256k1-related error
    Secp256k1(secp256k1::Error),
    /// Decoded WIF payload is neither 33 nor 34 bytes long
    InvalidWifLength(usize),
    /// WIF prefix byte does not belong to a known network
    InvalidWifPrefix(u8),
    /// Byte after the key in a 34-byte WIF payload is not 0x01
    InvalidWifCompressionFlag(u8),
    /// Hex decoding error
    Hex(hex::FromHexError),
    /// Public key is neither 33 nor 65 bytes long
    InvalidPublicKeyLength(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;

        match *self {
            Base58(ref e) => write!(f, "key base58 error: {}", e),
            Secp256k1(ref e) => write!(f, "key secp256k1 error: {}", e),
            InvalidWifLength(len) => write!(f, "invalid WIF payload length {}", len),
            InvalidWifPrefix(b) => write!(f, "unknown WIF prefix {:#04x}", b),
            InvalidWifCompressionFlag(b) =>
                write!(f, "invalid WIF compression flag {:#04x}, expected 0x01", b),
            Hex(ref e) => write!(f, "key hex decoding error: {}", e),
            InvalidPublicKeyLength(len) => write!(f, "invalid public key length {}", len),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;

        match *self {
            Base58(ref e) => Some(e),
            Secp256k1(ref e) => Some(e),
            Hex(ref e) => Some(e),
            InvalidWifLength(_)
            | InvalidWifPrefix(_)
            | InvalidWifCompressionFlag(_)
            | InvalidPublicKeyLength(_) => None,
        }
    }
}

impl From<bs58::decode::Error> for Error {
    fn from(e: bs58::decode::Error) -> Error { Error::Base58(e) }
}

impl From<secp256k1::Error> for Error {
    fn from(e: secp256k1::Error) -> Error { Error::Secp256k1(e) }
}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Error { Error::Hex(e) }
}

/// A secp256k1 public key, remembering whether it serializes compressed.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey {
    /// Whether this public key should be serialized as compressed
    pub compressed: bool,
    /// The actual secp256k1 key
    pub inner: secp256k1::PublicKey,
}
serde_string_impl!(PublicKey, "a hex-encoded secp256k1 public key");

impl PublicKey {
    /// Wraps a secp256k1 key as a compressed public key.
    pub fn new(key: secp256k1::PublicKey) -> PublicKey { PublicKey { compressed: true, inner: key } }

    /// Serializes the key as 33 bytes (compressed) or 65 bytes (uncompressed).
    pub fn to_bytes(&self) -> Vec<u8> {
        if self.compressed {
            self.inner.serialize().to_vec()
        } else {
            self.inner.serialize_uncompressed().to_vec()
        }
    }

    /// Deserializes a public key from a 33 or 65 byte SEC1 encoding.
    pub fn from_slice(data: &[u8]) -> Result<PublicKey, Error> {
        let compressed = match data.len() {
            33 => true,
            65 => false,
            len => return Err(Error::InvalidPublicKeyLength(len)),
        };
        Ok(PublicKey { compressed, inner: secp256k1::PublicKey::from_slice(data)? })
    }

    /// HASH160 of the serialized key.
    pub fn pubkey_hash(&self) -> hash160::Hash { hash160::Hash::hash(&self.to_bytes()) }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&hex::encode(self.to_bytes()))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::Display::fmt(self, f) }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<PublicKey, Error> { PublicKey::from_slice(&hex::decode(s)?) }
}

impl From<secp256k1::PublicKey> for PublicKey {
    fn from(key: secp256k1::PublicKey) -> PublicKey { PublicKey::new(key) }
}

/// A secp256k1 private key tagged with the network it is used on.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct PrivateKey {
    /// Whether this private key should be serialized as compressed
    pub compressed: bool,
    /// The network on which this key should be used
    pub network: Network,
    /// The actual secp256k1 key
    pub inner: secp256k1::SecretKey,
}
serde_string_impl!(PrivateKey, "a WIF-encoded private key");

impl PrivateKey {
    /// Constructs a compressed private key for `network`.
    pub fn new(key: secp256k1::SecretKey, network: Network) -> PrivateKey {
        PrivateKey { compressed: true, network, inner: key }
    }

    /// Constructs a compressed private key from 32 raw bytes.
    pub fn from_slice(data: &[u8], network: Network) -> Result<PrivateKey, Error> {
        Ok(PrivateKey::new(secp256k1::SecretKey::from_slice(data)?, network))
    }

    /// Returns the public key of this private key.
    pub fn public_key<C: secp256k1::Signing>(&self, secp: &Secp256k1<C>) -> PublicKey {
        PublicKey {
            compressed: self.compressed,
            inner: secp256k1::PublicKey::from_secret_key(secp, &self.inner),
        }
    }

    /// Returns the raw 32 key bytes.
    pub fn to_bytes(&self) -> [u8; 32] { self.inner.secret_bytes() }

    /// Formats the key in Wallet Import Format into `fmt`.
    pub fn fmt_wif(&self, fmt: &mut dyn fmt::Write) -> fmt::Result {
        let mut ret = Vec::with_capacity(34);
        ret.push(self.network.wif_prefix());
        ret.extend_from_slice(&self.inner.secret_bytes());
        if self.compressed {
            ret.push(WIF_COMPRESSED_FLAG);
        }
        fmt.write_str(&bs58::encode(&ret).with_check().into_string())
    }

    /// Encodes the key in Wallet Import Format.
    pub fn to_wif(&self) -> String { self.to_string() }

    /// Parses a key in Wallet Import Format.
    pub fn from_wif(wif: &str) -> Result<PrivateKey, Error> {
        let data = bs58::decode(wif).with_check(None).into_vec()?;

        let compressed = match data.len() {
            33 => false,
            34 => {
                if data[33] != WIF_COMPRESSED_FLAG {
                    return Err(Error::InvalidWifCompressionFlag(data[33]));
                }
                true
            }
            len => return Err(Error::InvalidWifLength(len)),
        };

        let network = Network::from_wif_prefix(data[0]).ok_or(Error::InvalidWifPrefix(data[0]))?;

        Ok(PrivateKey {
            compressed,
            network,
            inner: secp256k1::SecretKey::from_slice(&data[1..33])?,
        })
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { self.fmt_wif(f) }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("compressed", &self.compressed)
            .field("network", &self.network)
            .field("inner", &"[SecretKey]")
            .finish()
    }
}

impl FromStr for PrivateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<PrivateKey, Error> { PrivateKey::from_wif(s) }
}
