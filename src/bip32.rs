// SPDX-License-Identifier: CC0-1.0

//! BIP32 implementation.
//!
//! Implementation of BIP32 hierarchical deterministic wallets, as defined
//! at <https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki>.
//!

use core::ops::Index;
use core::str::FromStr;
use core::{fmt, slice};

use bitcoin_hashes::{hash160, hash_newtype, sha512, Hash, HashEngine, Hmac, HmacEngine};
use secp256k1::{self, Scalar, Secp256k1};

use crate::internal_macros::{impl_array_newtype, impl_bytes_newtype, serde_string_impl};
use crate::key::{PrivateKey, PublicKey};
use crate::network::Network;
use crate::seed::SEED_LEN_RANGE;

/// HMAC key used to turn a seed into a master key.
const MASTER_KEY_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// Length of an encoded extended key.
const EXTENDED_KEY_LEN: usize = 78;

/// A chain code
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChainCode([u8; 32]);
impl_array_newtype!(ChainCode, u8, 32);
impl_bytes_newtype!(ChainCode, 32);

/// A fingerprint
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fingerprint([u8; 4]);
impl_array_newtype!(Fingerprint, u8, 4);
impl_bytes_newtype!(Fingerprint, 4);

hash_newtype! {
    /// Extended key identifier as defined in BIP-32.
    pub struct XKeyIdentifier(hash160::Hash);
}

impl XKeyIdentifier {
    /// Returns the first four bytes of the identifier.
    pub fn fingerprint(&self) -> Fingerprint {
        let bytes = self.to_byte_array();
        Fingerprint([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

/// Splits an HMAC-SHA512 output into its left half (the key material) and
/// its right half (the chain code).
fn split_hmac(hmac: Hmac<sha512::Hash>) -> ([u8; 32], ChainCode) {
    let bytes = hmac.to_byte_array();
    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&bytes[..32]);
    right.copy_from_slice(&bytes[32..]);
    (left, ChainCode(right))
}

/// Extended private key
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Xpriv {
    /// The network this key is to be used on
    pub network: Network,
    /// How many derivations this key is from the master (which is 0)
    pub depth: u8,
    /// Fingerprint of the parent key (0 for master)
    pub parent_fingerprint: Fingerprint,
    /// Child number of the key used to derive from parent (0 for master)
    pub child_number: ChildNumber,
    /// Private key
    pub private_key: secp256k1::SecretKey,
    /// Chain code
    pub chain_code: ChainCode,
}
serde_string_impl!(Xpriv, "a BIP-32 extended private key");

impl fmt::Debug for Xpriv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Xpriv")
            .field("network", &self.network)
            .field("depth", &self.depth)
            .field("parent_fingerprint", &self.parent_fingerprint)
            .field("child_number", &self.child_number)
            .field("chain_code", &self.chain_code)
            .field("private_key", &"[SecretKey]")
            .finish()
    }
}

/// Extended public key
#[derive(Copy, Clone, PartialEq, Eq, Debug, PartialOrd, Ord, Hash)]
pub struct Xpub {
    /// The network this key is to be used on
    pub network: Network,
    /// How many derivations this key is from the master (which is 0)
    pub depth: u8,
    /// Fingerprint of the parent key
    pub parent_fingerprint: Fingerprint,
    /// Child number of the key used to derive from parent (0 for master)
    pub child_number: ChildNumber,
    /// Public key
    pub public_key: secp256k1::PublicKey,
    /// Chain code
    pub chain_code: ChainCode,
}
serde_string_impl!(Xpub, "a BIP-32 extended public key");

/// A child number for a derived key
#[derive(Copy, Clone, PartialEq, Eq, Debug, PartialOrd, Ord, Hash)]
pub enum ChildNumber {
    /// Non-hardened key
    Normal {
        /// Key index, within [0, 2^31 - 1]
        index: u32,
    },
    /// Hardened key
    Hardened {
        /// Key index, within [0, 2^31 - 1]
        index: u32,
    },
}

impl ChildNumber {
    /// Create a [`Normal`] from an index, returns an error if the index is not within
    /// [0, 2^31 - 1].
    ///
    /// [`Normal`]: #variant.Normal
    pub fn from_normal_idx(index: u32) -> Result<Self, Error> {
        if index & (1 << 31) == 0 {
            Ok(ChildNumber::Normal { index })
        } else {
            Err(Error::InvalidChildNumber(index))
        }
    }

    /// Create a [`Hardened`] from an index, returns an error if the index is not within
    /// [0, 2^31 - 1].
    ///
    /// [`Hardened`]: #variant.Hardened
    pub fn from_hardened_idx(index: u32) -> Result<Self, Error> {
        if index & (1 << 31) == 0 {
            Ok(ChildNumber::Hardened { index })
        } else {
            Err(Error::InvalidChildNumber(index))
        }
    }

    /// Returns `true` if the child number is a [`Normal`] value.
    ///
    /// [`Normal`]: #variant.Normal
    pub fn is_normal(&self) -> bool { !self.is_hardened() }

    /// Returns `true` if the child number is a [`Hardened`] value.
    ///
    /// [`Hardened`]: #variant.Hardened
    pub fn is_hardened(&self) -> bool {
        match self {
            ChildNumber::Hardened { .. } => true,
            ChildNumber::Normal { .. } => false,
        }
    }

    /// Returns the index without the hardened bit.
    pub fn index(&self) -> u32 {
        match *self {
            ChildNumber::Normal { index } | ChildNumber::Hardened { index } => index,
        }
    }

    /// Returns the child number that is a single increment from this one.
    pub fn increment(self) -> Result<ChildNumber, Error> {
        match self {
            ChildNumber::Normal { index: idx } => ChildNumber::from_normal_idx(idx + 1),
            ChildNumber::Hardened { index: idx } => ChildNumber::from_hardened_idx(idx + 1),
        }
    }
}

impl From<u32> for ChildNumber {
    fn from(number: u32) -> Self {
        if number & (1 << 31) != 0 {
            ChildNumber::Hardened { index: number ^ (1 << 31) }
        } else {
            ChildNumber::Normal { index: number }
        }
    }
}

impl From<ChildNumber> for u32 {
    fn from(cnum: ChildNumber) -> Self {
        match cnum {
            ChildNumber::Normal { index } => index,
            ChildNumber::Hardened { index } => index | (1 << 31),
        }
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ChildNumber::Hardened { index } => {
                fmt::Display::fmt(&index, f)?;
                let alt = f.alternate();
                f.write_str(if alt { "h" } else { "'" })
            }
            ChildNumber::Normal { index } => fmt::Display::fmt(&index, f),
        }
    }
}

impl FromStr for ChildNumber {
    type Err = Error;

    fn from_str(inp: &str) -> Result<ChildNumber, Error> {
        let is_hardened = inp.ends_with(|c| c == '\'' || c == 'h' || c == 'H');
        let digits = if is_hardened { &inp[..inp.len() - 1] } else { inp };
        // `u32::from_str` would also take a leading `+`.
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidChildNumberFormat);
        }
        let index = digits.parse().map_err(|_| Error::InvalidChildNumberFormat)?;
        if is_hardened {
            ChildNumber::from_hardened_idx(index)
        } else {
            ChildNumber::from_normal_idx(index)
        }
    }
}

impl AsRef<[ChildNumber]> for ChildNumber {
    fn as_ref(&self) -> &[ChildNumber] { slice::from_ref(self) }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ChildNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        u32::deserialize(deserializer).map(ChildNumber::from)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ChildNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        u32::from(*self).serialize(serializer)
    }
}

/// Trait that allows possibly failable conversion from a type into a
/// derivation path
pub trait IntoDerivationPath {
    /// Convers a given type into a [`DerivationPath`] with possible error
    fn into_derivation_path(self) -> Result<DerivationPath, Error>;
}

/// A BIP-32 derivation path.
#[derive(Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct DerivationPath(Vec<ChildNumber>);
serde_string_impl!(DerivationPath, "a BIP-32 derivation path");

impl<I> Index<I> for DerivationPath
where
    Vec<ChildNumber>: Index<I>,
{
    type Output = <Vec<ChildNumber> as Index<I>>::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output { &self.0[index] }
}

impl Default for DerivationPath {
    fn default() -> DerivationPath { DerivationPath::master() }
}

impl<T> IntoDerivationPath for T
where
    T: Into<DerivationPath>,
{
    fn into_derivation_path(self) -> Result<DerivationPath, Error> { Ok(self.into()) }
}

impl IntoDerivationPath for String {
    fn into_derivation_path(self) -> Result<DerivationPath, Error> { self.parse() }
}

impl<'a> IntoDerivationPath for &'a str {
    fn into_derivation_path(self) -> Result<DerivationPath, Error> { self.parse() }
}

impl From<Vec<ChildNumber>> for DerivationPath {
    fn from(numbers: Vec<ChildNumber>) -> Self { DerivationPath(numbers) }
}

impl From<DerivationPath> for Vec<ChildNumber> {
    fn from(path: DerivationPath) -> Self { path.0 }
}

impl<'a> From<&'a [ChildNumber]> for DerivationPath {
    fn from(numbers: &'a [ChildNumber]) -> Self { DerivationPath(numbers.to_vec()) }
}

impl<'a> From<&'a DerivationPath> for DerivationPath {
    fn from(path: &'a DerivationPath) -> Self { path.clone() }
}

impl core::iter::FromIterator<ChildNumber> for DerivationPath {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = ChildNumber>,
    {
        DerivationPath(Vec::from_iter(iter))
    }
}

impl<'a> core::iter::IntoIterator for &'a DerivationPath {
    type Item = &'a ChildNumber;
    type IntoIter = slice::Iter<'a, ChildNumber>;
    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

impl AsRef<[ChildNumber]> for DerivationPath {
    fn as_ref(&self) -> &[ChildNumber] { &self.0 }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(path: &str) -> Result<DerivationPath, Error> {
        let mut parts = path.split('/');
        // First parts must be `m`.
        if parts.next() != Some("m") {
            return Err(Error::InvalidDerivationPathFormat);
        }

        let ret: Result<Vec<ChildNumber>, Error> = parts.map(str::parse).collect();
        Ok(DerivationPath(ret?))
    }
}

/// An iterator over children of a [DerivationPath].
///
/// It is returned by the methods [DerivationPath::children_from],
/// [DerivationPath::normal_children] and [DerivationPath::hardened_children].
pub struct DerivationPathIterator<'a> {
    base: &'a DerivationPath,
    next_child: Option<ChildNumber>,
}

impl<'a> DerivationPathIterator<'a> {
    /// Start a new [DerivationPathIterator] at the given child.
    pub fn start_from(path: &'a DerivationPath, start: ChildNumber) -> DerivationPathIterator<'a> {
        DerivationPathIterator { base: path, next_child: Some(start) }
    }
}

impl<'a> Iterator for DerivationPathIterator<'a> {
    type Item = DerivationPath;

    fn next(&mut self) -> Option<Self::Item> {
        let ret = self.next_child?;
        self.next_child = ret.increment().ok();
        Some(self.base.child(ret))
    }
}

impl DerivationPath {
    /// Returns length of the derivation path
    pub fn len(&self) -> usize { self.0.len() }

    /// Returns `true` if the derivation path is empty
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Returns derivation path for a master key (i.e. empty derivation path)
    pub fn master() -> DerivationPath { DerivationPath(vec![]) }

    /// Returns whether derivation path represents master key (i.e. it's length
    /// is empty). True for `m` path.
    pub fn is_master(&self) -> bool { self.0.is_empty() }

    /// Returns whether every step of the path is hardened. True for `m`.
    pub fn is_hardened_only(&self) -> bool { self.0.iter().all(ChildNumber::is_hardened) }

    /// Appends a child number to the end of the path.
    pub fn push(&mut self, cn: ChildNumber) { self.0.push(cn) }

    /// Create a new [DerivationPath] that is a child of this one.
    pub fn child(&self, cn: ChildNumber) -> DerivationPath {
        let mut path = self.0.clone();
        path.push(cn);
        DerivationPath(path)
    }

    /// Convert into a [DerivationPath] that is a child of this one.
    pub fn into_child(self, cn: ChildNumber) -> DerivationPath {
        let mut path = self.0;
        path.push(cn);
        DerivationPath(path)
    }

    /// Get an [Iterator] over the children of this [DerivationPath]
    /// starting with the given [ChildNumber].
    pub fn children_from(&self, cn: ChildNumber) -> DerivationPathIterator {
        DerivationPathIterator::start_from(self, cn)
    }

    /// Get an [Iterator] over the unhardened children of this [DerivationPath].
    pub fn normal_children(&self) -> DerivationPathIterator {
        DerivationPathIterator::start_from(self, ChildNumber::Normal { index: 0 })
    }

    /// Get an [Iterator] over the hardened children of this [DerivationPath].
    pub fn hardened_children(&self) -> DerivationPathIterator {
        DerivationPathIterator::start_from(self, ChildNumber::Hardened { index: 0 })
    }

    /// Concatenate `self` with `path` and return the resulting new path.
    ///
    /// ```
    /// use hdkey::bip32::{DerivationPath, ChildNumber};
    /// use std::str::FromStr;
    ///
    /// let base = DerivationPath::from_str("m/42").unwrap();
    ///
    /// let deriv_1 = base.extend(DerivationPath::from_str("m/0/1").unwrap());
    /// let deriv_2 = base.extend(&[
    ///     ChildNumber::from_normal_idx(0).unwrap(),
    ///     ChildNumber::from_normal_idx(1).unwrap()
    /// ]);
    ///
    /// assert_eq!(deriv_1, deriv_2);
    /// ```
    pub fn extend<T: AsRef<[ChildNumber]>>(&self, path: T) -> DerivationPath {
        let mut new_path = self.clone();
        new_path.0.extend_from_slice(path.as_ref());
        new_path
    }

    /// Returns the derivation path as a vector of u32 integers.
    /// Unhardened elements are copied as is.
    /// 0x80000000 is added to the hardened elements.
    ///
    /// ```
    /// use hdkey::bip32::DerivationPath;
    /// use std::str::FromStr;
    ///
    /// let path = DerivationPath::from_str("m/84'/0'/0'/0/1").unwrap();
    /// const HARDENED: u32 = 0x80000000;
    /// assert_eq!(path.to_u32_vec(), vec![84 + HARDENED, HARDENED, HARDENED, 0, 1]);
    /// ```
    pub fn to_u32_vec(&self) -> Vec<u32> { self.into_iter().map(|&el| el.into()).collect() }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("m")?;
        for cn in self.0.iter() {
            f.write_str("/")?;
            fmt::Display::fmt(cn, f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::Display::fmt(&self, f) }
}

/// A BIP32 error
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A pk->pk derivation was attempted on a hardened key
    CannotDeriveFromHardenedKey,
    /// A secp256k1 error occurred
    Secp256k1(secp256k1::Error),
    /// A child number was provided that was out of range
    InvalidChildNumber(u32),
    /// Invalid childnumber format.
    InvalidChildNumberFormat,
    /// Invalid derivation path format.
    InvalidDerivationPathFormat,
    /// Seed is not between 16 and 64 bytes long
    InvalidSeedLength(usize),
    /// The seed produced a key outside of the secp256k1 group order
    InvalidMasterKey,
    /// The child at this number is not a valid key, the next index must be used
    InvalidChildKey(ChildNumber),
    /// A derivation would go past depth 255
    MaxDepthExceeded,
    /// Unknown version magic bytes
    UnknownVersion([u8; 4]),
    /// Encoded extended key data has wrong length
    WrongExtendedKeyLength(usize),
    /// Encoded private key is not prefixed with a zero byte
    InvalidPrivateKeyPrefix(u8),
    /// Encoded key has depth zero but a parent fingerprint or child number
    InvalidMasterEncoding,
    /// Base58 encoding error
    Base58(bs58::decode::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;

        match *self {
            CannotDeriveFromHardenedKey =>
                f.write_str("cannot derive hardened key from public key"),
            Secp256k1(ref e) => write!(f, "secp256k1 error: {}", e),
            InvalidChildNumber(ref n) =>
                write!(f, "child number {} is invalid (not within [0, 2^31 - 1])", n),
            InvalidChildNumberFormat => f.write_str("invalid child number format"),
            InvalidDerivationPathFormat => f.write_str("invalid derivation path format"),
            InvalidSeedLength(len) =>
                write!(f, "seed length {} is not within [16, 64] bytes", len),
            InvalidMasterKey => f.write_str("seed produces an invalid master key"),
            InvalidChildKey(ref n) => write!(f, "child {} is not a valid key", n),
            MaxDepthExceeded => f.write_str("derivation depth exceeds 255"),
            UnknownVersion(ref bytes) => write!(f, "unknown version magic bytes: {:?}", bytes),
            WrongExtendedKeyLength(ref len) =>
                write!(f, "encoded extended key data has wrong length {}", len),
            InvalidPrivateKeyPrefix(ref b) =>
                write!(f, "encoded private key has prefix {:#04x}, expected 0x00", b),
            InvalidMasterEncoding =>
                f.write_str("depth zero key with non-zero parent fingerprint or child number"),
            Base58(ref e) => write!(f, "base58 encoding error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;

        match *self {
            Secp256k1(ref e) => Some(e),
            Base58(ref e) => Some(e),
            CannotDeriveFromHardenedKey
            | InvalidChildNumber(_)
            | InvalidChildNumberFormat
            | InvalidDerivationPathFormat
            | InvalidSeedLength(_)
            | InvalidMasterKey
            | InvalidChildKey(_)
            | MaxDepthExceeded
            | UnknownVersion(_)
            | WrongExtendedKeyLength(_)
            | InvalidPrivateKeyPrefix(_)
            | InvalidMasterEncoding => None,
        }
    }
}

impl From<secp256k1::Error> for Error {
    fn from(e: secp256k1::Error) -> Error { Error::Secp256k1(e) }
}

impl From<bs58::decode::Error> for Error {
    fn from(err: bs58::decode::Error) -> Self { Error::Base58(err) }
}

/// Fields shared by the private and public 78-byte encodings.
struct ExtendedKeyHeader {
    version: [u8; 4],
    depth: u8,
    parent_fingerprint: Fingerprint,
    child_number: ChildNumber,
    chain_code: ChainCode,
}

impl ExtendedKeyHeader {
    fn decode(data: &[u8]) -> Result<ExtendedKeyHeader, Error> {
        if data.len() != EXTENDED_KEY_LEN {
            return Err(Error::WrongExtendedKeyLength(data.len()));
        }

        let mut version = [0u8; 4];
        version.copy_from_slice(&data[0..4]);
        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&data[5..9]);
        let mut child_number = [0u8; 4];
        child_number.copy_from_slice(&data[9..13]);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&data[13..45]);

        let header = ExtendedKeyHeader {
            version,
            depth: data[4],
            parent_fingerprint: Fingerprint(parent_fingerprint),
            child_number: u32::from_be_bytes(child_number).into(),
            chain_code: ChainCode(chain_code),
        };
        if header.depth == 0
            && (header.parent_fingerprint != Fingerprint::default()
                || u32::from(header.child_number) != 0)
        {
            return Err(Error::InvalidMasterEncoding);
        }
        Ok(header)
    }

    fn encode_into(&self, ret: &mut [u8; EXTENDED_KEY_LEN]) {
        ret[0..4].copy_from_slice(&self.version);
        ret[4] = self.depth;
        ret[5..9].copy_from_slice(&self.parent_fingerprint[..]);
        ret[9..13].copy_from_slice(&u32::from(self.child_number).to_be_bytes());
        ret[13..45].copy_from_slice(&self.chain_code[..]);
    }
}

impl Xpriv {
    /// Construct a new master key from a seed value
    pub fn new_master(network: Network, seed: &[u8]) -> Result<Xpriv, Error> {
        if !SEED_LEN_RANGE.contains(&seed.len()) {
            return Err(Error::InvalidSeedLength(seed.len()));
        }
        let mut hmac_engine: HmacEngine<sha512::Hash> = HmacEngine::new(MASTER_KEY_HMAC_KEY);
        hmac_engine.input(seed);
        let hmac_result: Hmac<sha512::Hash> = Hmac::from_engine(hmac_engine);
        let (key, chain_code) = split_hmac(hmac_result);

        Ok(Xpriv {
            network,
            depth: 0,
            parent_fingerprint: Default::default(),
            child_number: ChildNumber::from_normal_idx(0)?,
            private_key: secp256k1::SecretKey::from_slice(&key)
                .map_err(|_| Error::InvalidMasterKey)?,
            chain_code,
        })
    }

    /// Constructs ECDSA compressed private key matching internal secret key representation.
    pub fn to_priv(self) -> PrivateKey {
        PrivateKey { compressed: true, network: self.network, inner: self.private_key }
    }

    /// Returns the raw 32-byte secret scalar.
    pub fn private_key_bytes(&self) -> [u8; 32] { self.private_key.secret_bytes() }

    /// Attempts to derive an extended private key from a path.
    ///
    /// The `path` argument can be both of type `DerivationPath` or `Vec<ChildNumber>`.
    pub fn derive_priv<C: secp256k1::Signing, P: AsRef<[ChildNumber]>>(
        &self,
        secp: &Secp256k1<C>,
        path: &P,
    ) -> Result<Xpriv, Error> {
        let mut sk: Xpriv = *self;
        for cnum in path.as_ref() {
            sk = sk.ckd_priv(secp, *cnum)?;
        }
        Ok(sk)
    }

    /// Private->Private child key derivation
    pub fn ckd_priv<C: secp256k1::Signing>(
        &self,
        secp: &Secp256k1<C>,
        i: ChildNumber,
    ) -> Result<Xpriv, Error> {
        let depth = self.depth.checked_add(1).ok_or(Error::MaxDepthExceeded)?;

        let mut hmac_engine: HmacEngine<sha512::Hash> = HmacEngine::new(&self.chain_code[..]);
        match i {
            ChildNumber::Normal { .. } => {
                // Non-hardened key: compute public data and use that
                hmac_engine.input(
                    &secp256k1::PublicKey::from_secret_key(secp, &self.private_key).serialize()[..],
                );
            }
            ChildNumber::Hardened { .. } => {
                // Hardened key: use only secret data to prevent public derivation
                hmac_engine.input(&[0u8]);
                hmac_engine.input(&self.private_key.secret_bytes()[..]);
            }
        }

        hmac_engine.input(&u32::from(i).to_be_bytes());
        let hmac_result: Hmac<sha512::Hash> = Hmac::from_engine(hmac_engine);
        let (tweak, chain_code) = split_hmac(hmac_result);

        // parse256(IL) >= n and a zero child key both make this index unusable.
        let tweak = Scalar::from_be_bytes(tweak).map_err(|_| Error::InvalidChildKey(i))?;
        let private_key =
            self.private_key.add_tweak(&tweak).map_err(|_| Error::InvalidChildKey(i))?;

        Ok(Xpriv {
            network: self.network,
            depth,
            parent_fingerprint: self.fingerprint(secp),
            child_number: i,
            private_key,
            chain_code,
        })
    }

    /// Decoding extended private key from binary data according to BIP 32
    pub fn decode(data: &[u8]) -> Result<Xpriv, Error> {
        let header = ExtendedKeyHeader::decode(data)?;
        let network = Network::from_xprv_version(header.version)
            .ok_or(Error::UnknownVersion(header.version))?;
        if data[45] != 0 {
            return Err(Error::InvalidPrivateKeyPrefix(data[45]));
        }

        Ok(Xpriv {
            network,
            depth: header.depth,
            parent_fingerprint: header.parent_fingerprint,
            child_number: header.child_number,
            chain_code: header.chain_code,
            private_key: secp256k1::SecretKey::from_slice(&data[46..78])?,
        })
    }

    /// Extended private key binary encoding according to BIP 32
    pub fn encode(&self) -> [u8; 78] {
        let mut ret = [0; EXTENDED_KEY_LEN];
        ExtendedKeyHeader {
            version: self.network.xprv_version(),
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            child_number: self.child_number,
            chain_code: self.chain_code,
        }
        .encode_into(&mut ret);
        ret[45] = 0;
        ret[46..78].copy_from_slice(&self.private_key.secret_bytes()[..]);
        ret
    }

    /// Returns the HASH160 of the public key belonging to the xpriv
    pub fn identifier<C: secp256k1::Signing>(&self, secp: &Secp256k1<C>) -> XKeyIdentifier {
        Xpub::from_priv(secp, self).identifier()
    }

    /// Returns the first four bytes of the identifier
    pub fn fingerprint<C: secp256k1::Signing>(&self, secp: &Secp256k1<C>) -> Fingerprint {
        self.identifier(secp).fingerprint()
    }
}

impl Xpub {
    /// Derives a public key from a private key
    pub fn from_priv<C: secp256k1::Signing>(secp: &Secp256k1<C>, sk: &Xpriv) -> Xpub {
        Xpub {
            network: sk.network,
            depth: sk.depth,
            parent_fingerprint: sk.parent_fingerprint,
            child_number: sk.child_number,
            public_key: secp256k1::PublicKey::from_secret_key(secp, &sk.private_key),
            chain_code: sk.chain_code,
        }
    }

    /// Constructs ECDSA compressed public key matching internal public key representation.
    pub fn to_pub(self) -> PublicKey { PublicKey { compressed: true, inner: self.public_key } }

    /// Attempts to derive an extended public key from a path.
    ///
    /// The `path` argument can be any type implementing `AsRef<ChildNumber>`, such as `DerivationPath`, for instance.
    pub fn derive_pub<C: secp256k1::Verification, P: AsRef<[ChildNumber]>>(
        &self,
        secp: &Secp256k1<C>,
        path: &P,
    ) -> Result<Xpub, Error> {
        let mut pk: Xpub = *self;
        for cnum in path.as_ref() {
            pk = pk.ckd_pub(secp, *cnum)?
        }
        Ok(pk)
    }

    /// Compute the scalar tweak added to this key to get a child key
    pub fn ckd_pub_tweak(&self, i: ChildNumber) -> Result<(Scalar, ChainCode), Error> {
        match i {
            ChildNumber::Hardened { .. } => Err(Error::CannotDeriveFromHardenedKey),
            ChildNumber::Normal { index: n } => {
                let mut hmac_engine: HmacEngine<sha512::Hash> =
                    HmacEngine::new(&self.chain_code[..]);
                hmac_engine.input(&self.public_key.serialize()[..]);
                hmac_engine.input(&n.to_be_bytes());

                let hmac_result: Hmac<sha512::Hash> = Hmac::from_engine(hmac_engine);
                let (tweak, chain_code) = split_hmac(hmac_result);
                let tweak = Scalar::from_be_bytes(tweak).map_err(|_| Error::InvalidChildKey(i))?;
                Ok((tweak, chain_code))
            }
        }
    }

    /// Public->Public child key derivation
    pub fn ckd_pub<C: secp256k1::Verification>(
        &self,
        secp: &Secp256k1<C>,
        i: ChildNumber,
    ) -> Result<Xpub, Error> {
        let depth = self.depth.checked_add(1).ok_or(Error::MaxDepthExceeded)?;
        let (tweak, chain_code) = self.ckd_pub_tweak(i)?;
        let tweaked =
            self.public_key.add_exp_tweak(secp, &tweak).map_err(|_| Error::InvalidChildKey(i))?;

        Ok(Xpub {
            network: self.network,
            depth,
            parent_fingerprint: self.fingerprint(),
            child_number: i,
            public_key: tweaked,
            chain_code,
        })
    }

    /// Decoding extended public key from binary data according to BIP 32
    pub fn decode(data: &[u8]) -> Result<Xpub, Error> {
        let header = ExtendedKeyHeader::decode(data)?;
        let network = Network::from_xpub_version(header.version)
            .ok_or(Error::UnknownVersion(header.version))?;

        Ok(Xpub {
            network,
            depth: header.depth,
            parent_fingerprint: header.parent_fingerprint,
            child_number: header.child_number,
            chain_code: header.chain_code,
            public_key: secp256k1::PublicKey::from_slice(&data[45..78])?,
        })
    }

    /// Extended public key binary encoding according to BIP 32
    pub fn encode(&self) -> [u8; 78] {
        let mut ret = [0; EXTENDED_KEY_LEN];
        ExtendedKeyHeader {
            version: self.network.xpub_version(),
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            child_number: self.child_number,
            chain_code: self.chain_code,
        }
        .encode_into(&mut ret);
        ret[45..78].copy_from_slice(&self.public_key.serialize()[..]);
        ret
    }

    /// Returns the HASH160 of the compressed public key
    pub fn identifier(&self) -> XKeyIdentifier {
        XKeyIdentifier::hash(&self.public_key.serialize())
    }

    /// Returns the first four bytes of the identifier
    pub fn fingerprint(&self) -> Fingerprint { self.identifier().fingerprint() }
}

impl fmt::Display for Xpriv {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(&bs58::encode(&self.encode()[..]).with_check().into_string())
    }
}

impl FromStr for Xpriv {
    type Err = Error;

    fn from_str(inp: &str) -> Result<Xpriv, Error> {
        let data = bs58::decode(inp).with_check(None).into_vec()?;
        Xpriv::decode(&data)
    }
}

impl fmt::Display for Xpub {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(&bs58::encode(&self.encode()[..]).with_check().into_string())
    }
}

impl FromStr for Xpub {
    type Err = Error;

    fn from_str(inp: &str) -> Result<Xpub, Error> {
        let data = bs58::decode(inp).with_check(None).into_vec()?;
        Xpub::decode(&data)
    }
}

impl From<Xpub> for XKeyIdentifier {
    fn from(key: Xpub) -> XKeyIdentifier { key.identifier() }
}

impl From<&Xpub> for XKeyIdentifier {
    fn from(key: &Xpub) -> XKeyIdentifier { key.identifier() }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use secp256k1::{self, Secp256k1};

    use super::ChildNumber::{Hardened, Normal};
    use super::*;
    use crate::network::Network::{self, Mainnet, Testnet};
    use crate::test_helpers::hex_bytes as hex;

    #[test]
    fn test_parse_derivation_path() {
        use Error::*;

        let bad_prefix = ["", "44'", "M/44'", "/44'/0'", "44'/m/0", "mm/0"];
        for s in bad_prefix.iter() {
            assert_eq!(DerivationPath::from_str(s), Err(InvalidDerivationPathFormat), "{}", s);
        }
        let bad_component =
            ["m/", "m//0", "m/44'/", "m/44''", "m/-1", "m/+7", "m/0x10", "m/h", "m/5000000000"];
        for s in bad_component.iter() {
            assert_eq!(DerivationPath::from_str(s), Err(InvalidChildNumberFormat), "{}", s);
        }
        assert_eq!(DerivationPath::from_str("m/44'/2147483648"), Err(InvalidChildNumber(1 << 31)));
        assert_eq!(DerivationPath::from_str("m/4294967295h"), Err(InvalidChildNumber(u32::MAX)));

        assert_eq!(DerivationPath::from_str("m"), Ok(DerivationPath::master()));
        assert_eq!(DerivationPath::master(), DerivationPath::default());
        assert!(DerivationPath::master().is_master());

        let bip44 = DerivationPath::from_str("m/44'/0'/3'/1/17").unwrap();
        assert_eq!(bip44.len(), 5);
        assert_eq!(bip44.to_u32_vec(), vec![0x8000_002c, 0x8000_0000, 0x8000_0003, 1, 17]);
        assert_eq!(bip44[3], Normal { index: 1 });

        // every hardened marker parses to the same path
        for s in ["m/44'/0'/3'/1/17", "m/44h/0h/3h/1/17", "m/44H/0H/3H/1/17", "m/44'/0h/3H/1/17"]
            .iter()
        {
            assert_eq!((*s).into_derivation_path(), Ok(bip44.clone()), "{}", s);
        }
        assert_eq!(bip44.to_string(), "m/44'/0'/3'/1/17");
        assert_eq!(format!("{:#}", bip44[0]), "44h");
        assert_eq!(
            "m/0/2147483647'".to_string().into_derivation_path().unwrap().to_string(),
            "m/0/2147483647'"
        );
    }

    #[test]
    fn test_derivation_path_conversion_index() {
        let path = DerivationPath::from_str("m/0h/1/2'").unwrap();
        let numbers: Vec<ChildNumber> = path.clone().into();
        let path2: DerivationPath = numbers.into();
        assert_eq!(path, path2);
        assert_eq!(
            &path[..2],
            &[ChildNumber::from_hardened_idx(0).unwrap(), ChildNumber::from_normal_idx(1).unwrap()]
        );
        let indexed: DerivationPath = path[..2].into();
        assert_eq!(indexed, DerivationPath::from_str("m/0h/1").unwrap());
        assert_eq!(indexed.child(ChildNumber::from_hardened_idx(2).unwrap()), path);
    }

    #[test]
    fn test_hardened_only() {
        assert!(DerivationPath::master().is_hardened_only());
        assert!(DerivationPath::from_str("m/44'/0'/7'").unwrap().is_hardened_only());
        assert!(!DerivationPath::from_str("m/44'/0'/0'/0/0").unwrap().is_hardened_only());

        let mut path = DerivationPath::from_str("m/1'").unwrap();
        path.push(ChildNumber::from_normal_idx(3).unwrap());
        assert_eq!(path.to_string(), "m/1'/3");
        assert_eq!(path.to_u32_vec(), vec![0x8000_0001, 3]);
    }

    fn test_path<C: secp256k1::Signing + secp256k1::Verification>(
        secp: &Secp256k1<C>,
        network: Network,
        seed: &[u8],
        path: DerivationPath,
        expected_sk: &str,
        expected_pk: &str,
    ) {
        let mut sk = Xpriv::new_master(network, seed).unwrap();
        let mut pk = Xpub::from_priv(secp, &sk);

        // Check derivation convenience method for Xpriv
        assert_eq!(&sk.derive_priv(secp, &path).unwrap().to_string()[..], expected_sk);

        // Check derivation convenience method for Xpub, should error
        // appropriately if any ChildNumber is hardened
        if path.0.iter().any(|cnum| cnum.is_hardened()) {
            assert_eq!(pk.derive_pub(secp, &path), Err(Error::CannotDeriveFromHardenedKey));
        } else {
            assert_eq!(&pk.derive_pub(secp, &path).unwrap().to_string()[..], expected_pk);
        }

        // Derive keys, checking hardened and non-hardened derivation one-by-one
        for &num in path.0.iter() {
            sk = sk.ckd_priv(secp, num).unwrap();
            match num {
                Normal { .. } => {
                    let pk2 = pk.ckd_pub(secp, num).unwrap();
                    pk = Xpub::from_priv(secp, &sk);
                    assert_eq!(pk, pk2);
                }
                Hardened { .. } => {
                    assert_eq!(pk.ckd_pub(secp, num), Err(Error::CannotDeriveFromHardenedKey));
                    pk = Xpub::from_priv(secp, &sk);
                }
            }
        }

        // Check result against expected base58
        assert_eq!(&sk.to_string()[..], expected_sk);
        assert_eq!(&pk.to_string()[..], expected_pk);
        // Check decoded base58 against result
        let decoded_sk = Xpriv::from_str(expected_sk);
        let decoded_pk = Xpub::from_str(expected_pk);
        assert_eq!(Ok(sk), decoded_sk);
        assert_eq!(Ok(pk), decoded_pk);
    }

    #[test]
    fn test_increment() {
        let cn = ChildNumber::from_normal_idx(19).unwrap();
        assert_eq!(cn.increment(), Ok(Normal { index: 20 }));
        let cn = ChildNumber::from_hardened_idx(44).unwrap();
        assert_eq!(cn.increment(), Ok(Hardened { index: 45 }));
        assert_eq!(cn.index(), 44);
        assert_eq!(u32::from(cn), 0x8000_002c);

        let last = (1 << 31) - 1;
        for cn in [Normal { index: last }, Hardened { index: last }].iter() {
            assert_eq!(cn.increment(), Err(Error::InvalidChildNumber(1 << 31)));
        }

        // address scanning below an account's receive chain
        let chain = DerivationPath::from_str("m/44'/0'/0'/0").unwrap();
        let addresses: Vec<String> = chain
            .children_from(ChildNumber::from_normal_idx(18).unwrap())
            .take(3)
            .map(|p| p.to_string())
            .collect();
        assert_eq!(addresses, ["m/44'/0'/0'/0/18", "m/44'/0'/0'/0/19", "m/44'/0'/0'/0/20"]);

        let accounts = DerivationPath::from_str("m/44'/1'").unwrap();
        let mut iter = accounts.hardened_children();
        assert_eq!(iter.next(), Some("m/44'/1'/0'".parse().unwrap()));
        assert_eq!(iter.next(), Some("m/44'/1'/1'".parse().unwrap()));
        let mut iter = accounts.normal_children();
        assert_eq!(iter.next(), Some("m/44'/1'/0".parse().unwrap()));

        // the iterator stops at the last index
        let mut iter = chain.children_from(Normal { index: last });
        assert_eq!(iter.next().map(|p| p.len()), Some(5));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_vector_1() {
        let secp = Secp256k1::new();
        let seed = hex("000102030405060708090a0b0c0d0e0f");

        // m
        test_path(&secp, Mainnet, &seed, "m".parse().unwrap(),
                  "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPPqjiChkVvvNKmPGJxWUtg6LnF5kejMRNNU3TGtRBeJgk33yuGBxrMPHi",
                  "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8");

        // m/0h
        test_path(&secp, Mainnet, &seed, "m/0h".parse().unwrap(),
                  "xprv9uHRZZhk6KAJC1avXpDAp4MDc3sQKNxDiPvvkX8Br5ngLNv1TxvUxt4cV1rGL5hj6KCesnDYUhd7oWgT11eZG7XnxHrnYeSvkzY7d2bhkJ7",
                  "xpub68Gmy5EdvgibQVfPdqkBBCHxA5htiqg55crXYuXoQRKfDBFA1WEjWgP6LHhwBZeNK1VTsfTFUHCdrfp1bgwQ9xv5ski8PX9rL2dZXvgGDnw");

        // m/0h/1
        test_path(&secp, Mainnet, &seed, "m/0h/1".parse().unwrap(),
                   "xprv9wTYmMFdV23N2TdNG573QoEsfRrWKQgWeibmLntzniatZvR9BmLnvSxqu53Kw1UmYPxLgboyZQaXwTCg8MSY3H2EU4pWcQDnRnrVA1xe8fs",
                   "xpub6ASuArnXKPbfEwhqN6e3mwBcDTgzisQN1wXN9BJcM47sSikHjJf3UFHKkNAWbWMiGj7Wf5uMash7SyYq527Hqck2AxYysAA7xmALppuCkwQ");

        // m/0h/1/2h
        test_path(&secp, Mainnet, &seed, "m/0h/1/2h".parse().unwrap(),
                  "xprv9z4pot5VBttmtdRTWfWQmoH1taj2axGVzFqSb8C9xaxKymcFzXBDptWmT7FwuEzG3ryjH4ktypQSAewRiNMjANTtpgP4mLTj34bhnZX7UiM",
                  "xpub6D4BDPcP2GT577Vvch3R8wDkScZWzQzMMUm3PWbmWvVJrZwQY4VUNgqFJPMM3No2dFDFGTsxxpG5uJh7n7epu4trkrX7x7DogT5Uv6fcLW5");

        // m/0h/1/2h/2
        test_path(&secp, Mainnet, &seed, "m/0h/1/2h/2".parse().unwrap(),
                  "xprvA2JDeKCSNNZky6uBCviVfJSKyQ1mDYahRjijr5idH2WwLsEd4Hsb2Tyh8RfQMuPh7f7RtyzTtdrbdqqsunu5Mm3wDvUAKRHSC34sJ7in334",
                  "xpub6FHa3pjLCk84BayeJxFW2SP4XRrFd1JYnxeLeU8EqN3vDfZmbqBqaGJAyiLjTAwm6ZLRQUMv1ZACTj37sR62cfN7fe5JnJ7dh8zL4fiyLHV");

        // m/0h/1/2h/2/1000000000
        test_path(&secp, Mainnet, &seed, "m/0h/1/2h/2/1000000000".parse().unwrap(),
                  "xprvA41z7zogVVwxVSgdKUHDy1SKmdb533PjDz7J6N6mV6uS3ze1ai8FHa8kmHScGpWmj4WggLyQjgPie1rFSruoUihUZREPSL39UNdE3BBDu76",
                  "xpub6H1LXWLaKsWFhvm6RVpEL9P4KfRZSW7abD2ttkWP3SSQvnyA8FSVqNTEcYFgJS2UaFcxupHiYkro49S8yGasTvXEYBVPamhGW6cFJodrTHy");
    }

    #[test]
    fn test_vector_2() {
        let secp = Secp256k1::new();
        let seed = hex("fffcf9f6f3f0edeae7e4e1dedbd8d5d2cfccc9c6c3c0bdbab7b4b1aeaba8a5a29f9c999693908d8a8784817e7b7875726f6c696663605d5a5754514e4b484542");

        // m
        test_path(&secp, Mainnet, &seed, "m".parse().unwrap(),
                  "xprv9s21ZrQH143K31xYSDQpPDxsXRTUcvj2iNHm5NUtrGiGG5e2DtALGdso3pGz6ssrdK4PFmM8NSpSBHNqPqm55Qn3LqFtT2emdEXVYsCzC2U",
                  "xpub661MyMwAqRbcFW31YEwpkMuc5THy2PSt5bDMsktWQcFF8syAmRUapSCGu8ED9W6oDMSgv6Zz8idoc4a6mr8BDzTJY47LJhkJ8UB7WEGuduB");

        // m/0
        test_path(&secp, Mainnet, &seed, "m/0".parse().unwrap(),
                  "xprv9vHkqa6EV4sPZHYqZznhT2NPtPCjKuDKGY38FBWLvgaDx45zo9WQRUT3dKYnjwih2yJD9mkrocEZXo1ex8G81dwSM1fwqWpWkeS3v86pgKt",
                  "xpub69H7F5d8KSRgmmdJg2KhpAK8SR3DjMwAdkxj3ZuxV27CprR9LgpeyGmXUbC6wb7ERfvrnKZjXoUmmDznezpbZb7ap6r1D3tgFxHmwMkQTPH");

        // m/0/2147483647h
        test_path(&secp, Mainnet, &seed, "m/0/2147483647h".parse().unwrap(),
                  "xprv9wSp6B7kry3Vj9m1zSnLvN3xH8RdsPP1Mh7fAaR7aRLcQMKTR2vidYEeEg2mUCTAwCd6vnxVrcjfy2kRgVsFawNzmjuHc2YmYRmagcEPdU9",
                  "xpub6ASAVgeehLbnwdqV6UKMHVzgqAG8Gr6riv3Fxxpj8ksbH9ebxaEyBLZ85ySDhKiLDBrQSARLq1uNRts8RuJiHjaDMBU4Zn9h8LZNnBC5y4a");

        // m/0/2147483647h/1
        test_path(&secp, Mainnet, &seed, "m/0/2147483647h/1".parse().unwrap(),
                  "xprv9zFnWC6h2cLgpmSA46vutJzBcfJ8yaJGg8cX1e5StJh45BBciYTRXSd25UEPVuesF9yog62tGAQtHjXajPPdbRCHuWS6T8XA2ECKADdw4Ef",
                  "xpub6DF8uhdarytz3FWdA8TvFSvvAh8dP3283MY7p2V4SeE2wyWmG5mg5EwVvmdMVCQcoNJxGoWaU9DCWh89LojfZ537wTfunKau47EL2dhHKon");

        // m/0/2147483647h/1/2147483646h
        test_path(&secp, Mainnet, &seed, "m/0/2147483647h/1/2147483646h".parse().unwrap(),
                  "xprvA1RpRA33e1JQ7ifknakTFpgNXPmW2YvmhqLQYMmrj4xJXXWYpDPS3xz7iAxn8L39njGVyuoseXzU6rcxFLJ8HFsTjSyQbLYnMpCqE2VbFWc",
                  "xpub6ERApfZwUNrhLCkDtcHTcxd75RbzS1ed54G1LkBUHQVHQKqhMkhgbmJbZRkrgZw4koxb5JaHWkY4ALHY2grBGRjaDMzQLcgJvLJuZZvRcEL");

        // m/0/2147483647h/1/2147483646h/2
        test_path(&secp, Mainnet, &seed, "m/0/2147483647h/1/2147483646h/2".parse().unwrap(),
                  "xprvA2nrNbFZABcdryreWet9Ea4LvTJcGsqrMzxHx98MMrotbir7yrKCEXw7nadnHM8Dq38EGfSh6dqA9QWTyefMLEcBYJUuekgW4BYPJcr9E7j",
                  "xpub6FnCn6nSzZAw5Tw7cgR9bi15UV96gLZhjDstkXXxvCLsUXBGXPdSnLFbdpq8p9HmGsApME5hQTZ3emM2rnY5agb9rXpVGyy3bdW6EEgAtqt");
    }

    #[test]
    fn test_vector_3() {
        let secp = Secp256k1::new();
        let seed = hex("4b381541583be4423346c643850da4b320e46a87ae3d2a4e6da11eba819cd4acba45d239319ac14f863b8d5ab5a0d0c64d2e8a1e7d1457df2e5a3c51c73235be");

        // m
        test_path(&secp, Mainnet, &seed, "m".parse().unwrap(),
                  "xprv9s21ZrQH143K25QhxbucbDDuQ4naNntJRi4KUfWT7xo4EKsHt2QJDu7KXp1A3u7Bi1j8ph3EGsZ9Xvz9dGuVrtHHs7pXeTzjuxBrCmmhgC6",
                  "xpub661MyMwAqRbcEZVB4dScxMAdx6d4nFc9nvyvH3v4gJL378CSRZiYmhRoP7mBy6gSPSCYk6SzXPTf3ND1cZAceL7SfJ1Z3GC8vBgp2epUt13");

        // m/0h
        test_path(&secp, Mainnet, &seed, "m/0h".parse().unwrap(),
                  "xprv9uPDJpEQgRQfDcW7BkF7eTya6RPxXeJCqCJGHuCJ4GiRVLzkTXBAJMu2qaMWPrS7AANYqdq6vcBcBUdJCVVFceUvJFjaPdGZ2y9WACViL4L",
                  "xpub68NZiKmJWnxxS6aaHmn81bvJeTESw724CRDs6HbuccFQN9Ku14VQrADWgqbhhTHBaohPX4CjNLf9fq9MYo6oDaPPLPxSb7gwQN3ih19Zm4Y");
    }

    #[test]
    fn test_master_key_attributes() {
        let secp = Secp256k1::new();
        let seed = hex("000102030405060708090a0b0c0d0e0f");
        let master = Xpriv::new_master(Mainnet, &seed).unwrap();

        assert_eq!(master.depth, 0);
        assert_eq!(master.parent_fingerprint, Fingerprint::default());
        assert_eq!(u32::from(master.child_number), 0);
        assert_eq!(
            master.private_key_bytes().to_vec(),
            hex("e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35")
        );
        assert_eq!(
            master.chain_code.to_string(),
            "873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508"
        );
        assert_eq!(master.fingerprint(&secp).to_string(), "3442193e");

        let fp = master.fingerprint(&secp);
        assert_eq!(fp[0], 0x34);
        assert_eq!(fp[1..3], [0x42, 0x19]);
        assert_eq!(master.chain_code[..4], [0x87, 0x3d, 0xff, 0x81]);

        let child = master.ckd_priv(&secp, ChildNumber::from_hardened_idx(0).unwrap()).unwrap();
        assert_eq!(child.parent_fingerprint, master.fingerprint(&secp));
        assert_eq!(child.depth, 1);
    }

    #[test]
    fn test_testnet_encoding() {
        let secp = Secp256k1::new();
        let seed = hex("000102030405060708090a0b0c0d0e0f");
        let master = Xpriv::new_master(Testnet, &seed).unwrap();
        let xpub = Xpub::from_priv(&secp, &master);

        let sk_str = master.to_string();
        let pk_str = xpub.to_string();
        assert!(sk_str.starts_with("tprv"));
        assert!(pk_str.starts_with("tpub"));
        assert_eq!(Xpriv::from_str(&sk_str), Ok(master));
        assert_eq!(Xpub::from_str(&pk_str), Ok(xpub));
    }

    #[test]
    fn test_decode_errors() {
        let secp = Secp256k1::new();
        let seed = hex("000102030405060708090a0b0c0d0e0f");
        let master = Xpriv::new_master(Mainnet, &seed).unwrap();
        let xpub = Xpub::from_priv(&secp, &master);

        assert_eq!(Xpriv::decode(&master.encode()[..77]), Err(Error::WrongExtendedKeyLength(77)));
        assert_eq!(
            Xpriv::decode(&xpub.encode()),
            Err(Error::UnknownVersion([0x04, 0x88, 0xB2, 0x1E]))
        );
        assert_eq!(
            Xpub::decode(&master.encode()),
            Err(Error::UnknownVersion([0x04, 0x88, 0xAD, 0xE4]))
        );

        let mut data = master.encode();
        data[45] = 1;
        assert_eq!(Xpriv::decode(&data), Err(Error::InvalidPrivateKeyPrefix(1)));

        let mut data = master.encode();
        data[5] = 1;
        assert_eq!(Xpriv::decode(&data), Err(Error::InvalidMasterEncoding));

        let mut data = xpub.encode();
        data[12] = 1;
        assert_eq!(Xpub::decode(&data), Err(Error::InvalidMasterEncoding));

        let mut data = xpub.encode();
        data[45] = 0x05;
        assert_eq!(
            Xpub::decode(&data),
            Err(Error::Secp256k1(secp256k1::Error::InvalidPublicKey))
        );

        assert!(matches!(Xpriv::from_str("xprv"), Err(Error::Base58(_))));
    }

    #[test]
    fn test_master_seed_length() {
        for &len in [0usize, 1, 15, 65, 128].iter() {
            assert_eq!(
                Xpriv::new_master(Mainnet, &vec![0x5a; len]),
                Err(Error::InvalidSeedLength(len))
            );
        }
        assert_eq!(Xpriv::new_master(Mainnet, &[0x5a; 16]).unwrap().depth, 0);
        assert_eq!(Xpriv::new_master(Testnet, &[0x5a; 64]).unwrap().network, Testnet);
    }

    #[test]
    fn test_max_depth() {
        let secp = Secp256k1::new();
        let seed = hex("000102030405060708090a0b0c0d0e0f");
        let mut deep = Xpriv::new_master(Mainnet, &seed).unwrap();
        deep.depth = u8::max_value();

        let cn = ChildNumber::from_normal_idx(0).unwrap();
        assert_eq!(deep.ckd_priv(&secp, cn), Err(Error::MaxDepthExceeded));
        assert_eq!(Xpub::from_priv(&secp, &deep).ckd_pub(&secp, cn), Err(Error::MaxDepthExceeded));
    }

    #[test]
    #[cfg(feature = "serde")]
    pub fn encode_decode_childnumber() {
        serde_round_trip!(ChildNumber::from_normal_idx(0).unwrap());
        serde_round_trip!(ChildNumber::from_normal_idx(1).unwrap());
        serde_round_trip!(ChildNumber::from_normal_idx((1 << 31) - 1).unwrap());
        serde_round_trip!(ChildNumber::from_hardened_idx(0).unwrap());
        serde_round_trip!(ChildNumber::from_hardened_idx(1).unwrap());
        serde_round_trip!(ChildNumber::from_hardened_idx((1 << 31) - 1).unwrap());
    }

    #[test]
    #[cfg(feature = "serde")]
    pub fn encode_fingerprint_chaincode() {
        use serde_json;
        let fp = Fingerprint::from([1u8, 2, 3, 42]);
        #[rustfmt::skip]
        let cc = ChainCode::from(
            [1u8,2,3,4,5,6,7,8,9,0,1,2,3,4,5,6,7,8,9,0,1,2,3,4,5,6,7,8,9,0,1,2]
        );

        serde_round_trip!(fp);
        serde_round_trip!(cc);

        assert_eq!("\"0102032a\"", serde_json::to_string(&fp).unwrap());
        assert_eq!(
            "\"0102030405060708090001020304050607080900010203040506070809000102\"",
            serde_json::to_string(&cc).unwrap()
        );
        assert_eq!("0102032a", fp.to_string());
        assert_eq!(
            "0102030405060708090001020304050607080900010203040506070809000102",
            cc.to_string()
        );
    }

    #[test]
    #[cfg(feature = "serde")]
    pub fn encode_decode_path_and_keys() {
        let path = DerivationPath::from_str("m/44'/0'/0'/1/5").unwrap();
        serde_round_trip!(path);
        assert_eq!("\"m/44'/0'/0'/1/5\"", serde_json::to_string(&path).unwrap());

        let seed = hex("000102030405060708090a0b0c0d0e0f");
        let master = Xpriv::new_master(Mainnet, &seed).unwrap();
        serde_round_trip!(master);
        serde_round_trip!(Xpub::from_priv(&Secp256k1::new(), &master));
    }

    #[test]
    fn fmt_child_number() {
        assert_eq!("000005h", &format!("{:#06}", ChildNumber::from_hardened_idx(5).unwrap()));
        assert_eq!("5h", &format!("{:#}", ChildNumber::from_hardened_idx(5).unwrap()));
        assert_eq!("000005'", &format!("{:06}", ChildNumber::from_hardened_idx(5).unwrap()));
        assert_eq!("5'", &format!("{}", ChildNumber::from_hardened_idx(5).unwrap()));
        assert_eq!("42", &format!("{}", ChildNumber::from_normal_idx(42).unwrap()));
        assert_eq!("000042", &format!("{:06}", ChildNumber::from_normal_idx(42).unwrap()));
    }

    #[test]
    fn debug_hides_private_key() {
        let seed = hex("000102030405060708090a0b0c0d0e0f");
        let master = Xpriv::new_master(Mainnet, &seed).unwrap();
        let debug = format!("{:?}", master);
        assert!(debug.contains("[SecretKey]"));
        assert!(!debug.contains("e8f32e72"));
    }

    #[test]
    fn broken_privkey_zeros() {
        // Xpriv having secret key set to all zeros
        let xpriv_str = "xprv9s21ZrQH143K24Mfq5zL5MhWK9hUhhGbd45hLXo2Pq2oqzMMo63oStZzF93Y5wvzdUayhgkkFoicQZcP3y52uPPxFnfoLZB21Teqt1VvEHx";
        assert_eq!(
            Xpriv::from_str(xpriv_str),
            Err(Error::Secp256k1(secp256k1::Error::InvalidSecretKey))
        );
    }

    #[test]
    fn broken_privkey_ffs() {
        // Xpriv having secret key set to all 0xFF's
        let xpriv_str = "xprv9s21ZrQH143K24Mfq5zL5MhWK9hUhhGbd45hLXo2Pq2oqzMMo63oStZzFAzHGBP2UuGCqWLTAPLcMtD9y5gkZ6Eq3Rjuahrv17fENZ3QzxW";
        assert_eq!(
            Xpriv::from_str(xpriv_str),
            Err(Error::Secp256k1(secp256k1::Error::InvalidSecretKey))
        );
    }
}
