// SPDX-License-Identifier: CC0-1.0

//! Key networks.
//!
//! The [`Network`] a key belongs to decides the version bytes of its
//! serialized extended form (`xprv`/`tprv`), the prefix of its WIF encoding
//! and the BIP44 coin type used by default for account paths.
//!
//! # Example: choosing version bytes
//!
//! ```rust
//! use hdkey::Network;
//!
//! let network: Network = "test".parse().unwrap();
//! assert_eq!(network.xprv_version(), [0x04, 0x35, 0x83, 0x94]);
//! assert_eq!(network.to_string(), "test");
//! ```

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Version bytes for extended private keys on mainnet.
const VERSION_BYTES_MAINNET_PRIVATE: [u8; 4] = [0x04, 0x88, 0xAD, 0xE4];
/// Version bytes for extended public keys on mainnet.
const VERSION_BYTES_MAINNET_PUBLIC: [u8; 4] = [0x04, 0x88, 0xB2, 0x1E];
/// Version bytes for extended private keys on testnet.
const VERSION_BYTES_TESTNET_PRIVATE: [u8; 4] = [0x04, 0x35, 0x83, 0x94];
/// Version bytes for extended public keys on testnet.
const VERSION_BYTES_TESTNET_PUBLIC: [u8; 4] = [0x04, 0x35, 0x87, 0xCF];

/// The network a key is meant to be used on.
#[derive(Copy, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub enum Network {
    /// Main network
    #[cfg_attr(feature = "serde", serde(rename = "main"))]
    Mainnet,
    /// Test network
    #[cfg_attr(feature = "serde", serde(rename = "test"))]
    Testnet,
}

impl Network {
    /// All supported networks.
    pub const ALL: [Network; 2] = [Network::Mainnet, Network::Testnet];

    /// Converts a `Network` to its `-chain` argument name.
    pub fn to_core_arg(self) -> &'static str {
        match self {
            Network::Mainnet => "main",
            Network::Testnet => "test",
        }
    }

    /// Converts a `-chain` argument name to its equivalent `Network`.
    pub fn from_core_arg(core_arg: &str) -> Result<Self, ParseNetworkError> {
        use Network::*;

        let network = match core_arg {
            "main" => Mainnet,
            "test" => Testnet,
            _ => return Err(ParseNetworkError(core_arg.to_owned())),
        };
        Ok(network)
    }

    /// Version bytes of an extended private key on this network.
    pub fn xprv_version(self) -> [u8; 4] {
        match self {
            Network::Mainnet => VERSION_BYTES_MAINNET_PRIVATE,
            Network::Testnet => VERSION_BYTES_TESTNET_PRIVATE,
        }
    }

    /// Version bytes of an extended public key on this network.
    pub fn xpub_version(self) -> [u8; 4] {
        match self {
            Network::Mainnet => VERSION_BYTES_MAINNET_PUBLIC,
            Network::Testnet => VERSION_BYTES_TESTNET_PUBLIC,
        }
    }

    /// Looks up the network of extended private key version bytes.
    pub fn from_xprv_version(version: [u8; 4]) -> Option<Network> {
        Network::ALL.iter().copied().find(|n| n.xprv_version() == version)
    }

    /// Looks up the network of extended public key version bytes.
    pub fn from_xpub_version(version: [u8; 4]) -> Option<Network> {
        Network::ALL.iter().copied().find(|n| n.xpub_version() == version)
    }

    /// Prefix byte of a WIF encoded private key.
    pub fn wif_prefix(self) -> u8 {
        match self {
            Network::Mainnet => 0x80,
            Network::Testnet => 0xEF,
        }
    }

    /// Looks up the network of a WIF prefix byte.
    pub fn from_wif_prefix(prefix: u8) -> Option<Network> {
        Network::ALL.iter().copied().find(|n| n.wif_prefix() == prefix)
    }

    /// BIP44 coin type used for account paths on this network.
    ///
    /// Every test network shares coin type 1, see SLIP-44.
    pub fn coin_type(self) -> u32 {
        match self {
            Network::Mainnet => crate::bip44::coin_type::BITCOIN,
            Network::Testnet => crate::bip44::coin_type::TESTNET,
        }
    }
}

/// An error in parsing network string.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ParseNetworkError(pub String);

impl fmt::Display for ParseNetworkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "failed to parse {} as network", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseNetworkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> { None }
}

impl FromStr for Network {
    type Err = ParseNetworkError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> { Network::from_core_arg(s) }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.to_core_arg())
    }
}
