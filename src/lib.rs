// SPDX-License-Identifier: CC0-1.0

//! # hdkey
//!
//! Hierarchical deterministic key derivation over secp256k1: BIP39 mnemonic
//! sentences and seeds, BIP32 extended keys and derivation paths, and the
//! BIP44 multi-account hierarchy.
//!
//! Elliptic curve arithmetic is done by libsecp256k1 through the
//! `secp256k1` crate, hashing by `bitcoin_hashes`.
//!
//! # Example
//!
//! ```rust
//! use hdkey::{HdWallet, Mnemonic, Network};
//!
//! let mnemonic = Mnemonic::parse(
//!     "legal winner thank year wave sausage worth useful legal winner thank yellow",
//! ).unwrap();
//! let wallet = HdWallet::from_mnemonic(Network::Mainnet, &mnemonic, "TREZOR").unwrap();
//! assert_eq!(
//!     wallet.master_key().to_string(),
//!     "xprv9s21ZrQH143K2gA81bYFHqU68xz1cX2APaSq5tt6MFSLeXnCKV1RVUJt9FWNTbrrryem4ZckN8k4Ls1H6nwdvDTvnV7zEXs2HgPezuVccsq",
//! );
//!
//! let key = wallet.derive("m/44'/0'/0'/0/0").unwrap();
//! assert_eq!(key.depth, 5);
//! ```

#![crate_name = "hdkey"]
// Coding conventions
#![forbid(unsafe_code)]
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![deny(dead_code)]
#![deny(unused_imports)]
#![deny(missing_docs)]

// Re-exported dependencies.
pub extern crate bitcoin_hashes as hashes;
pub extern crate secp256k1;

#[cfg(target_pointer_width = "16")]
compile_error!("hdkey cannot be used on 16-bit architectures");

#[cfg(test)]
#[macro_use]
mod test_macros;
#[cfg(test)]
mod test_helpers;
mod internal_macros;

pub mod bip32;
pub mod bip44;
pub mod error;
pub mod key;
pub mod mnemonic;
pub mod network;
pub mod seed;
#[cfg(feature = "serde")]
pub mod vectors;
pub mod wallet;

pub use crate::bip32::{ChildNumber, DerivationPath, Fingerprint, Xpriv, Xpub};
pub use crate::bip44::{Bip44Path, Change};
pub use crate::error::{Error, Result};
pub use crate::key::{PrivateKey, PublicKey};
pub use crate::mnemonic::Mnemonic;
pub use crate::network::Network;
pub use crate::seed::Seed;
pub use crate::wallet::HdWallet;
