// SPDX-License-Identifier: CC0-1.0

//! BIP44 multi-account hierarchy.
//!
//! Paths have five levels, `m / purpose' / coin_type' / account' / change /
//! address_index`, with the purpose fixed to 44. See
//! <https://github.com/bitcoin/bips/blob/master/bip-0044.mediawiki>.
//!
//! # Example
//!
//! ```rust
//! use hdkey::bip44::{coin_type, Bip44Path, Change};
//!
//! let path = Bip44Path::new(coin_type::BITCOIN, 0, Change::External, 5).unwrap();
//! assert_eq!(path.to_string(), "m/44'/0'/0'/0/5");
//! assert_eq!("m/44'/0'/0'/0/5".parse::<Bip44Path>().unwrap(), path);
//! ```

use core::convert::TryFrom;
use core::fmt;
use core::str::FromStr;

use crate::bip32::{self, ChildNumber, DerivationPath};
use crate::error::{Error, Result};
use crate::internal_macros::serde_string_impl;

/// Purpose level of every BIP44 path.
pub const PURPOSE: u32 = 44;

/// Registered coin types, see SLIP-44.
pub mod coin_type {
    /// Bitcoin mainnet
    pub const BITCOIN: u32 = 0;
    /// Any test network
    pub const TESTNET: u32 = 1;
}

/// The change level of a BIP44 path.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Change {
    /// Receiving addresses, visible outside the wallet
    External = 0,
    /// Change addresses
    Internal = 1,
}

impl Change {
    /// The normal child number of this level.
    pub fn child_number(self) -> ChildNumber { ChildNumber::Normal { index: self as u32 } }
}

impl TryFrom<u32> for Change {
    type Error = u32;

    fn try_from(index: u32) -> core::result::Result<Change, u32> {
        match index {
            0 => Ok(Change::External),
            1 => Ok(Change::Internal),
            other => Err(other),
        }
    }
}

/// A full five-level BIP44 path.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Bip44Path {
    coin_type: u32,
    account: u32,
    change: Change,
    address_index: u32,
}
serde_string_impl!(Bip44Path, "a BIP44 derivation path");

impl Bip44Path {
    /// Creates a path, checking every index is below 2^31.
    pub fn new(
        coin_type: u32,
        account: u32,
        change: Change,
        address_index: u32,
    ) -> core::result::Result<Bip44Path, bip32::Error> {
        ChildNumber::from_hardened_idx(coin_type)?;
        ChildNumber::from_hardened_idx(account)?;
        ChildNumber::from_normal_idx(address_index)?;
        Ok(Bip44Path { coin_type, account, change, address_index })
    }

    /// The account level path `m/44'/coin_type'/account'`.
    pub fn account_path(
        coin_type: u32,
        account: u32,
    ) -> core::result::Result<DerivationPath, bip32::Error> {
        Ok(DerivationPath::from(vec![
            ChildNumber::from_hardened_idx(PURPOSE)?,
            ChildNumber::from_hardened_idx(coin_type)?,
            ChildNumber::from_hardened_idx(account)?,
        ]))
    }

    /// Coin type level, without the hardened bit.
    pub fn coin_type(&self) -> u32 { self.coin_type }

    /// Account level, without the hardened bit.
    pub fn account(&self) -> u32 { self.account }

    /// Change level.
    pub fn change(&self) -> Change { self.change }

    /// Address index level.
    pub fn address_index(&self) -> u32 { self.address_index }

    /// Expands the path into its five child numbers.
    pub fn to_derivation_path(&self) -> DerivationPath {
        DerivationPath::from(vec![
            ChildNumber::Hardened { index: PURPOSE },
            ChildNumber::Hardened { index: self.coin_type },
            ChildNumber::Hardened { index: self.account },
            self.change.child_number(),
            ChildNumber::Normal { index: self.address_index },
        ])
    }
}

impl<'a> TryFrom<&'a DerivationPath> for Bip44Path {
    type Error = Error;

    fn try_from(path: &'a DerivationPath) -> Result<Bip44Path> {
        use ChildNumber::{Hardened, Normal};

        let invalid = || Error::InvalidBip44Path(path.clone());

        match *path.as_ref() {
            [
                Hardened { index: PURPOSE },
                Hardened { index: coin_type },
                Hardened { index: account },
                Normal { index: change },
                Normal { index: address_index },
            ] => Ok(Bip44Path {
                coin_type,
                account,
                change: Change::try_from(change).map_err(|_| invalid())?,
                address_index,
            }),
            _ => Err(invalid()),
        }
    }
}

impl From<Bip44Path> for DerivationPath {
    fn from(path: Bip44Path) -> DerivationPath { path.to_derivation_path() }
}

impl fmt::Display for Bip44Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.to_derivation_path(), f)
    }
}

impl FromStr for Bip44Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Bip44Path> { Bip44Path::try_from(&s.parse::<DerivationPath>()?) }
}
