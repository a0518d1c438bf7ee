// SPDX-License-Identifier: CC0-1.0

//! HD wallets.
//!
//! [`HdWallet`] keeps a master extended private key together with a signing
//! and verification context, and derives child keys from it by path.
//!
//! # Example
//!
//! ```rust
//! use hdkey::{HdWallet, Mnemonic, Network};
//!
//! let mnemonic = Mnemonic::parse(
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
//! ).unwrap();
//! let wallet = HdWallet::from_mnemonic(Network::Mainnet, &mnemonic, "").unwrap();
//! let key = wallet.receive_key(0, 0).unwrap();
//! assert_eq!(key.depth, 5);
//! ```

use core::fmt;

use secp256k1::{All, Secp256k1};

use crate::bip32::{DerivationPath, Fingerprint, IntoDerivationPath, Xpriv, Xpub};
use crate::bip44::{Bip44Path, Change};
use crate::error::Result;
use crate::mnemonic::Mnemonic;
use crate::network::Network;
use crate::seed::Seed;

/// A master key and the context used to derive from it.
#[derive(Clone)]
pub struct HdWallet {
    master: Xpriv,
    secp: Secp256k1<All>,
}

impl HdWallet {
    /// Wraps an existing master key.
    pub fn from_master(master: Xpriv) -> HdWallet { HdWallet { master, secp: Secp256k1::new() } }

    /// Generates the master key of `seed`.
    pub fn from_seed(network: Network, seed: &Seed) -> Result<HdWallet> {
        let master = Xpriv::new_master(network, seed.as_bytes())?;
        let wallet = HdWallet::from_master(master);
        tracing::debug!(%network, fingerprint = %wallet.fingerprint(), "created wallet from seed");
        Ok(wallet)
    }

    /// Generates the master key of a mnemonic sentence and passphrase.
    pub fn from_mnemonic(
        network: Network,
        mnemonic: &Mnemonic,
        passphrase: &str,
    ) -> Result<HdWallet> {
        HdWallet::from_seed(network, &mnemonic.to_seed(passphrase))
    }

    /// Network of the master key.
    pub fn network(&self) -> Network { self.master.network }

    /// The master extended private key.
    pub fn master_key(&self) -> &Xpriv { &self.master }

    /// The master extended public key.
    pub fn master_xpub(&self) -> Xpub { Xpub::from_priv(&self.secp, &self.master) }

    /// Fingerprint of the master key.
    pub fn fingerprint(&self) -> Fingerprint { self.master.fingerprint(&self.secp) }

    /// The context keys are derived with.
    pub fn secp(&self) -> &Secp256k1<All> { &self.secp }

    /// Derives the extended private key at `path`.
    pub fn derive<P: IntoDerivationPath>(&self, path: P) -> Result<Xpriv> {
        let path: DerivationPath = path.into_derivation_path()?;
        let key = self.master.derive_priv(&self.secp, &path)?;
        tracing::debug!(
            %path,
            master = %self.fingerprint(),
            parent = %key.parent_fingerprint,
            "derived private key"
        );
        Ok(key)
    }

    /// Derives the extended public key at `path`.
    ///
    /// Hardened steps are allowed since derivation starts from the master
    /// private key.
    pub fn derive_pub<P: IntoDerivationPath>(&self, path: P) -> Result<Xpub> {
        Ok(Xpub::from_priv(&self.secp, &self.derive(path)?))
    }

    /// The BIP44 account key `m/44'/coin_type'/account'`, with the coin
    /// type of the wallet's network.
    pub fn bip44_account(&self, account: u32) -> Result<Xpriv> {
        self.derive(Bip44Path::account_path(self.network().coin_type(), account)?)
    }

    /// The key at a full BIP44 path.
    pub fn bip44_key(&self, path: &Bip44Path) -> Result<Xpriv> { self.derive(*path) }

    /// The receiving key `m/44'/coin_type'/account'/0/index`.
    pub fn receive_key(&self, account: u32, index: u32) -> Result<Xpriv> {
        self.bip44_leaf(account, Change::External, index)
    }

    /// The change key `m/44'/coin_type'/account'/1/index`.
    pub fn change_key(&self, account: u32, index: u32) -> Result<Xpriv> {
        self.bip44_leaf(account, Change::Internal, index)
    }

    fn bip44_leaf(&self, account: u32, change: Change, index: u32) -> Result<Xpriv> {
        let path = Bip44Path::new(self.network().coin_type(), account, change, index)?;
        self.bip44_key(&path)
    }
}

impl fmt::Debug for HdWallet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("HdWallet")
            .field("network", &self.master.network)
            .field("master_key", &"[hidden]")
            .finish()
    }
}
