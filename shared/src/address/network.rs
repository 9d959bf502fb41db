// Copyright 2021-2023 Protocol Labs
// SPDX-License-Identifier: Apache-2.0, MIT

//! Network selection for address text rendering.
//!
//! The network never changes an address's payload or byte encoding. It only
//! picks the human-readable prefix of the string form: `iota` on mainnet,
//! `atoi` (the reversal) on testnet, so a pasted testnet address can never
//! be mistaken for a mainnet one.

use std::sync::atomic::{AtomicU8, Ordering};

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};

use super::{Address, Error};

/// Mainnet address text prefix.
const MAINNET_PREFIX: &str = "iota";
/// Testnet address text prefix.
const TESTNET_PREFIX: &str = "atoi";

static ATOMIC_NETWORK: AtomicU8 = AtomicU8::new(0);

/// The ledger network an address string is rendered for.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, FromPrimitive, ToPrimitive)]
#[repr(u8)]
#[cfg_attr(feature = "arb", derive(arbitrary::Arbitrary))]
pub enum Network {
    Mainnet = 0,
    Testnet = 1,
}

impl Default for Network {
    fn default() -> Self {
        Network::Mainnet
    }
}

impl Network {
    /// The prefix this network puts in front of rendered addresses.
    pub fn prefix(self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_PREFIX,
            Network::Testnet => TESTNET_PREFIX,
        }
    }

    /// Parses an address string, requiring this network's prefix. Use the
    /// [`FromStr`](std::str::FromStr) impl on [`Address`] to accept either
    /// network.
    pub fn parse_address(self, addr: &str) -> Result<Address, Error> {
        let encoded = addr
            .strip_prefix(self.prefix())
            .ok_or(Error::UnknownNetwork)?;
        super::parse_encoded(encoded)
    }

    /// Recognizes the network prefix of an address string and returns the
    /// remainder.
    pub(super) fn split_prefix(addr: &str) -> Result<(Network, &str), Error> {
        for network in [Network::Mainnet, Network::Testnet] {
            if let Some(rest) = addr.strip_prefix(network.prefix()) {
                return Ok((network, rest));
            }
        }
        Err(Error::UnknownNetwork)
    }
}

/// The process-wide network addresses are rendered for.
pub fn default_network() -> Network {
    Network::from_u8(ATOMIC_NETWORK.load(Ordering::Relaxed)).unwrap_or_default()
}

/// Repoints address rendering at another network. Takes effect process-wide.
pub fn set_default_network(network: Network) {
    ATOMIC_NETWORK.store(network.to_u8().unwrap_or_default(), Ordering::Relaxed)
}
