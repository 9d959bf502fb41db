// Copyright 2021-2023 Protocol Labs
// SPDX-License-Identifier: Apache-2.0, MIT

use std::hash::Hash;

use super::{Error, Kind, PAYLOAD_LEN};

/// Payload is the data of the Address. Variants are the supported address
/// kinds.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "arb", derive(arbitrary::Arbitrary))]
pub enum Payload {
    /// Digest of an Ed25519 public key.
    Ed25519([u8; PAYLOAD_LEN]),
    /// Digest identifying an alias output.
    Alias([u8; PAYLOAD_LEN]),
    /// Digest identifying an NFT output.
    Nft([u8; PAYLOAD_LEN]),
}

impl Payload {
    /// Returns the payload digest without the kind byte.
    pub fn to_raw_bytes(self) -> Vec<u8> {
        use Payload::*;
        match self {
            Ed25519(arr) | Alias(arr) | Nft(arr) => arr.to_vec(),
        }
    }

    /// Returns encoded bytes of the payload including the kind byte.
    pub fn to_bytes(self) -> Vec<u8> {
        let mut bz = self.to_raw_bytes();
        bz.insert(0, Kind::from(self).to_byte());
        bz
    }

    /// Generates payload from raw digest bytes and a kind.
    pub fn new(kind: Kind, payload: &[u8]) -> Result<Self, Error> {
        let digest: [u8; PAYLOAD_LEN] = payload
            .try_into()
            .map_err(|_| Error::InvalidPayloadLength(payload.len()))?;
        Ok(match kind {
            Kind::Ed25519 => Self::Ed25519(digest),
            Kind::Alias => Self::Alias(digest),
            Kind::Nft => Self::Nft(digest),
        })
    }
}

impl From<Payload> for Kind {
    fn from(pl: Payload) -> Self {
        match pl {
            Payload::Ed25519(_) => Self::Ed25519,
            Payload::Alias(_) => Self::Alias,
            Payload::Nft(_) => Self::Nft,
        }
    }
}

impl From<&Payload> for Kind {
    fn from(pl: &Payload) -> Self {
        match pl {
            Payload::Ed25519(_) => Self::Ed25519,
            Payload::Alias(_) => Self::Alias,
            Payload::Nft(_) => Self::Nft,
        }
    }
}
