// Copyright 2021-2023 Protocol Labs
// SPDX-License-Identifier: Apache-2.0, MIT

//! Layer-1 ledger addresses.
//!
//! An address is a tagged 32-byte digest. Its canonical byte encoding is the
//! kind byte followed by the digest, and that encoding is what crosses the
//! contract boundary inside [`crate::evm::L1Address`]. The string form
//! appends a BLAKE2b checksum and renders base32 behind the network prefix.

mod errors;
mod network;
mod payload;

use std::fmt;
use std::str::FromStr;

use data_encoding::Encoding;
use data_encoding_macro::new_encoding;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::{de, ser};

pub use self::errors::Error;
pub use self::network::{default_network, set_default_network, Network};
pub use self::payload::Payload;

/// Length in bytes of the digest carried by every address payload.
pub const PAYLOAD_LEN: usize = 32;

/// Length in bytes of the canonical address encoding: kind byte plus digest.
pub const ENCODED_LEN: usize = PAYLOAD_LEN + 1;

/// Length in bytes of the checksum appended to the string form.
pub const CHECKSUM_LEN: usize = 4;

// RFC4648 lowercase base32, no padding.
const ADDRESS_ENCODER: Encoding = new_encoding! {
    symbols: "abcdefghijklmnopqrstuvwxyz234567",
    padding: None,
};

/// Kind discriminates the supported address flavors. The numeric values are
/// the kind bytes of the canonical encoding.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, FromPrimitive)]
#[repr(u8)]
#[cfg_attr(feature = "arb", derive(arbitrary::Arbitrary))]
pub enum Kind {
    /// Address derived from an Ed25519 public key.
    Ed25519 = 0,
    /// Address of an alias output.
    Alias = 8,
    /// Address of an NFT output.
    Nft = 16,
}

impl Kind {
    /// Returns the kind byte used in the canonical encoding.
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// Parses a kind byte.
    pub fn from_byte(b: u8) -> Result<Self, Error> {
        Self::from_u8(b).ok_or(Error::UnknownKind(b))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Ed25519 => "ed25519",
            Kind::Alias => "alias",
            Kind::Nft => "nft",
        })
    }
}

/// A layer-1 ledger address.
///
/// Addresses are network-agnostic: the network only selects the prefix of
/// the string form, so two addresses with equal payloads compare equal no
/// matter which network the process is configured for.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub struct Address {
    payload: Payload,
}

impl Address {
    /// Address backed by an Ed25519 public key digest.
    pub const fn new_ed25519(digest: [u8; PAYLOAD_LEN]) -> Self {
        Self {
            payload: Payload::Ed25519(digest),
        }
    }

    /// Address of an alias output.
    pub const fn new_alias(digest: [u8; PAYLOAD_LEN]) -> Self {
        Self {
            payload: Payload::Alias(digest),
        }
    }

    /// Address of an NFT output.
    pub const fn new_nft(digest: [u8; PAYLOAD_LEN]) -> Self {
        Self {
            payload: Payload::Nft(digest),
        }
    }

    /// Parses an address from its canonical byte encoding.
    pub fn from_bytes(bz: &[u8]) -> Result<Self, Error> {
        if bz.len() < 2 {
            return Err(Error::InvalidLength(bz.len()));
        }
        let kind = Kind::from_byte(bz[0])?;
        Ok(Self {
            payload: Payload::new(kind, &bz[1..])?,
        })
    }

    /// Returns the address kind.
    pub fn kind(&self) -> Kind {
        self.payload.into()
    }

    /// Returns the address payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Consumes the address, returning its payload.
    pub fn into_payload(self) -> Payload {
        self.payload
    }

    /// Returns the digest bytes without the kind byte.
    pub fn payload_bytes(&self) -> Vec<u8> {
        self.payload.to_raw_bytes()
    }

    /// Returns the canonical byte encoding, kind byte included.
    pub fn to_bytes(self) -> Vec<u8> {
        self.payload.to_bytes()
    }

    /// Checksum over the canonical encoding, as it appears in the string
    /// form.
    pub fn checksum(&self) -> [u8; CHECKSUM_LEN] {
        checksum(&self.to_bytes())
    }

    /// Network the string form is rendered for. Reads the process-wide
    /// default.
    pub fn network(&self) -> Network {
        default_network()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ingest = self.to_bytes();
        let cksm = checksum(&ingest);
        ingest.extend_from_slice(&cksm);
        write!(
            f,
            "{}{}",
            default_network().prefix(),
            ADDRESS_ENCODER.encode(&ingest)
        )
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(addr: &str) -> Result<Self, Error> {
        // Both networks are accepted on parse; the prefix only records which
        // network rendered the string. Use [`Network::parse_address`] to pin
        // one network.
        let (_, encoded) = Network::split_prefix(addr)?;
        parse_encoded(encoded)
    }
}

/// Parses the base32 body of an address string, prefix already removed.
fn parse_encoded(encoded: &str) -> Result<Address, Error> {
    let bz = ADDRESS_ENCODER.decode(encoded.as_bytes())?;
    if bz.len() != ENCODED_LEN + CHECKSUM_LEN {
        return Err(Error::InvalidLength(bz.len()));
    }
    let (raw, cksm) = bz.split_at(ENCODED_LEN);
    if !validate_checksum(raw, cksm) {
        return Err(Error::InvalidChecksum);
    }
    Address::from_bytes(raw)
}

impl ser::Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serde_bytes::Serialize::serialize(&self.to_bytes(), serializer)
    }
}

impl<'de> de::Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let bz: serde_bytes::ByteBuf = serde_bytes::Deserialize::deserialize(deserializer)?;
        Address::from_bytes(&bz).map_err(de::Error::custom)
    }
}

/// Returns a BLAKE2b checksum of `CHECKSUM_LEN` bytes over `ingest`.
fn checksum(ingest: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = blake2b_simd::Params::new()
        .hash_length(CHECKSUM_LEN)
        .to_state()
        .update(ingest)
        .finalize();
    let mut cksm = [0u8; CHECKSUM_LEN];
    cksm.copy_from_slice(digest.as_bytes());
    cksm
}

fn validate_checksum(ingest: &[u8], expect: &[u8]) -> bool {
    checksum(ingest).as_slice() == expect
}

#[cfg(feature = "arb")]
mod arb {
    use quickcheck::{Arbitrary, Gen};

    use super::{Address, Kind, PAYLOAD_LEN};

    impl Arbitrary for Address {
        fn arbitrary(g: &mut Gen) -> Self {
            let mut digest = [0u8; PAYLOAD_LEN];
            for b in digest.iter_mut() {
                *b = u8::arbitrary(g);
            }
            match *g.choose(&[Kind::Ed25519, Kind::Alias, Kind::Nft]).unwrap() {
                Kind::Ed25519 => Address::new_ed25519(digest),
                Kind::Alias => Address::new_alias(digest),
                Kind::Nft => Address::new_nft(digest),
            }
        }
    }
}
