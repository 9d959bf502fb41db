// Copyright 2021-2023 Protocol Labs
// SPDX-License-Identifier: Apache-2.0, MIT

//! Wire records mirrored from the contract-side type definitions.
//!
//! Every struct here matches its contract-side counterpart field-for-field,
//! so tuple-encoded values can cross the EVM boundary unchanged. [`L1Address`]
//! carries a layer-1 address; [`Song`] and [`Session`] mirror the platform
//! contract's song and streaming-session records.

use std::fmt;
use std::str::FromStr;

use serde::{de, ser};
use serde_tuple::{Deserialize_tuple, Serialize_tuple};
use thiserror::Error;

use crate::address::{Address, Error as AddressError};
use crate::econ::TokenAmount;

/// Error parsing a fixed-width hex identifier.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum IdError {
    #[error("missing 0x prefix")]
    MissingPrefix,
    #[error("invalid id length: {0}")]
    InvalidLength(usize),
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

// The vendored `hex` crate does not implement `Eq` for `FromHexError`, so the
// derive cannot be used; the equivalence contract still holds for all variants.
impl Eq for IdError {}

macro_rules! fixed_bytes {
    ($(#[$doc:meta])* $name:ident, $len:expr) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Width in bytes.
            pub const LEN: usize = $len;

            pub const fn new(raw: [u8; $len]) -> Self {
                Self(raw)
            }

            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(raw: [u8; $len]) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, IdError> {
                let digits = s.strip_prefix("0x").ok_or(IdError::MissingPrefix)?;
                let bz = hex::decode(digits)?;
                let raw: [u8; $len] = bz
                    .try_into()
                    .map_err(|bz: Vec<u8>| IdError::InvalidLength(bz.len()))?;
                Ok(Self(raw))
            }
        }

        impl ser::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ser::Serializer,
            {
                serde_bytes::Serialize::serialize(&self.0.to_vec(), serializer)
            }
        }

        impl<'de> de::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: de::Deserializer<'de>,
            {
                let bz: serde_bytes::ByteBuf = serde_bytes::Deserialize::deserialize(deserializer)?;
                let raw: [u8; $len] = bz.into_vec().try_into().map_err(|bz: Vec<u8>| {
                    de::Error::custom(format!("invalid length: {}", bz.len()))
                })?;
                Ok(Self(raw))
            }
        }
    };
}

fixed_bytes! {
    /// An EVM account address on the layer-2 chain.
    EthAddress, 20
}

fixed_bytes! {
    /// Contract-derived identifier of an uploaded song.
    SongId, 32
}

fixed_bytes! {
    /// Contract-derived identifier of a streaming session.
    SessionId, 32
}

/// Mirror of the contract-side `L1Address` struct.
///
/// `data` holds the canonical byte encoding of a layer-1 [`Address`]. An
/// absent address is represented by an empty buffer, never by a missing
/// field, so the record always matches the contract-side shape
/// field-for-field.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct L1Address {
    #[serde(with = "serde_bytes")]
    pub data: Vec<u8>,
}

impl L1Address {
    /// Wraps already-encoded address bytes without validating them.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Wraps an optional layer-1 address for the contract boundary.
    ///
    /// `None` maps to the empty byte sequence; a present address maps to its
    /// canonical encoding, unmodified.
    pub fn wrap(addr: Option<&Address>) -> Self {
        match addr {
            Some(a) => Self { data: a.to_bytes() },
            None => Self { data: Vec::new() },
        }
    }

    /// Returns the held encoding. Empty when no address is present.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// True when the record carries no address.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Decodes the held bytes back into a layer-1 address.
    pub fn to_address(&self) -> Result<Address, AddressError> {
        if self.data.is_empty() {
            return Err(AddressError::EmptyPayload);
        }
        Address::from_bytes(&self.data)
    }
}

impl From<&Address> for L1Address {
    fn from(a: &Address) -> Self {
        Self::wrap(Some(a))
    }
}

impl From<Option<&Address>> for L1Address {
    fn from(a: Option<&Address>) -> Self {
        Self::wrap(a)
    }
}

/// Mirror of the contract-side song record.
///
/// `duration_secs` is the playback length; `length` is the size of the song
/// data in bytes. The chunk commitments live in contract storage next to
/// this record and are not part of it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct Song {
    pub id: SongId,
    pub valid: bool,
    pub author: EthAddress,
    pub name: String,
    pub price: TokenAmount,
    pub length: u64,
    pub duration_secs: u64,
}

impl Song {
    /// The listed price including the distributor's cut, which is what a
    /// listener pays end to end.
    pub fn price_with_fee(&self) -> TokenAmount {
        self.price.with_fee()
    }

    /// Price of a single chunk, for a song split into `chunk_count` chunks.
    pub fn chunk_price(&self, chunk_count: u32) -> TokenAmount {
        self.price.chunk_price(chunk_count)
    }
}

/// Mirror of the contract-side streaming-session record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct Session {
    pub active: bool,
    pub listener: EthAddress,
    pub distributor: EthAddress,
    pub song_id: SongId,
    pub price: TokenAmount,
    pub balance: TokenAmount,
}

#[cfg(feature = "arb")]
impl quickcheck::Arbitrary for L1Address {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        L1Address::wrap(Option::<Address>::arbitrary(g).as_ref())
    }
}
