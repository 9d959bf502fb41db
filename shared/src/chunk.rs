// Copyright 2021-2023 Protocol Labs
// SPDX-License-Identifier: Apache-2.0, MIT

//! Song data is transferred and paid for in fixed-size chunks. Each chunk is
//! committed to on-chain by its SHA3-256 digest at upload time, and every
//! delivered chunk is checked against that commitment before it is accepted.

use std::fmt;

use serde::{de, ser};
use sha3::{Digest, Sha3_256};

/// Chunk size in bytes used by uploaders and distributors.
pub const CHUNK_LEN: usize = 30_000;

/// SHA3-256 commitment to one chunk of song data.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub struct ChunkDigest([u8; Self::LEN]);

impl ChunkDigest {
    /// Digest length in bytes.
    pub const LEN: usize = 32;

    pub const fn new(raw: [u8; Self::LEN]) -> Self {
        Self(raw)
    }

    /// Commits to a chunk of data.
    pub fn digest(chunk: &[u8]) -> Self {
        Self(Sha3_256::digest(chunk).into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Checks a delivered chunk against this commitment.
    pub fn verify(&self, chunk: &[u8]) -> bool {
        Self::digest(chunk) == *self
    }
}

impl fmt::Display for ChunkDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl ser::Serialize for ChunkDigest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serde_bytes::Serialize::serialize(&self.0.to_vec(), serializer)
    }
}

impl<'de> de::Deserialize<'de> for ChunkDigest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let bz: serde_bytes::ByteBuf = serde_bytes::Deserialize::deserialize(deserializer)?;
        let raw: [u8; Self::LEN] = bz
            .into_vec()
            .try_into()
            .map_err(|bz: Vec<u8>| de::Error::custom(format!("invalid digest length: {}", bz.len())))?;
        Ok(Self(raw))
    }
}

/// Commits to every chunk of `data`, in order. The last chunk may be
/// shorter. Empty data or a zero chunk length produce no commitments.
pub fn split_digests(data: &[u8], chunk_len: usize) -> Vec<ChunkDigest> {
    if data.is_empty() || chunk_len == 0 {
        return Vec::new();
    }
    data.chunks(chunk_len).map(ChunkDigest::digest).collect()
}
