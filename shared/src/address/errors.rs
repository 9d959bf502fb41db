// Copyright 2021-2023 Protocol Labs
// SPDX-License-Identifier: Apache-2.0, MIT

use data_encoding::DecodeError;
use thiserror::Error;

/// Address error
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unknown network prefix")]
    UnknownNetwork,
    #[error("unknown address kind: {0}")]
    UnknownKind(u8),
    #[error("invalid address length: {0}")]
    InvalidLength(usize),
    #[error("invalid payload length: {0}")]
    InvalidPayloadLength(usize),
    #[error("invalid address checksum")]
    InvalidChecksum,
    #[error("decoding address failed: {0}")]
    Base32Decoding(#[from] DecodeError),
    #[error("empty address payload")]
    EmptyPayload,
}
