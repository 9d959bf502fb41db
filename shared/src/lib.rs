// Copyright 2021-2023 Protocol Labs
// SPDX-License-Identifier: Apache-2.0, MIT

//! Shared types for bridging a layer-1 ledger with an EVM-compatible
//! layer-2 chain.
//!
//! The [`address`] module holds the layer-1 address model and its canonical
//! encodings. The [`evm`] module holds the wire records mirrored from the
//! contract-side type definitions, most notably [`L1Address`]. Around those
//! sit the streaming platform's shared pieces: token amounts and pricing
//! rules ([`econ`]), chunk commitments ([`chunk`]), and the distributor
//! protocol's text formats ([`streaming`]).

pub mod address;
pub mod chunk;
pub mod econ;
pub mod evm;
pub mod streaming;

pub use self::address::Address;
pub use self::econ::TokenAmount;
pub use self::evm::L1Address;
