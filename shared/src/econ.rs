// Copyright 2021-2023 Protocol Labs
// SPDX-License-Identifier: Apache-2.0, MIT

//! Token amounts and the pricing rules of the streaming platform.
//!
//! Amounts are held in wei, the layer-2 chain's smallest unit. One layer-1
//! base token is pegged to 10^12 wei, so one mega token (Mi) is 10^18 wei.

use serde::{Deserialize, Serialize};

/// Wei per layer-1 base token.
pub const WEI_PER_BASE_TOKEN: u128 = 1_000_000_000_000;

/// Wei per mega token (Mi), the unit prices are quoted in.
pub const WEI_PER_MEGA_TOKEN: u128 = 1_000_000_000_000_000_000;

/// The distributor keeps a 10% cut of every chunk payment.
pub const DISTRIBUTOR_FEE_DIVISOR: u128 = 10;

/// An amount of layer-2 tokens, in wei.
#[derive(
    Copy, Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn from_wei(wei: u128) -> Self {
        Self(wei)
    }

    pub const fn from_base_tokens(tokens: u64) -> Self {
        Self(tokens as u128 * WEI_PER_BASE_TOKEN)
    }

    pub const fn from_mega_tokens(mega: u64) -> Self {
        Self(mega as u128 * WEI_PER_MEGA_TOKEN)
    }

    pub const fn wei(self) -> u128 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Rounds a song price down so it divides evenly over `chunk_count`
    /// chunks and every per-chunk payment splits into a whole-wei
    /// distributor cut. A zero chunk count leaves the price untouched.
    pub fn align_to_chunks(self, chunk_count: u32) -> Self {
        if chunk_count == 0 {
            return self;
        }
        Self(self.0 - self.0 % (chunk_count as u128 * DISTRIBUTOR_FEE_DIVISOR))
    }

    /// The distributor's cut on top of this price.
    pub fn distributor_fee(self) -> Self {
        Self(self.0 / DISTRIBUTOR_FEE_DIVISOR)
    }

    /// The price a listener actually pays: the author's price plus the
    /// distributor's cut.
    pub fn with_fee(self) -> Self {
        Self(self.0 + self.0 / DISTRIBUTOR_FEE_DIVISOR)
    }

    /// Price of a single chunk out of `chunk_count`. Zero when the song has
    /// no chunks.
    pub fn chunk_price(self, chunk_count: u32) -> Self {
        if chunk_count == 0 {
            return Self::zero();
        }
        Self(self.0 / chunk_count as u128)
    }

    /// Splits a fee-inclusive total into the author's and the distributor's
    /// shares.
    pub fn split_fee(self) -> (Self, Self) {
        let author = Self(self.0 * DISTRIBUTOR_FEE_DIVISOR / (DISTRIBUTOR_FEE_DIVISOR + 1));
        (author, Self(self.0 - author.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_conversions() {
        assert_eq!(TokenAmount::from_base_tokens(1).wei(), WEI_PER_BASE_TOKEN);
        assert_eq!(TokenAmount::from_mega_tokens(1).wei(), WEI_PER_MEGA_TOKEN);
        assert_eq!(
            TokenAmount::from_mega_tokens(1),
            TokenAmount::from_base_tokens(1_000_000)
        );
        assert!(TokenAmount::zero().is_zero());
    }

    #[test]
    fn aligned_price_divides_into_fee_free_chunks() {
        let price = TokenAmount::from_wei(1_000_007).align_to_chunks(13);
        assert_eq!(price.wei() % (13 * 10), 0);
        assert_eq!(price.chunk_price(13).wei() % 10, 0);
        // Alignment only ever rounds down, by less than one chunk's fee unit.
        assert!(price.wei() <= 1_000_007);
        assert!(1_000_007 - price.wei() < 13 * 10);
    }

    #[test]
    fn alignment_is_idempotent() {
        let once = TokenAmount::from_wei(987_654_321).align_to_chunks(7);
        assert_eq!(once.align_to_chunks(7), once);
    }

    #[test]
    fn zero_chunk_count_is_harmless() {
        let price = TokenAmount::from_wei(42);
        assert_eq!(price.align_to_chunks(0), price);
        assert_eq!(price.chunk_price(0), TokenAmount::zero());
    }

    #[test]
    fn fee_is_ten_percent() {
        let price = TokenAmount::from_wei(1_000);
        assert_eq!(price.distributor_fee().wei(), 100);
        assert_eq!(price.with_fee().wei(), 1_100);
    }

    #[test]
    fn split_recovers_author_and_distributor_shares() {
        // An aligned price paid in full: the split must undo the fee markup.
        let price = TokenAmount::from_wei(1_000);
        let (author, distributor) = price.with_fee().split_fee();
        assert_eq!(author, price);
        assert_eq!(distributor, price.distributor_fee());
        assert_eq!(author.wei() + distributor.wei(), price.with_fee().wei());
    }

    #[test]
    fn serde_is_transparent() {
        let amount = TokenAmount::from_base_tokens(3);
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, amount.wei().to_string());
        assert_eq!(serde_json::from_str::<TokenAmount>(&json).unwrap(), amount);
    }
}
