// Copyright 2021-2023 Protocol Labs
// SPDX-License-Identifier: Apache-2.0, MIT

use isc_shared::address::{Address, Error, Kind, ENCODED_LEN, PAYLOAD_LEN};
use isc_shared::L1Address;
use quickcheck_macros::quickcheck;
use rand::Rng;

fn random_digest() -> [u8; PAYLOAD_LEN] {
    let mut digest = [0u8; PAYLOAD_LEN];
    rand::thread_rng().fill(&mut digest);
    digest
}

#[test]
fn known_vector() -> anyhow::Result<()> {
    let addr = Address::new_alias([0x11u8; PAYLOAD_LEN]);
    let expected = hex::decode(format!("08{}", "11".repeat(PAYLOAD_LEN)))?;
    assert_eq!(addr.to_bytes(), expected);
    assert_eq!(L1Address::wrap(Some(&addr)).bytes(), expected.as_slice());
    Ok(())
}

#[test]
fn wrapped_record_carries_exact_encoding() {
    for addr in [
        Address::new_ed25519(random_digest()),
        Address::new_alias(random_digest()),
        Address::new_nft(random_digest()),
    ] {
        let wrapped = L1Address::wrap(Some(&addr));
        assert_eq!(wrapped.bytes(), addr.to_bytes().as_slice());
        assert_eq!(wrapped.bytes().len(), ENCODED_LEN);
        assert_eq!(wrapped.bytes()[0], addr.kind().to_byte());
    }
}

#[test]
fn wrapping_no_address_yields_empty_record() {
    let wrapped = L1Address::wrap(None);
    assert!(wrapped.is_empty());
    assert_eq!(wrapped.bytes().len(), 0);
    assert_eq!(wrapped.to_address(), Err(Error::EmptyPayload));
}

#[test]
fn parse_rejects_truncated_encodings() {
    let addr = Address::new_ed25519(random_digest());
    let bz = addr.to_bytes();
    for cut in 0..bz.len() {
        assert!(Address::from_bytes(&bz[..cut]).is_err());
    }
}

#[test]
fn text_roundtrip_all_kinds() -> anyhow::Result<()> {
    for addr in [
        Address::new_ed25519(random_digest()),
        Address::new_alias(random_digest()),
        Address::new_nft(random_digest()),
    ] {
        let parsed: Address = addr.to_string().parse()?;
        assert_eq!(parsed, addr);
        assert_eq!(parsed.kind(), addr.kind());
    }
    Ok(())
}

#[test]
fn serde_json_roundtrip() -> anyhow::Result<()> {
    let addr = Address::new_nft(random_digest());
    let back: Address = serde_json::from_str(&serde_json::to_string(&addr)?)?;
    assert_eq!(back, addr);

    let wrapped = L1Address::wrap(Some(&addr));
    let back: L1Address = serde_json::from_str(&serde_json::to_string(&wrapped)?)?;
    assert_eq!(back, wrapped);
    Ok(())
}

#[test]
fn unknown_kind_bytes_rejected() {
    for kind_byte in [1u8, 2, 7, 9, 17, 255] {
        let mut bz = vec![kind_byte];
        bz.extend_from_slice(&[0u8; PAYLOAD_LEN]);
        assert_eq!(
            Address::from_bytes(&bz),
            Err(Error::UnknownKind(kind_byte))
        );
        assert_eq!(Kind::from_byte(kind_byte), Err(Error::UnknownKind(kind_byte)));
    }
}

#[quickcheck]
fn prop_wrap_matches_encoding(addr: Address) -> bool {
    L1Address::wrap(Some(&addr)).bytes() == addr.to_bytes().as_slice()
}

#[quickcheck]
fn prop_wrap_is_pure(addr: Address) -> bool {
    L1Address::wrap(Some(&addr)) == L1Address::wrap(Some(&addr))
}

#[quickcheck]
fn prop_unwrap_inverts_wrap(addr: Address) -> bool {
    L1Address::wrap(Some(&addr)).to_address() == Ok(addr)
}

#[quickcheck]
fn prop_bytes_roundtrip(addr: Address) -> bool {
    Address::from_bytes(&addr.to_bytes()) == Ok(addr)
}

#[quickcheck]
fn prop_text_roundtrip(addr: Address) -> bool {
    addr.to_string().parse() == Ok(addr)
}

#[quickcheck]
fn prop_wrapped_roundtrips_through_serde(wrapped: L1Address) -> bool {
    let json = serde_json::to_string(&wrapped).unwrap();
    serde_json::from_str::<L1Address>(&json).unwrap() == wrapped
}
