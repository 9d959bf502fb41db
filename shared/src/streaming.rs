// Copyright 2021-2023 Protocol Labs
// SPDX-License-Identifier: Apache-2.0, MIT

//! Text wire formats of the distributor protocol.
//!
//! A listener requests one chunk at a time from a distributor. The request
//! line is `<session id>:<chunk index>:<signature>`, where the signature
//! covers the `<session id>:<chunk index>` head so the distributor can tie
//! the request to the session's listener. Distributors announce themselves
//! on-chain as `<host>:<port>:<certificate>`.
//!
//! Producing and checking the signatures themselves is key management and
//! stays outside this crate.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

use crate::evm::{IdError, SessionId};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("malformed chunk request")]
    MalformedRequest,
    #[error("invalid chunk index: {0}")]
    InvalidIndex(ParseIntError),
    #[error("malformed distributor url")]
    MalformedUrl,
    #[error("invalid distributor port: {0}")]
    InvalidPort(ParseIntError),
    #[error(transparent)]
    Id(#[from] IdError),
}

/// A request for one paid chunk of a streaming session.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub struct ChunkRequest {
    pub session: SessionId,
    pub index: u32,
}

impl ChunkRequest {
    pub fn new(session: SessionId, index: u32) -> Self {
        Self { session, index }
    }

    /// The exact text the listener signs.
    pub fn signable(&self) -> String {
        format!("{}:{}", self.session, self.index)
    }

    /// Attaches a signature, producing the full wire line.
    pub fn into_signed(self, signature: String) -> SignedChunkRequest {
        SignedChunkRequest {
            request: self,
            signature,
        }
    }
}

/// A chunk request as it travels on the wire, signature attached.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct SignedChunkRequest {
    pub request: ChunkRequest,
    pub signature: String,
}

impl fmt::Display for SignedChunkRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.request.signable(), self.signature)
    }
}

impl FromStr for SignedChunkRequest {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Error> {
        let mut parts = line.splitn(3, ':');
        let session = parts.next().ok_or(Error::MalformedRequest)?.parse()?;
        let index = parts
            .next()
            .ok_or(Error::MalformedRequest)?
            .parse()
            .map_err(Error::InvalidIndex)?;
        let signature = parts.next().ok_or(Error::MalformedRequest)?;
        if signature.is_empty() {
            return Err(Error::MalformedRequest);
        }
        Ok(ChunkRequest::new(session, index).into_signed(signature.to_string()))
    }
}

/// A distributor's service announcement, stored on-chain in its user record.
///
/// The certificate is carried inline so listeners can pin it when opening
/// the TLS connection. PEM text contains no `:`, which keeps the three-field
/// line parseable.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct DistributorUrl {
    pub host: String,
    pub port: u16,
    pub cert: String,
}

impl fmt::Display for DistributorUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.host, self.port, self.cert)
    }
}

impl FromStr for DistributorUrl {
    type Err = Error;

    fn from_str(url: &str) -> Result<Self, Error> {
        let mut parts = url.splitn(3, ':');
        let host = parts.next().ok_or(Error::MalformedUrl)?;
        let port = parts
            .next()
            .ok_or(Error::MalformedUrl)?
            .parse()
            .map_err(Error::InvalidPort)?;
        let cert = parts.next().ok_or(Error::MalformedUrl)?;
        if host.is_empty() || cert.is_empty() {
            return Err(Error::MalformedUrl);
        }
        Ok(Self {
            host: host.to_string(),
            port,
            cert: cert.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SessionId {
        SessionId::new([0x3du8; SessionId::LEN])
    }

    #[test]
    fn signed_request_roundtrip() {
        let signed = ChunkRequest::new(session(), 17).into_signed("0xsig".to_string());
        let line = signed.to_string();
        assert_eq!(line.parse::<SignedChunkRequest>(), Ok(signed));
    }

    #[test]
    fn signature_covers_session_and_index_only() {
        let request = ChunkRequest::new(session(), 17);
        let signable = request.signable();
        assert_eq!(signable, format!("{}:17", session()));
        let line = request.into_signed("0xsig".to_string()).to_string();
        assert_eq!(line, format!("{signable}:0xsig"));
    }

    #[test]
    fn request_parse_rejects_malformed_lines() {
        assert!(matches!(
            "nonsense".parse::<SignedChunkRequest>(),
            Err(Error::Id(_))
        ));
        let no_sig = ChunkRequest::new(session(), 0).signable();
        assert_eq!(
            no_sig.parse::<SignedChunkRequest>(),
            Err(Error::MalformedRequest)
        );
        let bad_index = format!("{}:seventeen:0xsig", session());
        assert!(matches!(
            bad_index.parse::<SignedChunkRequest>(),
            Err(Error::InvalidIndex(_))
        ));
    }

    #[test]
    fn distributor_url_roundtrip() {
        let url = DistributorUrl {
            host: "127.0.0.1".to_string(),
            port: 10_000,
            cert: "-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----\n".to_string(),
        };
        assert_eq!(url.to_string().parse::<DistributorUrl>(), Ok(url));
    }

    #[test]
    fn distributor_url_rejects_malformed_text() {
        assert_eq!(
            "localhost:10000".parse::<DistributorUrl>(),
            Err(Error::MalformedUrl)
        );
        assert!(matches!(
            "localhost:port:cert".parse::<DistributorUrl>(),
            Err(Error::InvalidPort(_))
        ));
        assert_eq!(
            ":10000:cert".parse::<DistributorUrl>(),
            Err(Error::MalformedUrl)
        );
    }
}
