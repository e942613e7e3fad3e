//! The security protocol contract and its three variants.
//!
//! # Contract
//!
//! - `encapsulate` never fails; it only prefixes a header.
//! - `decapsulate` returns the original payload or `None`. `None` covers every
//!   failure (malformed, stale, forged) without saying which.
//! - `decapsulate(encapsulate(m)) == Some(m)` within the same epoch second.
//!
//! The variant is fixed at construction. [`Protocol`] is the closed set of
//! variants the factory can build; each variant also implements
//! [`SecurityProtocol`] on its own.

mod hash_chain;
mod passthrough;
mod pseudonym_mac;

use std::fmt;

pub use hash_chain::HashChainScheme;
pub use passthrough::Passthrough;
pub use pseudonym_mac::PseudonymMacScheme;
use roadseal_proto::WireError;

use crate::{Message, ProtocolKind, env::Environment};

/// Uniform encapsulate/decapsulate contract over all schemes.
pub trait SecurityProtocol {
    /// Scheme this instance runs.
    fn kind(&self) -> ProtocolKind;

    /// Wrap `message` for transmission.
    fn encapsulate(&self, message: &Message) -> Message;

    /// Verify and unwrap a received message.
    fn decapsulate(&self, protected: &Message) -> Option<Message>;

    /// Security header of `protected`, payload excluded. Empty when the
    /// scheme adds no header.
    ///
    /// # Errors
    ///
    /// - `WireError::TooShort` if `protected` cannot hold the header
    fn security_fields(&self, protected: &Message) -> Result<Vec<u8>, WireError>;

    /// Bytes added to every message by `encapsulate`.
    fn overhead(&self) -> usize;
}

/// Any protocol the factory can build.
pub enum Protocol<E: Environment> {
    /// No security
    Passthrough(Passthrough),
    /// Hash-chain keyed HMAC
    HashChain(HashChainScheme<E>),
    /// Per-timestamp pseudonym with regional-key tag
    PseudonymMac(PseudonymMacScheme<E>),
}

impl<E: Environment> SecurityProtocol for Protocol<E> {
    fn kind(&self) -> ProtocolKind {
        match self {
            Self::Passthrough(inner) => inner.kind(),
            Self::HashChain(inner) => inner.kind(),
            Self::PseudonymMac(inner) => inner.kind(),
        }
    }

    fn encapsulate(&self, message: &Message) -> Message {
        match self {
            Self::Passthrough(inner) => inner.encapsulate(message),
            Self::HashChain(inner) => inner.encapsulate(message),
            Self::PseudonymMac(inner) => inner.encapsulate(message),
        }
    }

    fn decapsulate(&self, protected: &Message) -> Option<Message> {
        match self {
            Self::Passthrough(inner) => inner.decapsulate(protected),
            Self::HashChain(inner) => inner.decapsulate(protected),
            Self::PseudonymMac(inner) => inner.decapsulate(protected),
        }
    }

    fn security_fields(&self, protected: &Message) -> Result<Vec<u8>, WireError> {
        match self {
            Self::Passthrough(inner) => inner.security_fields(protected),
            Self::HashChain(inner) => inner.security_fields(protected),
            Self::PseudonymMac(inner) => inner.security_fields(protected),
        }
    }

    fn overhead(&self) -> usize {
        match self {
            Self::Passthrough(inner) => inner.overhead(),
            Self::HashChain(inner) => inner.overhead(),
            Self::PseudonymMac(inner) => inner.overhead(),
        }
    }
}

impl<E: Environment> fmt::Debug for Protocol<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passthrough(inner) => f.debug_tuple("Passthrough").field(inner).finish(),
            Self::HashChain(inner) => f.debug_tuple("HashChain").field(inner).finish(),
            Self::PseudonymMac(inner) => f.debug_tuple("PseudonymMac").field(inner).finish(),
        }
    }
}
