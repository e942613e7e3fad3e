//! Roadseal Cryptographic Primitives
//!
//! Building blocks for the vehicular message-authentication schemes. Pure
//! functions with deterministic outputs. Callers provide random values so
//! every derivation can be replayed in tests.
//!
//! # Key Material
//!
//! Two families of secret material live here:
//!
//! ```text
//! System seed (shared by every station)
//!        │
//!        ▼ H, H, H, ...
//! HashChain[0..N]  ── HMAC key per message, index carried on the wire
//!
//! api key, device secret, device id, membership key
//!        │
//!        ▼ H(..) once
//! static part ⊕ H(api key || timestamp) ── per-message pseudonym
//! ```
//!
//! # Truncation
//!
//! Every tag and pseudonym is cut from the *tail* of a digest: the last 12
//! bytes of an HMAC output, the last 20 bytes of a hash output. Producers and
//! verifiers must agree on this, so [`truncate_tail`] is the only cutting
//! routine in the crate.
//!
//! # Security
//!
//! - Chain keys and pseudonym secrets are zeroized on drop
//! - Debug output never prints key material
//! - Tags are compared in constant time ([`tags_match`])

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod algorithm;
mod error;
pub mod hash_chain;
pub mod pseudonym;

pub use algorithm::{HashAlgorithm, MacAlgorithm, tags_match, truncate_tail, xor_bytes};
pub use error::CryptoError;
pub use hash_chain::{HashChain, HashChainGenerator};
pub use pseudonym::{PSEUDONYM_LEN, PseudoIdentity, RandomPseudonymGenerator, TimedPseudonymGenerator};
