//! Roadseal protocol core.
//!
//! Wraps short V2X messages (CAM/DENM) in a pluggable authentication envelope
//! before transmission and verifies/unwraps them on receipt. The transport,
//! the message generator and the UI are collaborators outside this crate;
//! they exchange opaque byte buffers and text summaries with it.
//!
//! # Architecture
//!
//! ```text
//! ProtocolSetup::build(kind)
//!        │
//!        ▼
//! Protocol ── Passthrough        (no envelope)
//!          ├─ HashChainScheme    ── HashChainDevice    (HMAC keyed by hash chain)
//!          └─ PseudonymMacScheme ── PseudonymMacDevice (hash tag over regional key)
//! ```
//!
//! Callers use the [`SecurityProtocol`] contract only:
//! `encapsulate(message) -> protected` before sending and
//! `decapsulate(protected) -> Option<message>` on receipt.
//!
//! # Determinism
//!
//! Devices read wall-clock time and randomness exclusively through
//! [`env::Environment`]. Production injects the OS clock and RNG; tests inject
//! a fixed clock and a seeded RNG, which makes every byte of a protected
//! message reproducible.
//!
//! # Failure Model
//!
//! Configuration problems abort construction with a [`SetupError`].
//! Verification problems (stale timestamp, bad tag, truncated input) all map
//! to `None` from `decapsulate`, so a sender learns nothing from the outcome.
//!
//! # Concurrency
//!
//! A protocol instance is immutable after construction. `encapsulate` and
//! `decapsulate` take `&self` and keep per-call state on the stack, so one
//! instance can be shared across threads without locks.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod device;
pub mod env;
mod error;
mod message;
pub mod presence;
pub mod protocol;
pub mod setup;
pub mod source;

pub use error::{SetupError, UnknownProtocol};
pub use message::{Message, MessageKind, ProtocolKind};
pub use protocol::{Protocol, SecurityProtocol};
pub use setup::{HashChainConfig, ProtocolSetup, PseudonymMacConfig, SetupConfig};
pub use source::{Direction, FixtureSource, Outcome, OutcomeLog, PlaintextSource};

