//! Plaintext sources and outcome summaries.
//!
//! The two collaborators at the edges of the core: a source produces the
//! payload bytes to protect, and the UI consumes one text summary per sent or
//! received message.

use std::{
    collections::VecDeque,
    sync::{Mutex, PoisonError},
};

use crate::{Message, MessageKind, ProtocolKind, SetupError};

/// Supplies payloads to protect.
pub trait PlaintextSource {
    /// Produce one payload of `kind`.
    ///
    /// # Errors
    ///
    /// - `SetupError::Unimplemented` if the source cannot produce `kind`
    fn generate(&mut self, kind: MessageKind) -> Result<Message, SetupError>;
}

/// Recorded CAM, UPER encoded.
pub const CAM_FIXTURE_HEX: &str =
    "0202000000C803E8005997D7ED8CBB585E401401401430D5400000000000003E713A800BFFE5FFF800";

/// Replays recorded payloads instead of encoding live vehicle state.
///
/// Cycles through its CAM fixtures in order. DENM generation needs an ASN.1
/// encoder and is not available.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    cams: Vec<Message>,
    next: usize,
}

impl FixtureSource {
    /// Source over the given CAM payloads.
    ///
    /// An empty list yields empty CAMs.
    pub fn new(cams: Vec<Message>) -> Self {
        Self { cams, next: 0 }
    }

    /// Source over the built-in recorded CAM.
    pub fn recorded() -> Self {
        let Ok(cam) = hex::decode(CAM_FIXTURE_HEX) else {
            unreachable!("fixture is valid hex");
        };
        Self::new(vec![Message::new(cam)])
    }
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::recorded()
    }
}

impl PlaintextSource for FixtureSource {
    fn generate(&mut self, kind: MessageKind) -> Result<Message, SetupError> {
        match kind {
            MessageKind::Cam => {
                let Some(cam) = self.cams.get(self.next % self.cams.len().max(1)) else {
                    return Ok(Message::default());
                };
                self.next = self.next.wrapping_add(1);
                Ok(cam.clone())
            },
            MessageKind::Denm => Err(SetupError::Unimplemented { what: "DENM generation" }),
        }
    }
}

/// Which way a message travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Protected and handed to the transport
    Sent,
    /// Received and verified
    Received,
}

/// One sent or verified message, as reported to the UI.
///
/// For sent messages `payload` holds the protected bytes as transmitted; for
/// received messages it holds the recovered plaintext. Rejected messages
/// produce no outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Sent or received
    pub direction: Direction,
    /// Payload type
    pub kind: MessageKind,
    /// Scheme in use
    pub protocol: ProtocolKind,
    /// Epoch seconds when the outcome was recorded
    pub at_unix_secs: u64,
    /// Bytes shown to the user
    pub payload: Message,
}

impl Outcome {
    /// Multi-line text summary.
    pub fn content(&self) -> String {
        let verb = match self.direction {
            Direction::Sent => "sent",
            Direction::Received => "received",
        };

        format!(
            "A message was {verb}:\nSecurity={},\nMessage type={},\nTimestamp={},\n\
             Message content size={},\nMessage content bytes='{:?}')",
            self.protocol,
            self.kind,
            self.at_unix_secs,
            self.payload.len(),
            self.payload.as_bytes(),
        )
    }
}

/// Line printed between two summaries.
pub const SEPARATOR: &str =
    "-------------------------------------------------------------------";

/// Newest-first history of outcome summaries, shared by senders and receivers.
///
/// The only mutable state touched from more than one call site. One mutex,
/// one owner.
#[derive(Debug, Default)]
pub struct OutcomeLog {
    entries: Mutex<VecDeque<String>>,
}

impl OutcomeLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `outcome`'s summary and a separator.
    pub fn record(&self, outcome: &Outcome) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.push_front(SEPARATOR.to_string());
        entries.push_front(outcome.content());
    }

    /// Snapshot, newest first.
    pub fn entries(&self) -> Vec<String> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.iter().cloned().collect()
    }
}
