//! Message and protocol designations shared by every scheme.

use std::{fmt, str::FromStr};

use crate::error::UnknownProtocol;

/// An opaque message payload, plain or protected.
///
/// Equality and hashing are by content. No length limit applies; the empty
/// message is valid input to every scheme.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Message(Vec<u8>);

impl Message {
    /// Wrap owned bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Message bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the message, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the zero-length message.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Message {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Message {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl AsRef<[u8]> for Message {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Message({} bytes)", self.0.len())
    }
}

/// Which security scheme a protocol instance runs.
///
/// Chosen once when the protocol is built; an instance never changes scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProtocolKind {
    /// No envelope; messages pass through unchanged
    #[default]
    None,
    /// Pseudonym pool plus HMAC keyed by a hash chain (designation `DLAPP`)
    HashChain,
    /// Per-timestamp pseudonym plus hash tag over a regional key
    /// (designation `MFSPV`)
    PseudonymMac,
}

impl ProtocolKind {
    /// Every supported scheme, in designation order.
    pub const ALL: [Self; 3] = [Self::None, Self::HashChain, Self::PseudonymMac];

    /// Short designation used in logs and outcome summaries.
    pub fn designation(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::HashChain => "DLAPP",
            Self::PseudonymMac => "MFSPV",
        }
    }
}

impl fmt::Display for ProtocolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.designation())
    }
}

impl FromStr for ProtocolKind {
    type Err = UnknownProtocol;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "dlapp" | "hash-chain" | "hashchain" => Ok(Self::HashChain),
            "mfspv" | "pseudonym-mac" | "pseudonymmac" => Ok(Self::PseudonymMac),
            _ => Err(UnknownProtocol(name.to_string())),
        }
    }
}

/// V2X message type carried as payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MessageKind {
    /// Cooperative Awareness Message
    #[default]
    Cam,
    /// Decentralized Environmental Notification Message
    Denm,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cam => f.write_str("CAM"),
            Self::Denm => f.write_str("DENM"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn equality_is_by_content() {
        let a = Message::from(&b"payload"[..]);
        let b = Message::new(b"payload".to_vec());
        assert_eq!(a, b);

        let set: HashSet<Message> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn empty_message() {
        let message = Message::default();
        assert!(message.is_empty());
        assert_eq!(message.len(), 0);
        assert_eq!(message.into_bytes(), Vec::<u8>::new());
    }

    #[test]
    fn debug_shows_length_only() {
        let message = Message::from(vec![0xDE, 0xAD]);
        assert_eq!(format!("{message:?}"), "Message(2 bytes)");
    }

    #[test]
    fn designations() {
        assert_eq!(ProtocolKind::None.to_string(), "NONE");
        assert_eq!(ProtocolKind::HashChain.to_string(), "DLAPP");
        assert_eq!(ProtocolKind::PseudonymMac.to_string(), "MFSPV");
        assert_eq!(ProtocolKind::default(), ProtocolKind::None);
    }

    #[test]
    fn parses_designations_and_names() {
        for kind in ProtocolKind::ALL {
            assert_eq!(kind.to_string().parse::<ProtocolKind>().unwrap(), kind);
        }
        assert_eq!("hash-chain".parse::<ProtocolKind>().unwrap(), ProtocolKind::HashChain);
        assert_eq!("Pseudonym-MAC".parse::<ProtocolKind>().unwrap(), ProtocolKind::PseudonymMac);
        assert_eq!(
            "ecdsa".parse::<ProtocolKind>(),
            Err(UnknownProtocol("ecdsa".to_string()))
        );
    }

    #[test]
    fn message_kind_display() {
        assert_eq!(MessageKind::Cam.to_string(), "CAM");
        assert_eq!(MessageKind::Denm.to_string(), "DENM");
    }
}
