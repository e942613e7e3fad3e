//! The no-security variant.

use roadseal_proto::WireError;

use super::SecurityProtocol;
use crate::{Message, ProtocolKind};

/// Returns every message unchanged in both directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Passthrough;

impl SecurityProtocol for Passthrough {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::None
    }

    fn encapsulate(&self, message: &Message) -> Message {
        message.clone()
    }

    fn decapsulate(&self, protected: &Message) -> Option<Message> {
        Some(protected.clone())
    }

    fn security_fields(&self, _protected: &Message) -> Result<Vec<u8>, WireError> {
        Ok(Vec::new())
    }

    fn overhead(&self) -> usize {
        0
    }
}
