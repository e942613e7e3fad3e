//! Pseudonym-MAC scheme.

use std::fmt;

use roadseal_proto::WireError;

use super::SecurityProtocol;
use crate::{
    Message, ProtocolKind,
    device::{PseudonymMacDevice, TamperProofDevice},
    env::Environment,
};

/// Pseudonym-MAC scheme over its tamper-proof device.
pub struct PseudonymMacScheme<E: Environment> {
    device: PseudonymMacDevice<E>,
}

impl<E: Environment> PseudonymMacScheme<E> {
    /// Wrap `device`.
    pub fn new(device: PseudonymMacDevice<E>) -> Self {
        Self { device }
    }

    /// Underlying device.
    pub fn device(&self) -> &PseudonymMacDevice<E> {
        &self.device
    }
}

impl<E: Environment> SecurityProtocol for PseudonymMacScheme<E> {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::PseudonymMac
    }

    fn encapsulate(&self, message: &Message) -> Message {
        Message::new(self.device.encapsulate(message.as_bytes()))
    }

    fn decapsulate(&self, protected: &Message) -> Option<Message> {
        self.device.decapsulate(protected.as_bytes()).map(Message::new)
    }

    fn security_fields(&self, protected: &Message) -> Result<Vec<u8>, WireError> {
        self.device.security_fields(protected.as_bytes())
    }

    fn overhead(&self) -> usize {
        self.device.header_len()
    }
}

impl<E: Environment> fmt::Debug for PseudonymMacScheme<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PseudonymMacScheme").field("device", &self.device).finish()
    }
}
