//! Hash-chain scheme.

use std::fmt;

use roadseal_proto::WireError;

use super::SecurityProtocol;
use crate::{
    Message, ProtocolKind, SetupError,
    device::{HashChainDevice, TamperProofDevice},
    env::Environment,
    presence::PresenceCheck,
};

/// Hash-chain scheme over its tamper-proof device.
///
/// The device is unlocked by a presence check when the scheme is assembled;
/// after that the scheme is usable for its whole lifetime.
pub struct HashChainScheme<E: Environment> {
    device: HashChainDevice<E>,
}

impl<E: Environment> HashChainScheme<E> {
    /// Unlock `device` with a one-shot presence check.
    ///
    /// # Errors
    ///
    /// - `SetupError::PresenceCheckFailed` if the user is not authenticated
    pub fn new(device: HashChainDevice<E>, presence: &dyn PresenceCheck) -> Result<Self, SetupError> {
        if !presence.authenticate_user() {
            tracing::warn!("presence check failed, hash-chain device stays locked");
            return Err(SetupError::PresenceCheckFailed);
        }
        Ok(Self { device })
    }

    /// Underlying device.
    pub fn device(&self) -> &HashChainDevice<E> {
        &self.device
    }
}

impl<E: Environment> SecurityProtocol for HashChainScheme<E> {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::HashChain
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

impl<E: Environment> fmt::Debug for HashChainScheme<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashChainScheme").field("device", &self.device).finish()
    }
}
