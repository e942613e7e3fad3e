//! CLI errors.

use roadseal_core::SetupError;
use roadseal_proto::WireError;
use thiserror::Error;

/// Everything a command can fail with.
#[derive(Error, Debug)]
pub enum CliError {
    /// Protocol could not be assembled
    #[error(transparent)]
    Setup(#[from] SetupError),

    /// Argument is not valid hex
    #[error("invalid hex payload: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Input too short for the scheme's header
    #[error(transparent)]
    Wire(#[from] WireError),

    /// Message did not verify
    #[error("message rejected")]
    Rejected,

    /// Writing output failed
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),

    /// Receiver thread panicked
    #[error("receiver thread stopped unexpectedly")]
    ReceiverLost,
}
