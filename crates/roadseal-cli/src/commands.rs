//! Command implementations.
//!
//! Each command writes its result to the given writer; only diagnostics go
//! through `tracing`.

use std::{
    io::Write,
    sync::{Arc, mpsc},
    thread,
    time::Duration,
};

use roadseal_core::{
    Direction, Message, MessageKind, Outcome, OutcomeLog, PlaintextSource, SecurityProtocol,
    env::Environment,
};

use crate::error::CliError;

/// Protect a hex payload and write the frame as hex.
pub fn protect<P: SecurityProtocol>(
    protocol: &P,
    payload_hex: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let message = Message::new(hex::decode(payload_hex)?);
    let protected = protocol.encapsulate(&message);
    writeln!(out, "{}", hex::encode(protected.as_bytes()))?;
    Ok(())
}

/// Verify a hex frame and write the recovered payload as hex.
pub fn verify<P: SecurityProtocol>(
    protocol: &P,
    frame_hex: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let protected = Message::new(hex::decode(frame_hex)?);
    let message = protocol.decapsulate(&protected).ok_or(CliError::Rejected)?;
    writeln!(out, "{}", hex::encode(message.as_bytes()))?;
    Ok(())
}

/// Split a hex frame into security fields and payload without verifying it.
pub fn inspect<P: SecurityProtocol>(
    protocol: &P,
    frame_hex: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let protected = Message::new(hex::decode(frame_hex)?);
    let fields = protocol.security_fields(&protected)?;
    let payload = &protected.as_bytes()[fields.len()..];

    writeln!(out, "protocol: {}", protocol.kind())?;
    writeln!(out, "security fields ({} bytes): {}", fields.len(), hex::encode(&fields))?;
    writeln!(out, "payload ({} bytes): {}", payload.len(), hex::encode(payload))?;
    Ok(())
}

/// Periodic CAM broadcast over an in-process loopback transport.
///
/// The sender protects each CAM and hands the frame to a receiver thread,
/// which verifies it with the same protocol instance. Both sides record
/// outcomes in one shared log, written newest first when the run ends.
pub fn run<P, S, E>(
    protocol: Arc<P>,
    source: &mut S,
    env: &E,
    count: usize,
    period: Duration,
    out: &mut impl Write,
) -> Result<(), CliError>
where
    P: SecurityProtocol + Send + Sync + 'static,
    S: PlaintextSource,
    E: Environment,
{
    let log = Arc::new(OutcomeLog::new());
    let (transport, inbox) = mpsc::channel::<Message>();

    let receiver = {
        let protocol = Arc::clone(&protocol);
        let log = Arc::clone(&log);
        let env = env.clone();
        thread::spawn(move || {
            let mut verified = 0usize;
            for frame in inbox {
                let Some(message) = protocol.decapsulate(&frame) else {
                    tracing::debug!("message not verified, dropping");
                    continue;
                };
                verified += 1;
                log.record(&Outcome {
                    direction: Direction::Received,
                    kind: MessageKind::Cam,
                    protocol: protocol.kind(),
                    at_unix_secs: env.unix_time_secs(),
                    payload: message,
                });
            }
            verified
        })
    };

    tracing::info!(count, period_ms = period.as_millis() as u64, "sending CAMs");
    for sent in 0..count {
        let cam = source.generate(MessageKind::Cam)?;
        let protected = protocol.encapsulate(&cam);

        log.record(&Outcome {
            direction: Direction::Sent,
            kind: MessageKind::Cam,
            protocol: protocol.kind(),
            at_unix_secs: env.unix_time_secs(),
            payload: protected.clone(),
        });

        if transport.send(protected).is_err() {
            break;
        }
        if sent + 1 < count {
            thread::sleep(period);
        }
    }
    drop(transport);

    let verified = receiver.join().map_err(|_| CliError::ReceiverLost)?;
    tracing::info!(sent = count, verified, "run finished");

    for entry in log.entries() {
        writeln!(out, "{entry}")?;
    }
    Ok(())
}
