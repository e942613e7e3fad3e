//! Fuzz target for message verification
//!
//! # Strategy
//!
//! - Random bytes: arbitrary input handed straight to `decapsulate`
//! - Mutation: a genuine frame with attacker-chosen byte edits
//! - Truncation: a genuine frame cut at an arbitrary length
//!
//! # Invariants
//!
//! - NEVER panic, whatever the input
//! - Random bytes never verify (forging a tag by chance is negligible)
//! - Any edit that changes a genuine frame makes it fail verification
//! - A truncated frame never yields the original payload

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use roadseal_core::{
    Message, ProtocolKind, ProtocolSetup, SecurityProtocol, env::test_utils::MockEnv,
};

const NOW: u64 = 1_700_000_000;

#[derive(Debug, Clone, Arbitrary)]
enum Attack {
    RandomBytes { bytes: Vec<u8> },
    Mutate { payload: Vec<u8>, edits: Vec<(u16, u8)> },
    Truncate { payload: Vec<u8>, keep: u16 },
}

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Scheme {
    HashChain,
    PseudonymMac,
}

fuzz_target!(|input: (Scheme, u64, Attack)| {
    let (scheme, seed, attack) = input;
    let kind = match scheme {
        Scheme::HashChain => ProtocolKind::HashChain,
        Scheme::PseudonymMac => ProtocolKind::PseudonymMac,
    };
    let Ok(protocol) = ProtocolSetup::build(kind, MockEnv::seeded(seed, NOW)) else {
        return;
    };

    match attack {
        Attack::RandomBytes { bytes } => {
            assert!(protocol.decapsulate(&Message::from(bytes)).is_none());
        }

        Attack::Mutate { payload, edits } => {
            let original = protocol.encapsulate(&Message::from(payload)).into_bytes();
            let mut mutated = original.clone();
            for (position, value) in edits {
                let index = position as usize % mutated.len();
                mutated[index] = value;
            }

            let verdict = protocol.decapsulate(&Message::from(mutated.clone()));
            if mutated == original {
                assert!(verdict.is_some());
            } else {
                assert!(verdict.is_none());
            }
        }

        Attack::Truncate { payload, keep } => {
            let original = Message::from(payload);
            let frame = protocol.encapsulate(&original).into_bytes();
            let keep = keep as usize % (frame.len() + 1);

            let verdict = protocol.decapsulate(&Message::from(&frame[..keep]));
            if keep == frame.len() {
                assert_eq!(verdict, Some(original));
            } else {
                assert_ne!(verdict, Some(original));
            }
        }
    }
});
