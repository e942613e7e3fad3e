//! Property-based tests for the security protocols
//!
//! For arbitrary payloads, clocks and RNG seeds:
//!
//! 1. **Round trip**: `decapsulate(encapsulate(m)) == Some(m)` within one second
//! 2. **Tamper sensitivity**: flipping any single bit of a frame rejects it
//! 3. **Freshness**: a verifier one or more seconds off rejects the frame
//! 4. **Passthrough identity**: the no-security variant never changes bytes
//! 5. **Framing**: header fields plus payload reassemble the frame

use proptest::prelude::*;
use roadseal_core::{
    Message, ProtocolKind, ProtocolSetup, SecurityProtocol, env::test_utils::MockEnv,
};

fn secured_kind() -> impl Strategy<Value = ProtocolKind> {
    prop_oneof![Just(ProtocolKind::HashChain), Just(ProtocolKind::PseudonymMac)]
}

fn any_kind() -> impl Strategy<Value = ProtocolKind> {
    prop_oneof![
        Just(ProtocolKind::None),
        Just(ProtocolKind::HashChain),
        Just(ProtocolKind::PseudonymMac)
    ]
}

fn payload() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..200)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_round_trip(
        kind in any_kind(),
        bytes in payload(),
        seed in any::<u64>(),
        now in any::<u64>(),
    ) {
        let protocol = ProtocolSetup::build(kind, MockEnv::seeded(seed, now)).unwrap();
        let message = Message::from(bytes);

        let protected = protocol.encapsulate(&message);
        prop_assert_eq!(protected.len(), message.len() + protocol.overhead());
        prop_assert_eq!(protocol.decapsulate(&protected), Some(message));
    }

    #[test]
    fn prop_single_bit_flip_rejected(
        kind in secured_kind(),
        bytes in payload(),
        seed in any::<u64>(),
        position in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let protocol = ProtocolSetup::build(kind, MockEnv::seeded(seed, 1_700_000_000)).unwrap();
        let protected = protocol.encapsulate(&Message::from(bytes));

        let mut tampered = protected.into_bytes();
        let index = position.index(tampered.len());
        tampered[index] ^= 1 << bit;

        prop_assert_eq!(protocol.decapsulate(&Message::from(tampered)), None);
    }

    #[test]
    fn prop_clock_skew_rejected(
        kind in secured_kind(),
        bytes in payload(),
        seed in any::<u64>(),
        now in 1_000_000u64..2_000_000_000,
        skew in prop_oneof![-1000i64..=-1, 1i64..=1000],
    ) {
        let env = MockEnv::seeded(seed, now);
        let protocol = ProtocolSetup::build(kind, env.clone()).unwrap();
        let protected = protocol.encapsulate(&Message::from(bytes));

        env.set_time(now.saturating_add_signed(skew));
        prop_assert_eq!(protocol.decapsulate(&protected), None);

        env.set_time(now);
        prop_assert!(protocol.decapsulate(&protected).is_some());
    }

    #[test]
    fn prop_passthrough_is_identity(bytes in payload()) {
        let protocol = ProtocolSetup::build(ProtocolKind::None, MockEnv::zeroed(0)).unwrap();
        let message = Message::from(bytes);

        prop_assert_eq!(protocol.encapsulate(&message), message.clone());
        prop_assert_eq!(protocol.decapsulate(&message), Some(message));
    }

    #[test]
    fn prop_security_fields_prefix_frame(
        kind in any_kind(),
        bytes in payload(),
        seed in any::<u64>(),
    ) {
        let protocol = ProtocolSetup::build(kind, MockEnv::seeded(seed, 1_700_000_000)).unwrap();
        let protected = protocol.encapsulate(&Message::from(bytes.clone()));

        let fields = protocol.security_fields(&protected).unwrap();
        prop_assert_eq!(fields.len(), protocol.overhead());

        let mut reassembled = fields;
        reassembled.extend_from_slice(&bytes);
        prop_assert_eq!(reassembled.as_slice(), protected.as_bytes());
    }

    #[test]
    fn prop_garbage_never_verifies(
        kind in secured_kind(),
        garbage in prop::collection::vec(any::<u8>(), 0..120),
    ) {
        let protocol = ProtocolSetup::build(kind, MockEnv::zeroed(1_700_000_000)).unwrap();
        prop_assert_eq!(protocol.decapsulate(&Message::from(garbage)), None);
    }
}
