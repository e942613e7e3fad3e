//! Known-answer tests with the default station configuration.
//!
//! Frames are fixed by a zero-entropy environment: every pool pseudonym is
//! the pseudonym of salt 0 and the drawn key index is 0. The vectors were
//! computed independently from the formulas in the device docs.

use roadseal_core::{
    FixtureSource, Message, MessageKind, PlaintextSource, ProtocolKind, ProtocolSetup,
    SecurityProtocol, env::test_utils::MockEnv,
};

const NOW: u64 = 1_700_000_000;

fn protect(kind: ProtocolKind, bytes: &[u8]) -> String {
    let protocol = ProtocolSetup::build(kind, MockEnv::zeroed(NOW)).unwrap();
    hex::encode(protocol.encapsulate(&Message::from(bytes)).as_bytes())
}

#[test]
fn hash_chain_frame() {
    insta::assert_snapshot!(
        protect(ProtocolKind::HashChain, &[0x42]),
        @"c70a660f0df51e42baf91d4de5b2328de0e83dfca45b48489ce27284d75729d5000000006553f10042"
    );
}

#[test]
fn pseudonym_mac_frame() {
    assert_eq!(
        protect(ProtocolKind::PseudonymMac, &[0x42]),
        "6553f1008d3148b3e18891f77a19ff62388d623db07617690221c47aaa6c13e724a564676e2be39a7dbd06d642"
    );
}

#[test]
fn passthrough_frame() {
    assert_eq!(protect(ProtocolKind::None, &[0x42]), "42");
}

#[test]
fn frames_verify_on_a_fresh_instance() {
    for kind in ProtocolKind::ALL {
        let receiver = ProtocolSetup::build(kind, MockEnv::seeded(99, NOW)).unwrap();
        let frame = hex::decode(protect(kind, &[0x42])).unwrap();

        assert_eq!(receiver.decapsulate(&Message::from(frame)), Some(Message::from(vec![0x42])));
    }
}

#[test]
fn recorded_cam_round_trips() {
    let cam = FixtureSource::recorded().generate(MessageKind::Cam).unwrap();

    for kind in ProtocolKind::ALL {
        let protocol = ProtocolSetup::build(kind, MockEnv::seeded(5, NOW)).unwrap();
        let protected = protocol.encapsulate(&cam);

        assert_eq!(protected.len(), cam.len() + protocol.overhead());
        assert_eq!(&protected.as_bytes()[protocol.overhead()..], cam.as_bytes());
        assert_eq!(protocol.decapsulate(&protected), Some(cam.clone()));
    }
}
