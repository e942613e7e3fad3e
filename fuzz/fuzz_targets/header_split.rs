//! Fuzz target for security header parsing
//!
//! Splits arbitrary bytes with both header layouts and reads every field.
//!
//! # Invariants
//!
//! - Inputs shorter than the header return `TooShort`, never panic
//! - Header plus payload always covers the whole input
//! - Negative key indices are reported, not wrapped into huge `usize` values

#![no_main]

use libfuzzer_sys::fuzz_target;
use roadseal_proto::{HashChainHeader, PseudonymMacHeader, WireHeader};

fuzz_target!(|data: &[u8]| {
    if let Ok((header, payload)) = HashChainHeader::split(data) {
        assert_eq!(HashChainHeader::SIZE + payload.len(), data.len());
        let _ = header.pseudo_id();
        let _ = header.mac();
        let _ = header.timestamp();
        match header.key_index_usize() {
            Ok(index) => assert!(index <= i32::MAX as usize),
            Err(_) => assert!(header.key_index() < 0),
        }
    } else {
        assert!(data.len() < HashChainHeader::SIZE);
    }

    if let Ok((header, payload)) = PseudonymMacHeader::split(data) {
        assert_eq!(PseudonymMacHeader::SIZE + payload.len(), data.len());
        assert_eq!(header.to_vec(), &data[..PseudonymMacHeader::SIZE]);
    } else {
        assert!(data.len() < PseudonymMacHeader::SIZE);
    }
});
