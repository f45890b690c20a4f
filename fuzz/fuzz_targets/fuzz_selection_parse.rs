//! Fuzz target: `CapabilitySet::parse_selection`
//!
//! Arbitrary operator input (after lossy UTF-8 conversion) must parse
//! without panicking, and a subsystem is only enabled when its letter is
//! present.
//!
//! cargo fuzz run fuzz_selection_parse

#![no_main]

use irrigator::capabilities::CapabilitySet;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let line = String::from_utf8_lossy(data);
    let caps = CapabilitySet::parse_selection(&line);

    let has = |c: u8| data.iter().any(|b| b.eq_ignore_ascii_case(&c));
    assert_eq!(caps.soil_enabled, has(b's'));
    assert_eq!(caps.pump_enabled, has(b'p'));
    assert_eq!(caps.light_enabled, has(b'l'));
});
