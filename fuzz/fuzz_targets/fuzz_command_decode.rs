//! Fuzz target: `RemoteCommand::decode`
//!
//! Feeds arbitrary bytes in as a command poll body.  Decoding must never
//! panic, and anything that is not valid JSON must be rejected.
//!
//! cargo fuzz run fuzz_command_decode

#![no_main]

use irrigator::app::commands::RemoteCommand;
use irrigator::app::ports::RemoteError;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    match RemoteCommand::decode(data) {
        Ok(cmd) => {
            // Only a JSON object can decode.
            let first = data.iter().find(|b| !b.is_ascii_whitespace());
            assert_eq!(first, Some(&b'{'));
            let _ = cmd.water_now;
        }
        Err(e) => assert_eq!(e, RemoteError::Malformed),
    }
});
