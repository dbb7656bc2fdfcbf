#![no_main]

use libfuzzer_sys::fuzz_target;
use scandi::frontend::{SourceUnit, compile};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Any outcome is fine as long as the front end returns
        if let Ok(program) = compile(&[SourceUnit::new("fuzz.scandi", s)]) {
            let _ = scandi::emit_trace(&program.tree);
        }
    }
});
