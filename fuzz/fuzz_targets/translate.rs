#![no_main]

use goshift::cli::load::parse_module;
use goshift::emit::{EmitConfig, TARGETS};
use goshift::translate_target;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Any tree the loader accepts must translate on every target
        if let Ok(module) = parse_module("fuzz", s) {
            for target in TARGETS {
                let _ = translate_target(&module, target.name, EmitConfig::default().with_position_comments(true));
            }
        }
    }
});
