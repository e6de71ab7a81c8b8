#![no_main]

use libfuzzer_sys::fuzz_target;
use password_encoder::prelude::*;
use std::sync::OnceLock;

fn encoder() -> &'static DelegatingPasswordEncoder {
    static ENCODER: OnceLock<DelegatingPasswordEncoder> = OnceLock::new();
    ENCODER.get_or_init(default_delegating_encoder)
}

fuzz_target!(|data: &str| {
    // Malformed stored values must fail to match, never panic
    let (raw, stored) = data.split_once('\n').unwrap_or(("password", data));
    let encoder = encoder();
    let _ = encoder.matches(raw, stored);
    let _ = encoder.upgradable(stored);
});
