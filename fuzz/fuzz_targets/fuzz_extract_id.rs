#![no_main]

use libfuzzer_sys::fuzz_target;
use password_encoder::core::tag::{extract_encoded_password, extract_id};

fuzz_target!(|input: (&str, &str, &str)| {
    let (data, prefix, suffix) = input;
    if prefix.is_empty() || suffix.is_empty() {
        return;
    }

    let id = extract_id(data, prefix, suffix);
    let encoded = extract_encoded_password(data, suffix);
    assert!(data.ends_with(encoded));

    // A non-empty id sits right after the prefix and ahead of the first suffix
    if !id.is_empty() {
        let tag = [prefix, id, suffix].concat();
        assert!(data.starts_with(&tag));
        assert!(!id.contains(suffix));
    }
});
