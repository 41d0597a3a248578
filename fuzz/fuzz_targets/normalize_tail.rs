#![no_main]

// Checks that tail normalization keeps every meaningful byte and always ends on an output word
// boundary, for every word size.

use ccsds123_difftest::config::OutputWordSize;
use ccsds123_difftest::golden::{normalize_tail, trailing_zero_run};
use derive_enum_all_values::AllValues;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|payload: &[u8]| {
    let meaningful = payload.len() - trailing_zero_run(payload);

    for &word_size in OutputWordSize::all_values() {
        let golden = normalize_tail(payload, word_size);
        let word = word_size.bytes();

        assert_eq!(golden.len() % word, 0, "not aligned to {word} byte words");
        assert!(golden.len() > meaningful, "allowance byte dropped");
        assert!(golden.len() <= meaningful + word, "more than one word of padding");
        assert_eq!(&golden[..meaningful], &payload[..meaningful]);
        assert!(golden[meaningful..].iter().all(|&byte| byte == 0));
    }
});
