#![no_main]

// Checks the padding tolerance of the bitstream comparator: short zero padding matches, while
// long padding or any nonzero padding byte does not.

use ccsds123_difftest::compare::{compare_bytes, WORD_TOLERANCE};
use libfuzzer_sys::{arbitrary, fuzz_target};

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Input {
    pub golden: Vec<u8>,
    pub padding: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let Input { golden, padding } = input;
    let mut actual = golden.clone();
    actual.extend_from_slice(&padding);

    assert!(compare_bytes(&golden, &golden));

    let expected = padding.len() < WORD_TOLERANCE && padding.iter().all(|&byte| byte == 0);
    assert_eq!(compare_bytes(&actual, &golden), expected, "padding {padding:?}");
    assert_eq!(compare_bytes(&golden, &actual), expected, "padding {padding:?}");
});
