use crate::config::OutputWordSize;

/// Number of trailing `0x00` bytes in `data`.
pub fn trailing_zero_run(data: &[u8]) -> usize {
    data.iter().rev().take_while(|&&byte| byte == 0).count()
}

/// Length of the normalized golden payload for a payload of `len` bytes that ends in
/// `zero_run` zero bytes.
///
/// One byte past the last nonzero byte is kept for the final partial byte of the bitstream,
/// then the length is rounded up to a whole number of output words. A stripped length that is
/// already word aligned therefore gains a full extra word.
pub fn normalized_len(len: usize, zero_run: usize, word_size: OutputWordSize) -> usize {
    let stripped = len - zero_run;
    (stripped + 1).next_multiple_of(word_size.bytes())
}

/// Trims or zero extends the encoder payload so it ends on an output word boundary.
///
/// The result is never empty and its length is always a multiple of `word_size`.
pub fn normalize_tail(payload: &[u8], word_size: OutputWordSize) -> Vec<u8> {
    let golden_len = normalized_len(payload.len(), trailing_zero_run(payload), word_size);

    let mut golden = Vec::with_capacity(golden_len);
    golden.extend_from_slice(&payload[..golden_len.min(payload.len())]);
    golden.resize(golden_len, 0);
    golden
}

#[cfg(test)]
mod tests {
    use super::*;
    use derive_enum_all_values::AllValues;
    use rstest::rstest;

    #[rstest]
    #[case(&[], 0)]
    #[case(&[0, 0], 2)]
    #[case(&[1, 0, 2], 0)]
    #[case(&[1, 0, 2, 0, 0, 0], 3)]
    fn counts_trailing_zeros(#[case] data: &[u8], #[case] expected: usize) {
        assert_eq!(trailing_zero_run(data), expected);
    }

    #[rstest]
    // 5 meaningful bytes + 1 allowance, rounded up to 8.
    #[case(&[1, 2, 3, 4, 5, 0, 0, 0, 0, 0, 0, 0, 0, 0], OutputWordSize::Eight, 8)]
    // Payload shorter than the golden length is zero extended.
    #[case(&[1, 2, 3], OutputWordSize::Four, 4)]
    #[case(&[1, 2, 3, 4, 5], OutputWordSize::Four, 8)]
    #[case(&[9, 9, 9, 0, 0, 0, 0, 0, 0], OutputWordSize::One, 4)]
    #[case(&[9, 9, 9, 0, 0, 0, 0, 0, 0], OutputWordSize::Two, 4)]
    fn normalizes_to_word_boundary(
        #[case] payload: &[u8],
        #[case] word_size: OutputWordSize,
        #[case] expected_len: usize,
    ) {
        let golden = normalize_tail(payload, word_size);

        assert_eq!(golden.len(), expected_len);
        let kept = expected_len.min(payload.len());
        assert_eq!(&golden[..kept], &payload[..kept]);
        assert!(golden[kept..].iter().all(|&byte| byte == 0));
    }

    /// An already aligned stripped payload gains a whole extra word rather than a single
    /// allowance byte. The implementation under test pads the same way.
    #[rstest]
    #[case(OutputWordSize::One, 9)]
    #[case(OutputWordSize::Two, 10)]
    #[case(OutputWordSize::Four, 12)]
    #[case(OutputWordSize::Eight, 16)]
    fn aligned_payload_gains_a_full_word(
        #[case] word_size: OutputWordSize,
        #[case] expected_len: usize,
    ) {
        let payload = [0xAB; 8];

        let golden = normalize_tail(&payload, word_size);

        assert_eq!(golden.len(), expected_len);
        assert_eq!(&golden[..8], &payload);
        assert!(golden[8..].iter().all(|&byte| byte == 0));
    }

    #[test]
    fn all_zero_payload_keeps_one_word() {
        for &word_size in OutputWordSize::all_values() {
            let golden = normalize_tail(&[0; 37], word_size);
            assert_eq!(golden, vec![0; word_size.bytes()]);
        }
    }

    #[test]
    fn length_is_always_a_word_multiple() {
        let mut payload = Vec::new();
        for len in 0..64usize {
            payload.push((len * 37 % 5) as u8);
            for &word_size in OutputWordSize::all_values() {
                let golden = normalize_tail(&payload, word_size);
                assert!(!golden.is_empty());
                assert_eq!(golden.len() % word_size.bytes(), 0, "len {len}, {word_size}");
            }
        }
    }
}
