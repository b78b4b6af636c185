//! Shared assertions for byte-for-byte comparison in round-trip tests.

/// Panic with the first mismatching index and a window of hex context
/// around it, instead of dumping two full buffers.
pub fn check_bytes_eq(left: &[u8], right: &[u8], what: &str) {
    if left.len() != right.len() {
        panic!(
            "{}: length mismatch, left {} bytes vs right {} bytes",
            what,
            left.len(),
            right.len()
        );
    }

    if let Some(i) = left.iter().zip(right).position(|(a, b)| a != b) {
        let start = i.saturating_sub(8);
        let end = (i + 8).min(left.len());
        panic!(
            "{}: first mismatch at index {} ({:#04x} vs {:#04x})\n  left[{}..{}]:  {:02x?}\n  right[{}..{}]: {:02x?}",
            what, i, left[i], right[i], start, end, &left[start..end], start, end, &right[start..end]
        );
    }
}

#[macro_export]
macro_rules! assert_bytes_eq {
    ($left:expr, $right:expr) => {
        $crate::test_utils::check_bytes_eq(&$left[..], &$right[..], "bytes differ")
    };
    ($left:expr, $right:expr, $what:expr) => {
        $crate::test_utils::check_bytes_eq(&$left[..], &$right[..], $what)
    };
}
