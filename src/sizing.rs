//! Effective-size computation: overload and round-up.
//!
//! Every placement decision — dispatch, cap checks, manifest totals —
//! uses the *effective* size of an entry, never its raw size directly.
//! Effective size is computed lazily at dispatch time rather than stored
//! on [`crate::entry::FileEntry`], since it depends on run-wide options
//! that aren't known while the crawler is still producing entries.

/// Computes the effective size of an entry given the configured overload
/// and round-up settings.
///
/// ```text
/// eff = raw_size + overload_size
/// if round_size >= 2: eff = ceil(eff / round_size) * round_size
/// ```
///
/// An entry with `raw_size == 0` still gets `eff = overload_size`
/// (rounded), so a zero-raw-size entry can have a nonzero effective
/// size once `overload_size > 0`. Callers that need to distinguish
/// "structurally empty" from "effectively empty" must compare
/// `raw_size`, not the result of this function.
pub fn effective_size(raw_size: u64, overload_size: u64, round_size: u64) -> u64 {
    let overloaded = raw_size.saturating_add(overload_size);
    if round_size >= 2 {
        round_up(overloaded, round_size)
    } else {
        overloaded
    }
}

/// Rounds `value` up to the next multiple of `modulus`. `modulus` must be
/// at least 2; the caller is responsible for that invariant (see
/// [`effective_size`], which only calls this when `round_size >= 2`).
fn round_up(value: u64, modulus: u64) -> u64 {
    debug_assert!(modulus >= 2, "round_up requires modulus >= 2");
    let remainder = value % modulus;
    if remainder == 0 {
        value
    } else {
        value + (modulus - remainder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_overload_no_round() {
        assert_eq!(effective_size(100, 0, 0), 100);
        assert_eq!(effective_size(100, 0, 1), 100);
    }

    #[test]
    fn overload_only() {
        assert_eq!(effective_size(100, 50, 0), 150);
    }

    #[test]
    fn round_up_only() {
        assert_eq!(effective_size(100, 0, 64), 128);
        assert_eq!(effective_size(128, 0, 64), 128);
        assert_eq!(effective_size(1, 0, 64), 64);
    }

    #[test]
    fn overload_then_round() {
        // raw=100, +10 overload = 110, rounded up to next multiple of 64 = 128
        assert_eq!(effective_size(100, 10, 64), 128);
    }

    #[test]
    fn zero_raw_size_with_overload_is_nonzero() {
        assert_eq!(effective_size(0, 8, 0), 8);
        assert_eq!(effective_size(0, 0, 0), 0);
    }

    #[test]
    fn round_size_of_one_is_a_no_op() {
        assert_eq!(effective_size(77, 3, 1), 80);
    }

    #[test]
    fn large_values_saturate_instead_of_overflowing() {
        let eff = effective_size(u64::MAX - 1, 10, 0);
        assert_eq!(eff, u64::MAX);
    }
}
