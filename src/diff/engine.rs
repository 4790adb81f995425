//! Byte-positional comparison of two payloads

use crate::types::{BinDiffError, ComparisonOutcome, DiffRun, Side};

/// Compare two byte sequences and classify how they relate
///
/// 1. **Validation**: an empty side is rejected (left is checked first)
/// 2. **Size mismatch**: lengths differ → `SizeMismatch`, content is never read
/// 3. **Scan**: one forward pass collecting maximal runs of differing bytes
///    - no runs → `Equal`
///    - otherwise → `ContentMismatch(runs)`, runs ascending by offset
///
/// The function is pure: it allocates only the returned run list and can be
/// called from any number of threads at once.
///
/// # Arguments
/// * `left` - Payload on the left side of the comparison
/// * `right` - Payload on the right side of the comparison
///
/// # Returns
/// * `Ok(ComparisonOutcome)` - Fully classified outcome
/// * `Err(BinDiffError::InvalidArgument)` - One of the sides is empty
///
/// # Example
/// ```
/// use bindiff::diff::compare;
/// use bindiff::types::{ComparisonOutcome, DiffRun};
///
/// let outcome = compare(&[0, 0, 0, 0], &[1, 0, 1, 1])?;
/// assert_eq!(
///     outcome,
///     ComparisonOutcome::ContentMismatch(vec![DiffRun::new(0, 1), DiffRun::new(2, 2)])
/// );
/// # Ok::<(), bindiff::types::BinDiffError>(())
/// ```
pub fn compare(left: &[u8], right: &[u8]) -> Result<ComparisonOutcome, BinDiffError> {
    if left.is_empty() {
        return Err(BinDiffError::empty(Side::Left));
    }
    if right.is_empty() {
        return Err(BinDiffError::empty(Side::Right));
    }

    if left.len() != right.len() {
        return Ok(ComparisonOutcome::SizeMismatch);
    }

    let runs = diff_runs(left, right);
    if runs.is_empty() {
        Ok(ComparisonOutcome::Equal)
    } else {
        Ok(ComparisonOutcome::ContentMismatch(runs))
    }
}

/// Collect maximal differing runs of two equal-length sequences
fn diff_runs(left: &[u8], right: &[u8]) -> Vec<DiffRun> {
    debug_assert_eq!(left.len(), right.len());

    let mut runs = Vec::new();
    let mut run_start: Option<usize> = None;

    for (index, (a, b)) in left.iter().zip(right).enumerate() {
        if a != b {
            if run_start.is_none() {
                run_start = Some(index);
            }
            continue;
        }

        // First equal byte after a run closes it
        if let Some(start) = run_start.take() {
            runs.push(DiffRun::new(start, index - start));
        }
    }

    // Run reaching the end of the buffers
    if let Some(start) = run_start {
        runs.push(DiffRun::new(start, left.len() - start));
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_payloads_are_equal() {
        let outcome = compare(&[0, 0, 0, 0], &[0, 0, 0, 0]).unwrap();
        assert_eq!(outcome, ComparisonOutcome::Equal);
    }

    #[test]
    fn test_size_mismatch_short_circuits() {
        let outcome = compare(&[0, 0, 0, 0], &[0, 0]).unwrap();
        assert_eq!(outcome, ComparisonOutcome::SizeMismatch);
        assert!(outcome.runs().is_none());
    }

    #[test]
    fn test_content_mismatch_runs() {
        let outcome = compare(&[0, 0, 0, 0], &[1, 0, 1, 1]).unwrap();
        assert_eq!(
            outcome,
            ComparisonOutcome::ContentMismatch(vec![DiffRun::new(0, 1), DiffRun::new(2, 2)])
        );
    }

    #[test]
    fn test_empty_left_rejected() {
        let err = compare(&[], &[1]).unwrap_err();
        assert!(matches!(
            err,
            BinDiffError::InvalidArgument {
                side: Side::Left,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_right_rejected() {
        let err = compare(&[1], &[]).unwrap_err();
        assert!(matches!(
            err,
            BinDiffError::InvalidArgument {
                side: Side::Right,
                ..
            }
        ));
    }

    #[test]
    fn test_both_empty_reports_left() {
        let err = compare(&[], &[]).unwrap_err();
        assert!(matches!(
            err,
            BinDiffError::InvalidArgument {
                side: Side::Left,
                ..
            }
        ));
    }

    #[test]
    fn test_fully_different_is_single_run() {
        let outcome = compare(&[1, 2, 3], &[4, 5, 6]).unwrap();
        assert_eq!(outcome.runs(), Some(&[DiffRun::new(0, 3)][..]));
    }

    #[test]
    fn test_single_byte_payloads() {
        assert!(compare(&[7], &[7]).unwrap().is_equal());
        assert_eq!(compare(&[7], &[8]).unwrap().runs(), Some(&[DiffRun::new(0, 1)][..]));
    }

    #[test]
    fn test_run_in_the_middle() {
        let outcome = compare(b"abcdef", b"abXYef").unwrap();
        assert_eq!(outcome.runs(), Some(&[DiffRun::new(2, 2)][..]));
    }

    #[test]
    fn test_alternating_bytes_produce_separate_runs() {
        let outcome = compare(&[0, 0, 0, 0, 0], &[1, 0, 1, 0, 1]).unwrap();
        assert_eq!(
            outcome.runs(),
            Some(&[DiffRun::new(0, 1), DiffRun::new(2, 1), DiffRun::new(4, 1)][..])
        );
    }

    #[test]
    fn test_deterministic() {
        let left = vec![3u8; 64];
        let mut right = left.clone();
        right[10] = 0;
        right[40] = 0;

        let first = compare(&left, &right).unwrap();
        let second = compare(&left, &right).unwrap();
        assert_eq!(first, second);
    }
}
