//! Verification of every dot product variant against the reference.

use super::code::{
    available_small_variants, available_variants, dot_original, small_dot_original, CKernel,
    MAX_SMALL_LENGTH,
};
use super::kernel::{dot, dot_product, small_dot};
use super::reorder_tolerance;
use crate::error::{BenchError, KernelError};
use crate::utils::bench::random_vec;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;

const VERIFY_SEED: u64 = 0x5eed_d07;

/// Lengths around the unroll boundaries plus one long, unaligned length.
const VERIFY_LENGTHS: [usize; 11] = [0, 1, 7, 8, 9, 15, 16, 17, 63, 64, 1023];

/// (offset_a, offset_b) pairs, including unequal offsets.
const VERIFY_OFFSETS: [(usize, usize); 3] = [(0, 0), (2, 2), (3, 5)];

const SMALL_TRIALS: usize = 32;

fn check(
    algorithm: &'static str,
    variant: &'static str,
    expected: f64,
    got: f64,
    tolerance: f64,
    case: impl FnOnce() -> String,
) -> Result<(), BenchError> {
    let diff = (got - expected).abs();
    if diff <= tolerance {
        return Ok(());
    }
    let detail = format!(
        "{}: expected {}, got {}, diff {} > tolerance {}",
        case(),
        expected,
        got,
        diff,
        tolerance
    );
    warn!(algorithm, variant, %detail, "verification failed");
    Err(BenchError::Verification {
        algorithm,
        variant,
        detail,
    })
}

/// Verify all general-length variants, and the checked entry points, against
/// the single-accumulator reference.
pub fn verify_general<T: CKernel>(algorithm: &'static str) -> Result<(), BenchError> {
    let mut rng = StdRng::seed_from_u64(VERIFY_SEED);
    let variants = available_variants::<T>();

    for &length in &VERIFY_LENGTHS {
        for &(offset_a, offset_b) in &VERIFY_OFFSETS {
            let a: Vec<T> = random_vec(&mut rng, offset_a + length);
            let b: Vec<T> = random_vec(&mut rng, offset_b + length);

            let expected = dot_original(&a, offset_a, &b, offset_b, length).as_f64();
            let tolerance = reorder_tolerance(&a, offset_a, &b, offset_b, length);
            let case = || format!("length {} offsets ({}, {})", length, offset_a, offset_b);

            for variant in &variants {
                let got = (variant.function)(&a, offset_a, &b, offset_b, length).as_f64();
                check(algorithm, variant.name, expected, got, tolerance, case)?;
            }

            let checked = dot(&a, offset_a, &b, offset_b, length)?.as_f64();
            check(algorithm, "dot", expected, checked, tolerance, case)?;
            let dispatched = dot_product(&a, offset_a, &b, offset_b, length)?.as_f64();
            check(algorithm, "dot_product", expected, dispatched, tolerance, case)?;
        }
    }

    Ok(())
}

/// Verify all small-length variants for every length the ladder supports,
/// and that the checked entry point rejects the first length past it.
pub fn verify_small<T: CKernel>(algorithm: &'static str) -> Result<(), BenchError> {
    let mut rng = StdRng::seed_from_u64(VERIFY_SEED);
    let variants = available_small_variants::<T>();

    for length in 0..=MAX_SMALL_LENGTH {
        for trial in 0..SMALL_TRIALS {
            let a: Vec<T> = random_vec(&mut rng, length);
            let b: Vec<T> = random_vec(&mut rng, length);

            let expected = small_dot_original(&a, &b, length).as_f64();
            let tolerance = reorder_tolerance(&a, 0, &b, 0, length);
            let case = || format!("length {} trial {}", length, trial);

            for variant in &variants {
                let got = (variant.function)(&a, &b, length).as_f64();
                check(algorithm, variant.name, expected, got, tolerance, case)?;
            }

            let checked = small_dot(&a, &b, length)?.as_f64();
            check(algorithm, "small_dot", expected, checked, tolerance, case)?;
        }
    }

    let too_long: Vec<T> = random_vec(&mut rng, MAX_SMALL_LENGTH + 1);
    match small_dot(&too_long, &too_long, MAX_SMALL_LENGTH + 1) {
        Err(KernelError::OutOfRange { .. }) => Ok(()),
        other => Err(BenchError::Verification {
            algorithm,
            variant: "small_dot",
            detail: format!(
                "length {} should be out of range, got {:?}",
                MAX_SMALL_LENGTH + 1,
                other
            ),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::dot_product::{dot_f32, dot_f64, small_dot_f32, small_dot_f64};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    const ASCENDING: [f64; 8] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
    const DESCENDING: [f64; 8] = [8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];

    fn naive(a: &[f64], b: &[f64]) -> f64 {
        let mut sum = 0.0;
        for i in 0..a.len() {
            sum += a[i] * b[i];
        }
        sum
    }

    #[test]
    fn test_verify_general_f64() {
        verify_general::<f64>("dot_product_f64").expect("all variants should agree");
    }

    #[test]
    fn test_verify_general_f32() {
        verify_general::<f32>("dot_product_f32").expect("all variants should agree");
    }

    #[test]
    fn test_verify_small_f64() {
        verify_small::<f64>("small_dot_f64").expect("all variants should agree");
    }

    #[test]
    fn test_verify_small_f32() {
        verify_small::<f32>("small_dot_f32").expect("all variants should agree");
    }

    #[test]
    fn test_concrete_scenario() {
        assert_eq!(small_dot_f64(&ASCENDING, &DESCENDING, 8), Ok(120.0));
        assert_eq!(dot_f64(&ASCENDING, 0, &DESCENDING, 0, 8), Ok(120.0));
        assert_eq!(dot_product(&ASCENDING, 0, &DESCENDING, 0, 8), Ok(120.0));

        let a32 = ASCENDING.map(|v| v as f32);
        let b32 = DESCENDING.map(|v| v as f32);
        assert_eq!(small_dot_f32(&a32, &b32, 8), Ok(120.0));
        assert_eq!(dot_f32(&a32, 0, &b32, 0, 8), Ok(120.0));
    }

    #[test]
    fn test_offset_scenario() {
        let mut a = vec![99.0, -99.0];
        a.extend_from_slice(&ASCENDING);
        let mut b = vec![-50.0, 50.0];
        b.extend_from_slice(&DESCENDING);
        assert_eq!(a.len(), 10);

        assert_eq!(dot_f64(&a, 2, &b, 2, 8), Ok(120.0));
        assert_eq!(dot_product(&a, 2, &b, 2, 8), Ok(120.0));
    }

    #[test]
    fn test_zero_length_identity() {
        let empty: [f64; 0] = [];
        assert_eq!(small_dot_f64(&empty, &empty, 0), Ok(0.0));
        assert_eq!(dot_f64(&empty, 0, &empty, 0, 0), Ok(0.0));
        assert_eq!(small_dot_f32(&[1.0], &[1.0], 0), Ok(0.0));
        // Offset at the very end of the buffer is still a valid empty range.
        assert_eq!(dot_f32(&[1.0, 2.0], 2, &[3.0], 1, 0), Ok(0.0));
    }

    #[test]
    fn test_unroll_boundaries() {
        for length in [7usize, 8, 9, 15, 16, 17] {
            let a: Vec<f64> = (0..length).map(|i| (i + 1) as f64).collect();
            let b: Vec<f64> = (0..length).map(|i| ((i % 3) as f64) - 1.0).collect();
            let expected = naive(&a, &b);
            assert_eq!(dot_f64(&a, 0, &b, 0, length), Ok(expected), "length {}", length);
            assert_eq!(dot_product(&a, 0, &b, 0, length), Ok(expected), "length {}", length);
        }
    }

    #[test]
    fn test_type_parity_on_integer_inputs() {
        for length in [0usize, 3, 8, 13, 40] {
            let a64: Vec<f64> = (0..length).map(|i| (i as f64) - 20.0).collect();
            let b64: Vec<f64> = (0..length).map(|i| ((i * 7) % 11) as f64).collect();
            let a32: Vec<f32> = a64.iter().map(|&v| v as f32).collect();
            let b32: Vec<f32> = b64.iter().map(|&v| v as f32).collect();

            let d64 = dot_f64(&a64, 0, &b64, 0, length).unwrap();
            let d32 = dot_f32(&a32, 0, &b32, 0, length).unwrap();
            assert_relative_eq!(d64, d32 as f64, max_relative = f32::EPSILON as f64);
        }
    }

    #[test]
    fn test_small_dot_out_of_range() {
        let a = [1.0f64; 16];
        assert_eq!(
            small_dot_f64(&a, &a, 9),
            Err(KernelError::OutOfRange { length: 9, max: MAX_SMALL_LENGTH })
        );
        // The dispatcher has no such limit.
        assert_eq!(dot_product(&a, 0, &a, 0, 16), Ok(16.0));
    }

    #[test]
    fn test_out_of_bounds() {
        let a = [1.0f32; 10];
        let b = [1.0f32; 4];

        assert_eq!(
            small_dot_f32(&a, &b, 5),
            Err(KernelError::OutOfBounds { buffer: "b", offset: 0, length: 5, available: 4 })
        );
        assert_eq!(
            dot_f32(&a, 3, &b, 0, 8),
            Err(KernelError::OutOfBounds { buffer: "a", offset: 3, length: 8, available: 10 })
        );
        assert!(matches!(
            dot_product(&a, usize::MAX, &b, 0, 2),
            Err(KernelError::OutOfBounds { buffer: "a", .. })
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = KernelError::OutOfRange { length: 12, max: 8 };
        assert_eq!(err.to_string(), "small dot product length 12 exceeds the maximum of 8");
        let err = BenchError::from(err);
        assert!(err.to_string().contains("exceeds"));
    }

    proptest! {
        #[test]
        fn prop_small_dot_matches_reference(
            pairs in prop::collection::vec((-1e3f64..1e3, -1e3f64..1e3), 0..=MAX_SMALL_LENGTH)
        ) {
            let (a, b): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
            let expected = naive(&a, &b);
            let got = small_dot(&a, &b, a.len()).unwrap();
            prop_assert!((got - expected).abs() <= reorder_tolerance(&a, 0, &b, 0, a.len()));
        }

        #[test]
        fn prop_dot_matches_reference(
            pairs in prop::collection::vec((-1e3f64..1e3, -1e3f64..1e3), 0..200),
            offset_a in 0usize..9,
            offset_b in 0usize..9,
        ) {
            let (values_a, values_b): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
            let length = values_a.len();
            let mut a = vec![f64::NAN; offset_a];
            a.extend_from_slice(&values_a);
            let mut b = vec![f64::NAN; offset_b];
            b.extend_from_slice(&values_b);

            let expected = naive(&values_a, &values_b);
            let tolerance = reorder_tolerance(&a, offset_a, &b, offset_b, length);
            let got = dot(&a, offset_a, &b, offset_b, length).unwrap();
            prop_assert!((got - expected).abs() <= tolerance, "got {} expected {}", got, expected);
            let dispatched = dot_product(&a, offset_a, &b, offset_b, length).unwrap();
            prop_assert!((dispatched - expected).abs() <= tolerance);
        }

        #[test]
        fn prop_f32_tracks_f64_on_integers(
            pairs in prop::collection::vec((-100i32..100, -100i32..100), 0..64)
        ) {
            let a64: Vec<f64> = pairs.iter().map(|p| p.0 as f64).collect();
            let b64: Vec<f64> = pairs.iter().map(|p| p.1 as f64).collect();
            let a32: Vec<f32> = pairs.iter().map(|p| p.0 as f32).collect();
            let b32: Vec<f32> = pairs.iter().map(|p| p.1 as f32).collect();
            let n = pairs.len();

            // Every partial sum stays below 2^24, so both precisions are exact.
            prop_assert_eq!(dot_f64(&a64, 0, &b64, 0, n).unwrap(), dot_f32(&a32, 0, &b32, 0, n).unwrap() as f64);
        }
    }
}
