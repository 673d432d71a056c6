//! # Arithmetic Generation
//!
//! Operand generation and answer calculation for the four supported operations.
//! Operands are always chosen so the answer is a non-negative integer.

use crate::{MathMazeError, MathMazeResult, OperandRange, Operation};
use rand::Rng;

/// Default upper bound for multiplication operands and division divisors.
pub const DEFAULT_MULTIPLICATION_CAP: u32 = 12;

/// Generates an operand pair for `operation` within `range`.
///
/// Uses [`DEFAULT_MULTIPLICATION_CAP`] for multiplication and division.
pub fn generate_operands<R: Rng + ?Sized>(
    operation: Operation,
    range: OperandRange,
    rng: &mut R,
) -> [u32; 2] {
    generate_operands_capped(operation, range, DEFAULT_MULTIPLICATION_CAP, rng)
}

/// Generates an operand pair for `operation` within `range`, capping
/// multiplication operands and division divisors at `cap`.
///
/// - Addition and subtraction draw both operands from the full range.
/// - Multiplication draws both operands from `[min, min(max, cap)]`.
/// - Division draws a divisor from `[max(min, 1), min(max, cap)]` and a quotient
///   from the full range, returning `[divisor * quotient, divisor]` so the
///   division is exact by construction.
///
/// A cap below the range minimum collapses the capped range to the minimum.
///
/// # Examples
///
/// ```
/// use math_maze::{generate_operands_capped, OperandRange, Operation};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(3);
/// let [dividend, divisor] =
///     generate_operands_capped(Operation::Division, OperandRange::new(2, 10), 12, &mut rng);
/// assert_eq!(dividend % divisor, 0);
/// ```
pub fn generate_operands_capped<R: Rng + ?Sized>(
    operation: Operation,
    range: OperandRange,
    cap: u32,
    rng: &mut R,
) -> [u32; 2] {
    let lo = range.min.min(range.max);
    let hi = range.min.max(range.max);

    match operation {
        Operation::Addition | Operation::Subtraction => {
            [rng.gen_range(lo..=hi), rng.gen_range(lo..=hi)]
        }
        Operation::Multiplication => {
            let capped = hi.min(cap).max(lo);
            [rng.gen_range(lo..=capped), rng.gen_range(lo..=capped)]
        }
        Operation::Division => {
            let divisor_lo = lo.max(1);
            let divisor_hi = hi.min(cap).max(divisor_lo);
            let divisor = rng.gen_range(divisor_lo..=divisor_hi);
            let quotient = rng.gen_range(lo..=hi);
            [divisor * quotient, divisor]
        }
    }
}

/// Calculates the answer for an operand pair.
///
/// Subtraction yields the absolute difference. Division must be exact;
/// a zero divisor, a remainder, or an overflowing result is rejected.
///
/// # Examples
///
/// ```
/// use math_maze::{calculate_answer, Operation};
///
/// assert_eq!(calculate_answer(Operation::Subtraction, [3, 10]).unwrap(), 7);
/// assert_eq!(calculate_answer(Operation::Division, [24, 6]).unwrap(), 4);
/// assert!(calculate_answer(Operation::Division, [7, 2]).is_err());
/// ```
pub fn calculate_answer(operation: Operation, operands: [u32; 2]) -> MathMazeResult<u32> {
    let [a, b] = operands;

    let answer = match operation {
        Operation::Addition => a.checked_add(b),
        Operation::Subtraction => Some(a.abs_diff(b)),
        Operation::Multiplication => a.checked_mul(b),
        Operation::Division => match a.checked_rem(b) {
            Some(0) => a.checked_div(b),
            _ => None,
        },
    };

    answer.ok_or_else(|| {
        MathMazeError::InvalidOperation(format!(
            "{} has no exact answer for operands {} and {}",
            operation, a, b
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_addition_and_subtraction_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let range = OperandRange::new(3, 9);

        for operation in [Operation::Addition, Operation::Subtraction] {
            for _ in 0..200 {
                let [a, b] = generate_operands(operation, range, &mut rng);
                assert!((3..=9).contains(&a));
                assert!((3..=9).contains(&b));
            }
        }
    }

    #[test]
    fn test_multiplication_is_capped() {
        let mut rng = StdRng::seed_from_u64(2);
        let range = OperandRange::new(5, 100);

        for _ in 0..200 {
            let [a, b] = generate_operands(Operation::Multiplication, range, &mut rng);
            assert!((5..=12).contains(&a));
            assert!((5..=12).contains(&b));
        }
    }

    #[test]
    fn test_division_is_exact() {
        let mut rng = StdRng::seed_from_u64(3);
        let range = OperandRange::new(2, 10);

        for _ in 0..500 {
            let [dividend, divisor] = generate_operands(Operation::Division, range, &mut rng);
            assert!((2..=10).contains(&divisor));
            assert_eq!(dividend % divisor, 0);
            let quotient = dividend / divisor;
            assert!((2..=10).contains(&quotient));
            assert_eq!(calculate_answer(Operation::Division, [dividend, divisor]).unwrap(), quotient);
        }
    }

    #[test]
    fn test_division_never_uses_zero_divisor() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..200 {
            let [_, divisor] = generate_operands(Operation::Division, OperandRange::new(0, 3), &mut rng);
            assert!(divisor >= 1);
        }
    }

    #[test]
    fn test_cap_below_minimum_collapses_to_minimum() {
        let mut rng = StdRng::seed_from_u64(5);
        let [a, b] =
            generate_operands_capped(Operation::Multiplication, OperandRange::new(20, 30), 12, &mut rng);
        assert_eq!([a, b], [20, 20]);
    }

    #[test]
    fn test_inverted_range_is_normalised() {
        let mut rng = StdRng::seed_from_u64(6);
        let [a, b] = generate_operands(Operation::Addition, OperandRange::new(8, 4), &mut rng);
        assert!((4..=8).contains(&a));
        assert!((4..=8).contains(&b));
    }

    #[test]
    fn test_calculate_answer() {
        assert_eq!(calculate_answer(Operation::Addition, [4, 5]).unwrap(), 9);
        assert_eq!(calculate_answer(Operation::Subtraction, [9, 4]).unwrap(), 5);
        assert_eq!(calculate_answer(Operation::Subtraction, [4, 9]).unwrap(), 5);
        assert_eq!(calculate_answer(Operation::Multiplication, [7, 8]).unwrap(), 56);
        assert_eq!(calculate_answer(Operation::Division, [56, 8]).unwrap(), 7);
    }

    #[test]
    fn test_calculate_answer_rejects_inexact_division() {
        assert!(calculate_answer(Operation::Division, [10, 0]).is_err());
        assert!(calculate_answer(Operation::Division, [10, 3]).is_err());
        assert!(calculate_answer(Operation::Multiplication, [u32::MAX, 2]).is_err());
    }
}
