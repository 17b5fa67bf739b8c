//! Exact multiplication of [`BigInteger`] values.
//!
//! | Function | Strategy | Cost |
//! |----------|----------|------|
//! | [`naive_multiply`] | Long multiplication, one partial product per digit | O(n²) |
//! | [`karatsuba_multiply`] | Three half-size products instead of four | O(n^1.585) |
//! | [`native_multiply`] | `num_bigint::BigUint` multiplication | library-defined |
//!
//! [`naive_multiply`] and [`karatsuba_multiply`] share the same radix-10 digit
//! representation, so comparing them measures the algorithms rather than the
//! representation. [`native_multiply`] is there as a cross-check and a point of
//! reference: `num-bigint` uses machine-word limbs and switches to fast algorithms
//! internally, so its timings are not an asymptotic baseline.
//!
//! # Karatsuba
//!
//! With `m = ⌈max(len x, len y) / 2⌉`, write `x = x₁·10ᵐ + x₀` and `y = y₁·10ᵐ + y₀`.
//! Then
//!
//! ```text
//! z₀ = x₀·y₀
//! z₂ = x₁·y₁
//! z₁ = (x₀ + x₁)·(y₀ + y₁) − z₂ − z₀
//! x·y = z₂·10²ᵐ + z₁·10ᵐ + z₀
//! ```
//!
//! The halves are sub-slices of the operands' digits. The sums `x₀ + x₁` may carry
//! into one extra digit; the subtraction is done with explicit borrows and can never
//! go negative because `z₁` is a sum of non-negative cross terms.
//!
//! # References
//!
//! - A. Karatsuba and Yu. Ofman, "Multiplication of Many-Digital Numbers by
//!   Automatic Computers" (1962)

use crate::bigint::{
    BigInteger, U64_DIGITS, add_assign_shifted, add_digits, digits_from_u64, digits_to_u64,
    mul_digit, sub_assign_digits, trim,
};

/// Operands with at most this many digits are multiplied as `u64`.
///
/// Two 9-digit values multiply to at most 18 digits, which always fits.
pub const KARATSUBA_CUTOFF_DIGITS: usize = 9;

/// Long multiplication: each digit of `y` scales `x`, and the shifted partial
/// products are summed.
pub fn naive_multiply(x: &BigInteger, y: &BigInteger) -> BigInteger {
    let mut acc = Vec::with_capacity(x.digit_count() + y.digit_count());
    for (shift, &digit) in y.digits().iter().enumerate() {
        let partial = mul_digit(x.digits(), digit);
        add_assign_shifted(&mut acc, &partial, shift);
    }
    BigInteger::from_raw(acc)
}

/// Karatsuba multiplication with the default [`KARATSUBA_CUTOFF_DIGITS`].
pub fn karatsuba_multiply(x: &BigInteger, y: &BigInteger) -> BigInteger {
    karatsuba_multiply_with_cutoff(x, y, KARATSUBA_CUTOFF_DIGITS)
}

/// Karatsuba multiplication that falls back to native `u64` arithmetic once both
/// operands have at most `cutoff` digits.
///
/// `cutoff` is clamped to `1..=KARATSUBA_CUTOFF_DIGITS`. A cutoff of 1 recurses all the
/// way down to single decimal digits.
pub fn karatsuba_multiply_with_cutoff(
    x: &BigInteger,
    y: &BigInteger,
    cutoff: usize,
) -> BigInteger {
    let cutoff = cutoff.clamp(1, KARATSUBA_CUTOFF_DIGITS);
    BigInteger::from_raw(karatsuba(x.digits(), y.digits(), cutoff))
}

/// Multiplies with `num-bigint`, converting in and out of the decimal representation.
pub fn native_multiply(x: &BigInteger, y: &BigInteger) -> BigInteger {
    BigInteger::from_native(&(x.to_native() * y.to_native()))
}

/// Returns the product digits, possibly with high-order zeros. Empty means zero.
fn karatsuba(x: &[u8], y: &[u8], cutoff: usize) -> Vec<u8> {
    let x = trim(x);
    let y = trim(y);
    if x.is_empty() || y.is_empty() {
        return Vec::new();
    }
    if x.len() <= cutoff && y.len() <= cutoff {
        debug_assert!(x.len() + y.len() <= U64_DIGITS + 1);
        return digits_from_u64(digits_to_u64(x) * digits_to_u64(y));
    }
    if x.len() == 1 {
        return mul_digit(y, x[0]);
    }
    if y.len() == 1 {
        return mul_digit(x, y[0]);
    }

    let m = x.len().max(y.len()).div_ceil(2);
    let (x0, x1) = split_digits(x, m);
    let (y0, y1) = split_digits(y, m);

    let z0 = karatsuba(x0, y0, cutoff);
    let z2 = karatsuba(x1, y1, cutoff);
    let mut z1 = karatsuba(&add_digits(x0, x1), &add_digits(y0, y1), cutoff);

    let underflow = sub_assign_digits(&mut z1, &z2) | sub_assign_digits(&mut z1, &z0);
    debug_assert!(!underflow, "karatsuba middle term went negative");

    let mut out = Vec::with_capacity(x.len() + y.len());
    add_assign_shifted(&mut out, &z0, 0);
    add_assign_shifted(&mut out, &z1, m);
    add_assign_shifted(&mut out, &z2, 2 * m);
    out
}

/// Splits at digit `m` into `(low, high)` views. `high` is empty if the operand is short.
#[inline]
fn split_digits(digits: &[u8], m: usize) -> (&[u8], &[u8]) {
    if digits.len() <= m {
        (digits, &[])
    } else {
        digits.split_at(m)
    }
}
