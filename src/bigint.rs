//! Arbitrary-precision non-negative integers stored as decimal digits.
//!
//! [`BigInteger`] keeps its digits least-significant first in a `Vec<u8>` with one
//! decimal digit per element. Radix 10 keeps the representation identical to the
//! textual datasets and makes the digit-by-digit baselines easy to follow; the
//! multipliers work on borrowed digit slices so that splitting an operand never
//! copies it.
//!
//! # Canonical form
//!
//! Every value has exactly one representation: no high-order zero digits, and zero
//! is the single digit `[0]`. [`BigInteger::from_digits`] rejects anything else and the
//! remaining constructors normalise, so code receiving a `BigInteger` can rely on it.
//!
//! The slice helpers in this module treat an empty slice as zero and tolerate
//! high-order zeros; [`normalize`] turns their output back into canonical form.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use num_bigint::BigUint;

use crate::error::Error;

/// Numeral base of a single stored digit.
pub const RADIX: u8 = 10;

/// Largest number of decimal digits that always fits in a `u64`.
pub(crate) const U64_DIGITS: usize = 19;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BigInteger {
    digits: Vec<u8>,
}

impl BigInteger {
    pub fn zero() -> Self {
        Self { digits: vec![0] }
    }

    pub fn one() -> Self {
        Self { digits: vec![1] }
    }

    /// Builds a value from least-significant-first decimal digits.
    ///
    /// Rejects empty input, digits outside `0..=9`, and superfluous high-order zeros.
    pub fn from_digits(digits: Vec<u8>) -> Result<Self, Error> {
        if digits.is_empty() {
            return Err(Error::invalid_input("a BigInteger needs at least one digit"));
        }
        if let Some(&d) = digits.iter().find(|&&d| d >= RADIX) {
            return Err(Error::invalid_input(format!("digit {d} is out of range")));
        }
        if digits.len() > 1 && digits[digits.len() - 1] == 0 {
            return Err(Error::invalid_input("BigInteger digits have leading zeros"));
        }
        Ok(Self { digits })
    }

    /// Wraps slice-helper output, restoring canonical form.
    pub(crate) fn from_raw(digits: Vec<u8>) -> Self {
        Self {
            digits: normalize(digits),
        }
    }

    /// Digits, least significant first.
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    pub fn digit_count(&self) -> usize {
        self.digits.len()
    }

    pub fn is_zero(&self) -> bool {
        self.digits == [0]
    }

    /// Returns `self - other`, or `None` if the difference would be negative.
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        let mut digits = self.digits.clone();
        if sub_assign_digits(&mut digits, &other.digits) {
            return None;
        }
        Some(Self::from_raw(digits))
    }

    /// Multiplies by `10^places`.
    pub fn shift_left(&self, places: usize) -> Self {
        if places == 0 || self.is_zero() {
            return self.clone();
        }
        let mut digits = vec![0; places];
        digits.extend_from_slice(&self.digits);
        Self { digits }
    }

    pub fn to_native(&self) -> BigUint {
        BigUint::from_radix_le(&self.digits, RADIX as u32)
            .unwrap_or_else(|| unreachable!("stored digits are always below the radix"))
    }

    pub fn from_native(value: &BigUint) -> Self {
        Self::from_raw(value.to_radix_le(RADIX as u32))
    }
}

impl Add for &BigInteger {
    type Output = BigInteger;

    fn add(self, rhs: &BigInteger) -> BigInteger {
        BigInteger::from_raw(add_digits(&self.digits, &rhs.digits))
    }
}

impl Ord for BigInteger {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_digits(&self.digits, &other.digits)
    }
}

impl PartialOrd for BigInteger {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Default for BigInteger {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<u64> for BigInteger {
    fn from(value: u64) -> Self {
        Self::from_raw(digits_from_u64(value))
    }
}

impl From<u128> for BigInteger {
    fn from(mut value: u128) -> Self {
        let mut digits = Vec::with_capacity(39);
        while value > 0 {
            digits.push((value % RADIX as u128) as u8);
            value /= RADIX as u128;
        }
        Self::from_raw(digits)
    }
}

impl FromStr for BigInteger {
    type Err = Error;

    /// Parses a decimal literal. Leading zeros are accepted and dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(Error::invalid_input("empty integer literal"));
        }
        let mut digits = Vec::with_capacity(s.len());
        for byte in s.bytes().rev() {
            if !byte.is_ascii_digit() {
                return Err(Error::invalid_input(format!(
                    "{s:?} is not a non-negative decimal integer"
                )));
            }
            digits.push(byte - b'0');
        }
        Ok(Self::from_raw(digits))
    }
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self
            .digits
            .iter()
            .rev()
            .map(|&d| char::from(b'0' + d))
            .collect();
        f.pad_integral(true, "", &text)
    }
}

/// Strips high-order zeros, returning a view. Zero becomes the empty slice.
#[inline]
pub(crate) fn trim(digits: &[u8]) -> &[u8] {
    let len = digits.iter().rposition(|&d| d != 0).map_or(0, |i| i + 1);
    &digits[..len]
}

/// Trims in place and restores the single-digit zero.
pub(crate) fn normalize(mut digits: Vec<u8>) -> Vec<u8> {
    let len = trim(&digits).len();
    digits.truncate(len);
    if digits.is_empty() {
        digits.push(0);
    }
    digits
}

pub(crate) fn cmp_digits(a: &[u8], b: &[u8]) -> Ordering {
    let a = trim(a);
    let b = trim(b);
    a.len()
        .cmp(&b.len())
        .then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

/// Schoolbook addition. The result may be one digit longer than the longer input.
pub(crate) fn add_digits(a: &[u8], b: &[u8]) -> Vec<u8> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut out = Vec::with_capacity(long.len() + 1);
    let mut carry = 0u8;
    for (i, &d) in long.iter().enumerate() {
        let sum = d + short.get(i).copied().unwrap_or(0) + carry;
        out.push(sum % RADIX);
        carry = sum / RADIX;
    }
    if carry > 0 {
        out.push(carry);
    }
    out
}

/// `acc += src * 10^shift`, growing `acc` as needed.
pub(crate) fn add_assign_shifted(acc: &mut Vec<u8>, src: &[u8], shift: usize) {
    let src = trim(src);
    if src.is_empty() {
        return;
    }
    if acc.len() < shift + src.len() {
        acc.resize(shift + src.len(), 0);
    }

    let mut carry = 0u8;
    let mut i = shift;
    for &d in src {
        let sum = acc[i] + d + carry;
        acc[i] = sum % RADIX;
        carry = sum / RADIX;
        i += 1;
    }
    while carry > 0 {
        if i == acc.len() {
            acc.push(carry);
            break;
        }
        let sum = acc[i] + carry;
        acc[i] = sum % RADIX;
        carry = sum / RADIX;
        i += 1;
    }
}

/// `acc -= b` with borrow propagation.
///
/// Returns `true` if `b > acc`; `acc` is then left holding the radix complement
/// and must be discarded.
pub(crate) fn sub_assign_digits(acc: &mut [u8], b: &[u8]) -> bool {
    let b = trim(b);
    if b.len() > acc.len() {
        return true;
    }

    let mut borrow = 0i8;
    for i in 0..acc.len() {
        if i >= b.len() && borrow == 0 {
            break;
        }
        let mut diff = acc[i] as i8 - b.get(i).copied().unwrap_or(0) as i8 - borrow;
        if diff < 0 {
            diff += RADIX as i8;
            borrow = 1;
        } else {
            borrow = 0;
        }
        acc[i] = diff as u8;
    }
    borrow != 0
}

/// Multiplies a digit slice by one decimal digit with carry propagation.
pub(crate) fn mul_digit(a: &[u8], digit: u8) -> Vec<u8> {
    if digit == 0 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(a.len() + 1);
    let mut carry = 0u8;
    for &d in a {
        let product = d * digit + carry;
        out.push(product % RADIX);
        carry = product / RADIX;
    }
    if carry > 0 {
        out.push(carry);
    }
    out
}

/// Reads at most [`U64_DIGITS`] digits as a native integer.
pub(crate) fn digits_to_u64(digits: &[u8]) -> u64 {
    debug_assert!(trim(digits).len() <= U64_DIGITS);
    digits
        .iter()
        .rev()
        .fold(0u64, |acc, &d| acc * RADIX as u64 + d as u64)
}

pub(crate) fn digits_from_u64(mut value: u64) -> Vec<u8> {
    let mut digits = Vec::with_capacity(20);
    while value > 0 {
        digits.push((value % RADIX as u64) as u8);
        value /= RADIX as u64;
    }
    digits
}
