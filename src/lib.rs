//! Divide-and-conquer algorithms next to their brute-force baselines.
//!
//! Each algorithm comes with a simpler reference implementation that is used both to
//! cross-check results and as the point of comparison when timing.
//!
//! # Algorithms
//!
//! - **Closest pair** ([`closest_pair`], [`closest_pair_brute_force`]): divide and conquer
//!   with a y-sorted strip merge against the exhaustive O(n²) scan
//! - **Multiplication** ([`karatsuba_multiply`], [`naive_multiply`], [`native_multiply`]):
//!   Karatsuba and long multiplication on a decimal [`BigInteger`], plus `num-bigint` as
//!   an independent check
//! - **Benchmarking** ([`benchmark`], [`compare_multipliers`], [`compare_closest_pair`]):
//!   repeated wall-clock timing with result cross-checks
//!
//! Datasets in the `"<a>,<b>"` line format are read with [`parse_points`] and
//! [`parse_integer_pairs`].
//!
//! # References
//!
//! - T. H. Cormen et al., *Introduction to Algorithms*, §33.4 (closest pair)
//! - D. E. Knuth, *The Art of Computer Programming* Vol. 2, §4.3.3 (Karatsuba)

mod benchmark;
mod bigint;
mod closest_pair;
mod dataset;
mod error;
mod geometry;
mod multiply;

pub use benchmark::*;
pub use bigint::{BigInteger, RADIX};
pub use closest_pair::*;
pub use dataset::*;
pub use error::*;
pub use geometry::*;
pub use multiply::*;
