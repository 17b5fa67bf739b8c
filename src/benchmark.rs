//! Timing harness for the closest-pair and multiplication entry points.
//!
//! # Timing policy
//!
//! Wall-clock measurements are noisy, so every run follows the same schedule:
//!
//! 1) One untimed call produces the reported output and doubles as the first warmup.
//! 2) `warmup - 1` further untimed calls.
//! 3) `repeats` samples. Each sample times `iterations` back-to-back calls and divides
//!    by `iterations`, so fast operations can be measured over a longer interval.
//!
//! A [`Timing`] keeps the best (minimum) and the mean per-call sample. The minimum is
//! the better estimate of the intrinsic cost; the mean shows how noisy the run was.
//!
//! Multiplication records are cross-checked: Karatsuba, naive and native products are
//! computed once outside the timed region and compared. A disagreement is reported in
//! the record as a [`MismatchError`], never returned as an `Err`.

use std::fmt;
use std::hint::black_box;
use std::str::FromStr;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::bigint::BigInteger;
use crate::closest_pair::{closest_pair, closest_pair_brute_force};
use crate::dataset::OperandPair;
use crate::error::Error;
use crate::geometry::{ClosestPairResult, Point};
use crate::multiply::{karatsuba_multiply, naive_multiply, native_multiply};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    ClosestPair,
    ClosestPairBruteForce,
    Karatsuba,
    Naive,
    Native,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::ClosestPair,
        Algorithm::ClosestPairBruteForce,
        Algorithm::Karatsuba,
        Algorithm::Naive,
        Algorithm::Native,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::ClosestPair => "closest_pair",
            Algorithm::ClosestPairBruteForce => "closest_pair_brute_force",
            Algorithm::Karatsuba => "karatsuba",
            Algorithm::Naive => "naive",
            Algorithm::Native => "native",
        }
    }

    pub fn is_multiplication(self) -> bool {
        matches!(
            self,
            Algorithm::Karatsuba | Algorithm::Naive | Algorithm::Native
        )
    }

    /// Calls per timed sample. Cheap variants run more often to stay above timer noise.
    pub fn default_iterations(self) -> usize {
        match self {
            Algorithm::ClosestPair => 10,
            Algorithm::ClosestPairBruteForce => 1,
            Algorithm::Karatsuba => 50,
            Algorithm::Naive => 10,
            Algorithm::Native => 10_000,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|alg| alg.name() == s)
            .ok_or_else(|| Error::invalid_input(format!("unknown algorithm: {s}")))
    }
}

/// Borrowed input for a single benchmark run. Inputs are never mutated.
#[derive(Clone, Copy, Debug)]
pub enum BenchInput<'a> {
    Points(&'a [Point]),
    Operands(&'a BigInteger, &'a BigInteger),
}

impl BenchInput<'_> {
    pub fn describe(&self) -> InputDescriptor {
        match *self {
            BenchInput::Points(points) => InputDescriptor::Points {
                count: points.len(),
            },
            BenchInput::Operands(x, y) => InputDescriptor::Operands {
                digits: (x.digit_count(), y.digit_count()),
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputDescriptor {
    Points { count: usize },
    Operands { digits: (usize, usize) },
}

impl fmt::Display for InputDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputDescriptor::Points { count } => write!(f, "{count} points"),
            InputDescriptor::Operands { digits: (a, b) } => write!(f, "{a}x{b} digits"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BenchConfig {
    /// Untimed calls before sampling, including the one that produces the output.
    pub warmup: usize,
    /// Number of timed samples.
    pub repeats: usize,
    /// Calls per timed sample.
    pub iterations: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            warmup: 1,
            repeats: 3,
            iterations: 1,
        }
    }
}

impl BenchConfig {
    pub fn for_algorithm(algorithm: Algorithm) -> Self {
        Self::default().with_iterations(algorithm.default_iterations())
    }

    pub fn with_warmup(mut self, warmup: usize) -> Self {
        self.warmup = warmup;
        self
    }

    pub fn with_repeats(mut self, repeats: usize) -> Self {
        self.repeats = repeats;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    fn validate(&self) -> Result<(), Error> {
        if self.repeats == 0 {
            return Err(Error::invalid_input("repeats must be at least 1"));
        }
        if self.iterations == 0 {
            return Err(Error::invalid_input("iterations must be at least 1"));
        }
        Ok(())
    }
}

/// Per-call durations derived from the timed samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub best: Duration,
    pub mean: Duration,
    pub samples: usize,
    pub iterations: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum BenchOutput {
    ClosestPair(ClosestPairResult),
    Product(BigInteger),
}

/// The multiplication variants returned different products.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("multiplication variants disagree: karatsuba={karatsuba} naive={naive} native={native}")]
pub struct MismatchError {
    pub karatsuba: BigInteger,
    pub naive: BigInteger,
    pub native: BigInteger,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BenchmarkRecord {
    pub algorithm: Algorithm,
    pub input: InputDescriptor,
    pub timing: Timing,
    pub output: BenchOutput,
    /// Set when a multiplication cross-check failed. Always `None` for closest pair.
    pub mismatch: Option<MismatchError>,
}

impl BenchmarkRecord {
    pub fn cross_check_passed(&self) -> bool {
        self.mismatch.is_none()
    }
}

/// `baseline / candidate`: how many times faster the candidate ran.
///
/// `None` if the candidate's time is zero.
pub fn speedup(baseline: Duration, candidate: Duration) -> Option<f64> {
    if candidate.is_zero() {
        return None;
    }
    Some(baseline.as_secs_f64() / candidate.as_secs_f64())
}

/// Runs one algorithm on one input according to `config`.
pub fn benchmark(
    algorithm: Algorithm,
    input: BenchInput<'_>,
    config: &BenchConfig,
) -> Result<BenchmarkRecord, Error> {
    config.validate()?;

    let record = match (algorithm, input) {
        (Algorithm::ClosestPair, BenchInput::Points(points)) => {
            bench_closest_pair(algorithm, points, config, closest_pair)?
        }
        (Algorithm::ClosestPairBruteForce, BenchInput::Points(points)) => {
            bench_closest_pair(algorithm, points, config, closest_pair_brute_force)?
        }
        (alg, BenchInput::Operands(x, y)) if alg.is_multiplication() => {
            let mismatch = cross_check(x, y);
            bench_multiplier(alg, x, y, config, mismatch)
        }
        (alg, input) => {
            return Err(Error::invalid_input(format!(
                "{alg} cannot run on {}",
                input.describe()
            )));
        }
    };
    Ok(record)
}

/// Divide and conquer against brute force on the same points.
#[derive(Clone, Debug, PartialEq)]
pub struct ClosestPairComparison {
    pub divide_and_conquer: BenchmarkRecord,
    pub brute_force: BenchmarkRecord,
    pub distances_agree: bool,
}

impl ClosestPairComparison {
    /// How many times faster divide and conquer ran than brute force.
    pub fn speedup(&self) -> Option<f64> {
        speedup(
            self.brute_force.timing.best,
            self.divide_and_conquer.timing.best,
        )
    }
}

/// Benchmarks both closest-pair variants on `points`, using `configure` to pick each
/// variant's schedule.
pub fn compare_closest_pair(
    points: &[Point],
    configure: impl Fn(Algorithm) -> BenchConfig,
) -> Result<ClosestPairComparison, Error> {
    let input = BenchInput::Points(points);
    let run = |algorithm: Algorithm| benchmark(algorithm, input, &configure(algorithm));
    let divide_and_conquer = run(Algorithm::ClosestPair)?;
    let brute_force = run(Algorithm::ClosestPairBruteForce)?;

    let distances_agree = match (&divide_and_conquer.output, &brute_force.output) {
        (BenchOutput::ClosestPair(a), BenchOutput::ClosestPair(b)) => a.distance == b.distance,
        _ => false,
    };
    if !distances_agree {
        warn!("closest pair variants disagree on {} points", points.len());
    }

    Ok(ClosestPairComparison {
        divide_and_conquer,
        brute_force,
        distances_agree,
    })
}

/// All three multipliers on the same operands.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiplicationComparison {
    pub karatsuba: BenchmarkRecord,
    pub naive: BenchmarkRecord,
    pub native: BenchmarkRecord,
}

impl MultiplicationComparison {
    pub fn products_match(&self) -> bool {
        self.karatsuba.cross_check_passed()
    }

    pub fn mismatch(&self) -> Option<&MismatchError> {
        self.karatsuba.mismatch.as_ref()
    }

    /// `naive / karatsuba`, the comparison within one digit representation.
    pub fn karatsuba_vs_naive(&self) -> Option<f64> {
        speedup(self.naive.timing.best, self.karatsuba.timing.best)
    }

    /// `karatsuba / native`, how far the decimal implementation is from `num-bigint`.
    pub fn native_vs_karatsuba(&self) -> Option<f64> {
        speedup(self.karatsuba.timing.best, self.native.timing.best)
    }
}

/// Benchmarks every multiplier on `x * y`, using `configure` to pick each variant's
/// schedule.
pub fn compare_multipliers(
    x: &BigInteger,
    y: &BigInteger,
    configure: impl Fn(Algorithm) -> BenchConfig,
) -> Result<MultiplicationComparison, Error> {
    let mismatch = cross_check(x, y);
    let run = |algorithm: Algorithm| -> Result<BenchmarkRecord, Error> {
        let config = configure(algorithm);
        config.validate()?;
        Ok(bench_multiplier(
            algorithm,
            x,
            y,
            &config,
            mismatch.clone(),
        ))
    };

    Ok(MultiplicationComparison {
        karatsuba: run(Algorithm::Karatsuba)?,
        naive: run(Algorithm::Naive)?,
        native: run(Algorithm::Native)?,
    })
}

/// Aggregate over the first pairs of an integers dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetSummary {
    pub comparisons: Vec<MultiplicationComparison>,
}

impl DatasetSummary {
    pub fn mismatches(&self) -> usize {
        self.comparisons
            .iter()
            .filter(|c| !c.products_match())
            .count()
    }

    /// Mean of the best per-call times of one variant across all pairs.
    pub fn average(&self, algorithm: Algorithm) -> Option<Duration> {
        let times: Vec<Duration> = self
            .comparisons
            .iter()
            .filter_map(|c| match algorithm {
                Algorithm::Karatsuba => Some(c.karatsuba.timing.best),
                Algorithm::Naive => Some(c.naive.timing.best),
                Algorithm::Native => Some(c.native.timing.best),
                _ => None,
            })
            .collect();
        if times.is_empty() {
            return None;
        }
        Some(per_call(times.iter().sum(), times.len()))
    }

    pub fn karatsuba_vs_naive(&self) -> Option<f64> {
        speedup(
            self.average(Algorithm::Naive)?,
            self.average(Algorithm::Karatsuba)?,
        )
    }
}

pub fn benchmark_dataset_pairs(
    pairs: &[OperandPair],
    limit: usize,
    configure: impl Fn(Algorithm) -> BenchConfig,
) -> Result<DatasetSummary, Error> {
    let comparisons = pairs
        .iter()
        .take(limit)
        .map(|(x, y)| compare_multipliers(x, y, &configure))
        .collect::<Result<Vec<_>, _>>()?;

    let summary = DatasetSummary { comparisons };
    if summary.mismatches() > 0 {
        warn!(
            "{} of {} operand pairs produced mismatched products",
            summary.mismatches(),
            summary.comparisons.len()
        );
    }
    Ok(summary)
}

fn cross_check(x: &BigInteger, y: &BigInteger) -> Option<MismatchError> {
    let karatsuba = karatsuba_multiply(x, y);
    let naive = naive_multiply(x, y);
    let native = native_multiply(x, y);
    if karatsuba == naive && naive == native {
        return None;
    }

    let err = MismatchError {
        karatsuba,
        naive,
        native,
    };
    warn!("{err}");
    Some(err)
}

fn bench_closest_pair(
    algorithm: Algorithm,
    points: &[Point],
    config: &BenchConfig,
    solve: impl Fn(&[Point]) -> Result<ClosestPairResult, Error>,
) -> Result<BenchmarkRecord, Error> {
    // The first call is the output and the first warmup; a bad input fails here.
    let first = solve(points)?;
    let timing = sample(config, || solve(black_box(points)));

    let record = BenchmarkRecord {
        algorithm,
        input: InputDescriptor::Points {
            count: points.len(),
        },
        timing,
        output: BenchOutput::ClosestPair(first),
        mismatch: None,
    };
    log_record(&record);
    Ok(record)
}

fn bench_multiplier(
    algorithm: Algorithm,
    x: &BigInteger,
    y: &BigInteger,
    config: &BenchConfig,
    mismatch: Option<MismatchError>,
) -> BenchmarkRecord {
    let (product, timing) = match algorithm {
        Algorithm::Karatsuba => {
            run_timed(config, || karatsuba_multiply(black_box(x), black_box(y)))
        }
        Algorithm::Naive => run_timed(config, || naive_multiply(black_box(x), black_box(y))),
        _ => {
            // Conversions stay outside the timed region.
            let (a, b) = (x.to_native(), y.to_native());
            let (native, timing) = run_timed(config, || black_box(&a) * black_box(&b));
            (BigInteger::from_native(&native), timing)
        }
    };

    let record = BenchmarkRecord {
        algorithm,
        input: InputDescriptor::Operands {
            digits: (x.digit_count(), y.digit_count()),
        },
        timing,
        output: BenchOutput::Product(product),
        mismatch,
    };
    log_record(&record);
    record
}

fn run_timed<T>(config: &BenchConfig, mut f: impl FnMut() -> T) -> (T, Timing) {
    let output = f();
    let timing = sample(config, f);
    (output, timing)
}

/// Remaining warmup calls and the timed samples, after the output-producing call.
fn sample<T>(config: &BenchConfig, mut f: impl FnMut() -> T) -> Timing {
    for _ in 1..config.warmup {
        black_box(f());
    }

    let mut samples = Vec::with_capacity(config.repeats);
    for _ in 0..config.repeats {
        let start = Instant::now();
        for _ in 0..config.iterations {
            black_box(f());
        }
        samples.push(per_call(start.elapsed(), config.iterations));
    }

    let best = samples.iter().copied().min().unwrap_or_default();
    let mean = per_call(samples.iter().sum(), samples.len());
    Timing {
        best,
        mean,
        samples: samples.len(),
        iterations: config.iterations,
    }
}

/// Integer division, so a mean is never rounded below the minimum sample.
fn per_call(total: Duration, count: usize) -> Duration {
    total / u32::try_from(count.max(1)).unwrap_or(u32::MAX)
}

fn log_record(record: &BenchmarkRecord) {
    debug!(
        "{} on {}: best={:?} mean={:?} ({}x{})",
        record.algorithm,
        record.input,
        record.timing.best,
        record.timing.mean,
        record.timing.samples,
        record.timing.iterations
    );
}
