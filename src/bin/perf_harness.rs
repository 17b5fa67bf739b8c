use std::env;
use std::process;
use std::time::Duration;

use dnc_algorithms::{
    Algorithm, BenchConfig, BenchInput, BenchOutput, BenchmarkRecord, BigInteger, Dataset,
    OperandPair, Point, benchmark, benchmark_dataset_pairs, closest_pair,
    closest_pair_brute_force, compare_closest_pair, karatsuba_multiply, load_integer_pairs,
    load_points, naive_multiply, native_multiply,
};
use log::{LevelFilter, Log, Metadata, Record};

const DEFAULT_SEED: u64 = 0x1234_5678_9ABC_DEF0;
const DEFAULT_PAIR_LIMIT: usize = 3;
const MAX_COORD: u64 = 10_000;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Bench {
    Single(Algorithm),
    CompareClosestPair,
    CompareMultiply,
}

#[derive(Clone)]
struct Config {
    bench: Bench,
    len: usize,
    repeats: usize,
    iters: Option<usize>,
    warmup: usize,
    seed: u64,
    file: Option<String>,
    limit: usize,
    verify: bool,
    report: bool,
}

fn main() {
    let config = match parse_args() {
        Ok(result) => result,
        Err(err) => {
            eprintln!("error: {err}");
            print_usage(&program_name());
            process::exit(2);
        }
    };

    if config.verify {
        if let Err(err) = verify_bench(config.bench) {
            eprintln!("verification failed: {err}");
            process::exit(1);
        }
    }

    match run_bench(&config) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    }
}

fn parse_args() -> Result<Config, String> {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "perf_harness".to_string());

    let mut bench = None;
    let mut len = None;
    let mut repeats = 3;
    let mut iters = None;
    let mut warmup = 1;
    let mut seed = DEFAULT_SEED;
    let mut file = None;
    let mut limit = DEFAULT_PAIR_LIMIT;
    let mut verify = false;
    let mut report = true;
    let mut verbose = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--bench" => {
                let name = args.next().ok_or("--bench requires a value")?;
                let parsed = parse_bench(&name).ok_or_else(|| format!("unknown bench: {name}"))?;
                bench = Some(parsed);
            }
            "--len" => {
                let value = args.next().ok_or("--len requires a value")?;
                len = Some(parse_usize(&value, "--len")?);
            }
            "--repeats" => {
                let value = args.next().ok_or("--repeats requires a value")?;
                repeats = parse_usize(&value, "--repeats")?;
            }
            "--iters" => {
                let value = args.next().ok_or("--iters requires a value")?;
                iters = Some(parse_usize(&value, "--iters")?);
            }
            "--warmup" => {
                let value = args.next().ok_or("--warmup requires a value")?;
                warmup = parse_usize(&value, "--warmup")?;
            }
            "--seed" => {
                let value = args.next().ok_or("--seed requires a value")?;
                seed = parse_u64(&value, "--seed")?;
            }
            "--file" => {
                file = Some(args.next().ok_or("--file requires a path")?);
            }
            "--limit" => {
                let value = args.next().ok_or("--limit requires a value")?;
                limit = parse_usize(&value, "--limit")?;
            }
            "--verify" => verify = true,
            "--report" => report = true,
            "--no-report" => report = false,
            "--verbose" => verbose = true,
            "--list" => {
                list_benches();
                process::exit(0);
            }
            "-h" | "--help" => {
                print_usage(&program);
                process::exit(0);
            }
            _ => return Err(format!("unknown argument: {arg}")),
        }
    }

    install_logger(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });

    let bench = bench.ok_or("missing --bench")?;
    let len = len.unwrap_or_else(|| bench.default_len());

    Ok(Config {
        bench,
        len,
        repeats,
        iters,
        warmup,
        seed,
        file,
        limit,
        verify,
        report,
    })
}

fn program_name() -> String {
    env::args()
        .next()
        .unwrap_or_else(|| "perf_harness".to_string())
}

fn print_usage(program: &str) {
    eprintln!(
        "\
Usage:
  {program} --bench <name> [--len N] [--repeats N] [--iters N] [--warmup N] [--seed N]
  {program} --bench <name> --file <dataset> [--limit N]
  {program} --list

Options:
  --bench <name>   Benchmark to run (see --list)
  --len N          Point count, or operand digit count (bench-specific default)
  --repeats N      Timed samples per run (default: 3)
  --iters N        Calls per timed sample (default depends on the algorithm)
  --warmup N       Untimed calls before sampling (default: 1)
  --seed N         RNG seed for synthetic inputs (default: 0x123456789ABCDEF0)
  --file <path>    Read points or operand pairs from a dataset file instead
  --limit N        Operand pairs taken from --file (default: 3)
  --verify         Run a quick correctness check before benchmarking
  --report         Print a timing summary after the run (default)
  --no-report      Disable the timing summary
  --verbose        Also print debug log records (warnings are always shown)
  --list           Show available benches
"
    );
}

fn list_benches() {
    for alg in Algorithm::ALL {
        println!("{}", alg.name());
    }
    println!("closest_pair_compare");
    println!("multiply_compare");
}

fn parse_bench(name: &str) -> Option<Bench> {
    match name {
        "closest_pair_compare" => Some(Bench::CompareClosestPair),
        "multiply_compare" => Some(Bench::CompareMultiply),
        _ => name.parse().ok().map(Bench::Single),
    }
}

impl Bench {
    fn is_multiplication(self) -> bool {
        match self {
            Bench::Single(alg) => alg.is_multiplication(),
            Bench::CompareClosestPair => false,
            Bench::CompareMultiply => true,
        }
    }

    fn default_len(self) -> usize {
        match self {
            Bench::Single(Algorithm::ClosestPairBruteForce) => 2_000,
            Bench::Single(Algorithm::ClosestPair) => 100_000,
            Bench::CompareClosestPair => 2_000,
            _ => 1_000,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Bench::Single(alg) => alg.name(),
            Bench::CompareClosestPair => "closest_pair_compare",
            Bench::CompareMultiply => "multiply_compare",
        }
    }
}

impl Config {
    fn bench_config(&self, algorithm: Algorithm) -> BenchConfig {
        BenchConfig::for_algorithm(algorithm)
            .with_warmup(self.warmup)
            .with_repeats(self.repeats)
            .with_iterations(self.iters.unwrap_or_else(|| algorithm.default_iterations()))
    }
}

fn parse_usize(value: &str, flag: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| format!("{flag} expects a non-negative integer"))
}

fn parse_u64(value: &str, flag: &str) -> Result<u64, String> {
    value
        .parse::<u64>()
        .map_err(|_| format!("{flag} expects a non-negative integer"))
}

#[inline]
fn next_u64(state: &mut u64) -> u64 {
    let mut x = *state;
    x ^= x >> 12;
    x ^= x << 25;
    x ^= x >> 27;
    *state = x;
    x.wrapping_mul(0x2545_F491_4F6C_DD1D)
}

fn make_points(len: usize, seed: u64) -> Vec<Point> {
    let mut state = seed;
    let mut points = Vec::with_capacity(len);
    for _ in 0..len {
        let x = next_u64(&mut state) % (MAX_COORD + 1);
        let y = next_u64(&mut state) % (MAX_COORD + 1);
        points.push(Point::new(x as f64, y as f64));
    }
    points
}

/// A `digits`-long decimal number with a non-zero leading digit.
fn make_operand(digits: usize, state: &mut u64) -> BigInteger {
    let text: String = (0..digits.max(1))
        .map(|i| {
            let d = next_u64(state) % 10;
            let d = if i == 0 { d % 9 + 1 } else { d };
            char::from(b'0' + d as u8)
        })
        .collect();
    text.parse().unwrap_or_default()
}

fn make_operand_pairs(digits: usize, seed: u64) -> Vec<OperandPair> {
    let mut state = seed;
    let x = make_operand(digits, &mut state);
    let y = make_operand(digits, &mut state);
    vec![(x, y)]
}

fn load_checked<T>(dataset: Dataset<T>, path: &str) -> Vec<T> {
    for err in &dataset.errors {
        eprintln!("{path}: {err}");
    }
    dataset.records
}

/// Returns `Ok(false)` if a cross-check failed.
fn run_bench(config: &Config) -> Result<bool, String> {
    if config.bench.is_multiplication() {
        let pairs = match &config.file {
            Some(path) => load_integer_pairs(path)
                .map(|data| load_checked(data, path))
                .map_err(|err| err.to_string())?,
            None => make_operand_pairs(config.len, config.seed),
        };
        if pairs.is_empty() {
            return Err("no operand pairs to run".to_string());
        }
        run_multiplication(config, &pairs)
    } else {
        let points = match &config.file {
            Some(path) => load_points(path)
                .map(|data| load_checked(data, path))
                .map_err(|err| err.to_string())?,
            None => make_points(config.len, config.seed),
        };
        run_closest_pair(config, &points)
    }
}

fn run_multiplication(config: &Config, pairs: &[OperandPair]) -> Result<bool, String> {
    match config.bench {
        Bench::Single(alg) => {
            let mut ok = true;
            for (x, y) in pairs.iter().take(config.limit) {
                let record = benchmark(alg, BenchInput::Operands(x, y), &config.bench_config(alg))
                    .map_err(|err| err.to_string())?;
                ok &= record.cross_check_passed();
                if config.report {
                    print_record(config.bench, &record);
                }
            }
            Ok(ok)
        }
        _ => {
            let summary = benchmark_dataset_pairs(pairs, config.limit, |alg| {
                config.bench_config(alg)
            })
            .map_err(|err| err.to_string())?;
            if config.report {
                for cmp in &summary.comparisons {
                    print_record(config.bench, &cmp.karatsuba);
                    print_record(config.bench, &cmp.naive);
                    print_record(config.bench, &cmp.native);
                    println!(
                        "karatsuba_vs_naive={} native_vs_karatsuba={}",
                        format_ratio(cmp.karatsuba_vs_naive()),
                        format_ratio(cmp.native_vs_karatsuba())
                    );
                }
                println!(
                    "pairs={} mismatches={} avg_karatsuba_s={} avg_naive_s={} avg_native_s={} karatsuba_vs_naive={}",
                    summary.comparisons.len(),
                    summary.mismatches(),
                    format_secs(summary.average(Algorithm::Karatsuba)),
                    format_secs(summary.average(Algorithm::Naive)),
                    format_secs(summary.average(Algorithm::Native)),
                    format_ratio(summary.karatsuba_vs_naive())
                );
            }
            Ok(summary.mismatches() == 0)
        }
    }
}

fn run_closest_pair(config: &Config, points: &[Point]) -> Result<bool, String> {
    match config.bench {
        Bench::Single(alg) => {
            let record = benchmark(alg, BenchInput::Points(points), &config.bench_config(alg))
                .map_err(|err| err.to_string())?;
            if config.report {
                print_record(config.bench, &record);
            }
            Ok(true)
        }
        _ => {
            let cmp = compare_closest_pair(points, |alg| config.bench_config(alg))
                .map_err(|err| err.to_string())?;
            if config.report {
                print_record(config.bench, &cmp.divide_and_conquer);
                print_record(config.bench, &cmp.brute_force);
                println!(
                    "distances_agree={} speedup={}",
                    cmp.distances_agree,
                    format_ratio(cmp.speedup())
                );
            }
            Ok(cmp.distances_agree)
        }
    }
}

fn print_record(bench: Bench, record: &BenchmarkRecord) {
    let mut lines = Vec::with_capacity(4);
    lines.push(format!(
        "bench={} algorithm={} input=\"{}\" repeats={} iters={}",
        bench.name(),
        record.algorithm,
        record.input,
        record.timing.samples,
        record.timing.iterations
    ));
    lines.push(format!(
        "best_s={:.9} mean_s={:.9}",
        record.timing.best.as_secs_f64(),
        record.timing.mean.as_secs_f64()
    ));
    match &record.output {
        BenchOutput::ClosestPair(result) => lines.push(format!(
            "distance={:.6} pair=({}, {})-({}, {})",
            result.distance, result.pair.0.x, result.pair.0.y, result.pair.1.x, result.pair.1.y
        )),
        BenchOutput::Product(product) => lines.push(format!(
            "product_digits={}",
            product.digit_count()
        )),
    }
    if let Some(mismatch) = &record.mismatch {
        lines.push(format!("cross_check=FAILED {mismatch}"));
    } else if record.algorithm.is_multiplication() {
        lines.push("cross_check=ok".to_string());
    }

    println!("{}", lines.join("\n"));
}

fn format_secs(value: Option<Duration>) -> String {
    value.map_or_else(|| "n/a".to_string(), |d| format!("{:.9}", d.as_secs_f64()))
}

fn format_ratio(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |r| format!("{r:.2}x"))
}

fn verify_bench(bench: Bench) -> Result<(), String> {
    if bench.is_multiplication() {
        let x: BigInteger = "1234".parse().map_err(|e| format!("{e}"))?;
        let y: BigInteger = "5678".parse().map_err(|e| format!("{e}"))?;
        let expected = BigInteger::from(7_006_652u64);
        for (name, product) in [
            ("karatsuba", karatsuba_multiply(&x, &y)),
            ("naive", naive_multiply(&x, &y)),
            ("native", native_multiply(&x, &y)),
        ] {
            if product != expected {
                return Err(format!("{name}: 1234 * 5678 = {product}, expected {expected}"));
            }
        }
        return Ok(());
    }

    let points = [
        Point::new(1.0, 1.0),
        Point::new(2.0, 2.0),
        Point::new(3.0, 3.0),
        Point::new(100.0, 100.0),
    ];
    for (name, result) in [
        ("closest_pair", closest_pair(&points)),
        ("closest_pair_brute_force", closest_pair_brute_force(&points)),
    ] {
        let result = result.map_err(|e| format!("{name}: {e}"))?;
        if (result.distance - std::f64::consts::SQRT_2).abs() > 1.0e-12 {
            return Err(format!("{name}: distance {} != sqrt(2)", result.distance));
        }
    }
    Ok(())
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn install_logger(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
