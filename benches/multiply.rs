use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use dnc_algorithms::{BigInteger, karatsuba_multiply, naive_multiply};

type MultiplyFn = fn(&BigInteger, &BigInteger) -> BigInteger;

const INPUT_SIZES: &[(&str, usize)] = &[
    ("d50", 50),
    ("d100", 100),
    ("d500", 500),
    ("d2k", 2_000),
];

#[inline]
fn next_u64(state: &mut u64) -> u64 {
    let mut x = *state;
    x ^= x >> 12;
    x ^= x << 25;
    x ^= x >> 27;
    *state = x;
    x.wrapping_mul(0x2545_F491_4F6C_DD1D)
}

fn make_operand(digits: usize, seed: u64) -> BigInteger {
    let mut state = seed;
    let mut text = String::with_capacity(digits);
    for i in 0..digits {
        let d = next_u64(&mut state) % 10;
        let d = if i == 0 { d % 9 + 1 } else { d };
        text.push(char::from(b'0' + d as u8));
    }
    text.parse().unwrap()
}

fn bench_variant(c: &mut Criterion, name: &str, func: MultiplyFn) {
    let mut group = c.benchmark_group(name);
    for &(label, digits) in INPUT_SIZES {
        group.throughput(Throughput::Elements(digits as u64));

        let x = make_operand(digits, 0xCAFE_F00D_0000_0001u64 ^ digits as u64);
        let y = make_operand(digits, 0xBADC_0FFE_EE11_D00Du64 ^ (digits as u64).rotate_left(17));
        group.bench_function(BenchmarkId::new("balanced", label), |b| {
            b.iter(|| black_box(func(black_box(&x), black_box(&y))));
        });

        let short = make_operand(digits / 10 + 1, 0x0DDB_A11_u64 ^ digits as u64);
        group.bench_function(BenchmarkId::new("unbalanced", label), |b| {
            b.iter(|| black_box(func(black_box(&x), black_box(&short))));
        });
    }
    group.finish();
}

fn bench_native(c: &mut Criterion) {
    let mut group = c.benchmark_group("native");
    for &(label, digits) in INPUT_SIZES {
        group.throughput(Throughput::Elements(digits as u64));

        let x = make_operand(digits, 0xCAFE_F00D_0000_0001u64 ^ digits as u64).to_native();
        let y = make_operand(digits, 0xBADC_0FFE_EE11_D00Du64 ^ (digits as u64).rotate_left(17))
            .to_native();
        group.bench_function(BenchmarkId::new("balanced", label), |b| {
            b.iter(|| black_box(black_box(&x) * black_box(&y)));
        });
    }
    group.finish();
}

fn bench_multiply(c: &mut Criterion) {
    bench_variant(c, "karatsuba", karatsuba_multiply);
    bench_variant(c, "naive", naive_multiply);
    bench_native(c);
}

criterion_group!(benches, bench_multiply);
criterion_main!(benches);
