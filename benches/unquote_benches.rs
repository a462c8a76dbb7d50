use c_unquote::{Unquoter, token::unquote, unquote8, unquote16};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::borrow::Cow;

// --- Benchmark Data ---
// One literal without escapes: the best case, a single borrowed run.
const NO_ESCAPES: &str = r#""This is a simple literal without any escape sequences. It is plain ASCII text, designed to test the best-case path where the scanner yields the whole body as a single slice.""#;
// A few escapes and several adjacent literals, as found in generated headers.
const SPARSE_ESCAPES: &str = r#""Here's a literal with a \"quote\" and a \\ backslash.\n"
    "It continues on a second line with a\ttab and a bell \a."
    "And a third."#;
// Almost nothing but escapes.
const DENSE_ESCAPES: &str = r#""\a\b\f\n\r\t\v\\\"\?\0\12\123\x1\x7F""#;
// Unicode escapes, including one outside the BMP.
const UNICODE_ESCAPES: &str = r#""Unicode test: éàçüö. Emoji: \U0001F600. More symbols: ❤️✅.""#;

const CASES: [(&str, &str); 4] = [
    ("No Escapes", NO_ESCAPES),
    ("Sparse Escapes", SPARSE_ESCAPES),
    ("Dense Escapes", DENSE_ESCAPES),
    ("Unicode", UNICODE_ESCAPES),
];

/// Benchmarks for narrow input.
fn narrow_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Narrow");

    for (id, input) in CASES.iter() {
        let input = input.as_bytes();

        // 1. Pure iterator performance (no allocation).
        group.bench_with_input(BenchmarkId::new("Iterate Only", id), input, |b, i| {
            b.iter(|| {
                for token in unquote(i) {
                    let _ = black_box(token);
                }
            })
        });

        // 2. Collecting into a Vec (includes allocation).
        group.bench_with_input(BenchmarkId::new("Collect to Vec", id), input, |b, i| {
            b.iter(|| black_box(unquote8(i)))
        });

        // 3. Reusing one unquoter.
        group.bench_with_input(BenchmarkId::new("Reused Unquoter", id), input, |b, i| {
            let mut unquoter = Unquoter::new();
            b.iter(|| black_box(unquoter.unquote(i)))
        });
    }

    // 4. The `Cow::Borrowed` fast path where no allocation occurs.
    group.bench_function("Cow (Borrowed)", |b| {
        let mut unquoter = Unquoter::new();
        b.iter(|| {
            let cow: Cow<[u8]> = unquoter.try_unquote_cow(NO_ESCAPES.as_bytes()).unwrap();
            black_box(cow);
        })
    });

    // The `Cow::Owned` path where allocation is necessary.
    group.bench_function("Cow (Owned)", |b| {
        let mut unquoter = Unquoter::new();
        b.iter(|| {
            let cow: Cow<[u8]> = unquoter.try_unquote_cow(SPARSE_ESCAPES.as_bytes()).unwrap();
            black_box(cow);
        })
    });

    group.finish();
}

/// Benchmarks for UTF-16 input, which scans without memchr.
fn wide_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("UTF-16");

    for (id, input) in CASES.iter() {
        let input: Vec<u16> = input.encode_utf16().collect();
        group.bench_with_input(
            BenchmarkId::new("Collect to Vec", id),
            input.as_slice(),
            |b, i| b.iter(|| black_box(unquote16(i))),
        );
    }

    group.finish();
}

criterion_group!(benches, narrow_benchmarks, wide_benchmarks);
criterion_main!(benches);
