// Allow our dollar.cents digit grouping convention (e.g., 100_00 = $100.00)
#![allow(clippy::inconsistent_digit_grouping)]

//! Distribution benchmarks: one pass over rankings of increasing size.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use equiweight::{MissingPricePolicy, Portfolio, Position, Price, PriceMap, Ranking, distribute};

/// Build a ranking of `n` tickers, a portfolio holding every other ranked
/// ticker plus `n / 4` unranked ones, and prices from a deterministic RNG.
fn generate_inputs(n: usize) -> (Portfolio, Ranking, PriceMap) {
    let ranked: Vec<String> = (0..n).map(|i| format!("R{i:04}")).collect();
    let unranked: Vec<String> = (0..n / 4).map(|i| format!("U{i:04}")).collect();

    // Simple deterministic PRNG (xorshift32)
    let mut rng_state: u32 = 42;
    let mut next = || {
        rng_state ^= rng_state << 13;
        rng_state ^= rng_state >> 17;
        rng_state ^= rng_state << 5;
        rng_state
    };

    let mut prices = PriceMap::new();
    for t in ranked.iter().chain(unranked.iter()) {
        prices.insert(t.as_str(), Price(1_00 + (next() % 500_00) as i64));
    }

    let positions: Vec<Position> = ranked
        .iter()
        .step_by(2)
        .chain(unranked.iter())
        .map(|t| Position::new(t.as_str(), (next() % 2_000) as u64))
        .collect();

    (
        Portfolio::new(positions).unwrap(),
        Ranking::new(ranked).unwrap(),
        prices,
    )
}

fn bench_distribute(c: &mut Criterion) {
    let mut group = c.benchmark_group("distribute");

    for n in [10, 100, 1_000] {
        let inputs = generate_inputs(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &inputs, |b, (p, r, px)| {
            b.iter(|| {
                black_box(distribute(
                    p,
                    r,
                    1_000_000_00, // $1M
                    px,
                    MissingPricePolicy::Fail,
                ))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_distribute);
criterion_main!(benches);
