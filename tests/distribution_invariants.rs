// Allow our dollar.cents digit grouping convention (e.g., 100_00 = $100.00)
#![allow(clippy::inconsistent_digit_grouping)]

//! Property-based tests for distribution invariants.
//!
//! These tests use proptest to verify that key invariants hold
//! across randomly generated portfolios, rankings, and prices.

use equiweight::{
    Allocation, MissingPricePolicy, Operation, Portfolio, Position, Price, PriceMap, Quantity,
    Ranking, Side, Ticker, distribute,
};
use proptest::prelude::*;

const POOL: [&str; 8] = ["AAA", "BBB", "CCC", "DDD", "EEE", "FFF", "GGG", "HHH"];

/// A full market snapshot: every ticker in the pool is priced.
#[derive(Debug, Clone)]
struct Scenario {
    portfolio: Portfolio,
    ranking: Ranking,
    prices: PriceMap,
    cash: i64,
}

/// Generate a valid price ($0.01 to $500.00)
fn price_strategy() -> impl Strategy<Value = i64> {
    1i64..=500_00i64
}

fn scenario_strategy() -> impl Strategy<Value = Scenario> {
    (
        Just(POOL.to_vec()).prop_shuffle(),
        1usize..=POOL.len(),
        proptest::collection::vec(proptest::option::of(0u64..=5_000u64), POOL.len()),
        proptest::collection::vec(price_strategy(), POOL.len()),
        0i64..=10_000_000_00i64,
    )
        .prop_map(|(order, rank_len, holdings, prices, cash)| {
            let ranking = Ranking::new(order[..rank_len].iter().copied()).unwrap();
            let positions: Vec<Position> = POOL
                .iter()
                .zip(holdings)
                .filter_map(|(t, h)| h.map(|amount| Position::new(*t, amount)))
                .collect();
            let prices: PriceMap = POOL
                .iter()
                .zip(prices)
                .map(|(t, p)| (*t, Price(p)))
                .collect();
            Scenario {
                portfolio: Portfolio::new(positions).unwrap(),
                ranking,
                prices,
                cash,
            }
        })
}

fn run(s: &Scenario) -> Allocation {
    distribute(&s.portfolio, &s.ranking, s.cash, &s.prices, MissingPricePolicy::Fail)
        .expect("fully priced scenario must distribute")
}

fn price_of(s: &Scenario, ticker: &Ticker) -> Price {
    s.prices.get(ticker).expect("pool is fully priced")
}

fn signed_trade_value(s: &Scenario, op: &Operation) -> i64 {
    let v = price_of(s, &op.ticker).value_of(op.quantity).unwrap();
    match op.side {
        Side::Buy => v,
        Side::Sell => -v,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Net traded value equals the change in holdings value: cents are exact,
    /// so nothing leaks between cash and positions.
    #[test]
    fn holdings_value_conserved(s in scenario_strategy()) {
        let alloc = run(&s);
        let net: i64 = alloc.operations.iter().map(|op| signed_trade_value(&s, op)).sum();
        let before = s.portfolio.value(&s.prices).unwrap();
        let after = alloc.balanced.value(&s.prices).unwrap();
        prop_assert_eq!(after - before, net);
    }

    /// Ranked purchases never spend more than the cash plus what was sold.
    #[test]
    fn budget_never_negative(s in scenario_strategy()) {
        let alloc = run(&s);
        prop_assert!(alloc.remaining >= 0, "remaining went negative: {}", alloc.remaining);
    }

    #[test]
    fn balanced_within_ranking(s in scenario_strategy()) {
        let alloc = run(&s);
        for pos in alloc.balanced.positions() {
            prop_assert!(s.ranking.contains(&pos.ticker), "{} not ranked", pos.ticker);
        }
    }

    /// Each unranked holding is sold once, in full, and disappears.
    #[test]
    fn excluded_holdings_fully_liquidated(s in scenario_strategy()) {
        let alloc = run(&s);
        for pos in s.portfolio.positions().iter().filter(|p| !s.ranking.contains(&p.ticker)) {
            let ops: Vec<&Operation> = alloc.operations.iter().filter(|op| op.ticker == pos.ticker).collect();
            prop_assert_eq!(ops.len(), 1);
            prop_assert_eq!(ops[0], &Operation::sell(pos.ticker.clone(), pos.amount));
            prop_assert!(!alloc.balanced.contains(&pos.ticker));
        }
    }

    /// Ranked trades above one lot are whole lots.
    #[test]
    fn ranked_trades_are_lot_rounded(s in scenario_strategy()) {
        let alloc = run(&s);
        for op in alloc.operations.iter().filter(|op| s.ranking.contains(&op.ticker)) {
            if op.quantity > 100 {
                prop_assert_eq!(op.quantity % 100, 0, "{} not a whole lot", op);
            }
            if op.side == Side::Sell {
                prop_assert!(op.quantity >= 100, "ranked sell below one lot: {}", op);
            }
        }
    }

    /// Balanced amounts match held amount plus the ticker's single operation.
    #[test]
    fn amounts_follow_operations(s in scenario_strategy()) {
        let alloc = run(&s);
        for pos in alloc.balanced.positions() {
            let held: Quantity = s.portfolio.amount(&pos.ticker);
            let mut expected = held as i128;
            for op in alloc.operations.iter().filter(|op| op.ticker == pos.ticker) {
                match op.side {
                    Side::Buy => expected += op.quantity as i128,
                    Side::Sell => expected -= op.quantity as i128,
                }
            }
            prop_assert!(expected >= 0);
            prop_assert_eq!(pos.amount as i128, expected);
        }
    }

    /// Operations follow ranking order, then liquidations in portfolio order.
    #[test]
    fn operations_ordered_by_priority(s in scenario_strategy()) {
        let alloc = run(&s);
        let rank_of = |t: &Ticker| s.ranking.iter().position(|r| r == t);
        let held_of = |t: &Ticker| s.portfolio.positions().iter().position(|p| &p.ticker == t);

        let keys: Vec<(usize, usize)> = alloc
            .operations
            .iter()
            .map(|op| match rank_of(&op.ticker) {
                Some(i) => (0, i),
                None => (1, held_of(&op.ticker).unwrap()),
            })
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        prop_assert_eq!(keys, sorted);
    }

    #[test]
    fn deterministic(s in scenario_strategy()) {
        prop_assert_eq!(run(&s), run(&s));
    }

    /// Each ranked ticker is either processed once or carried unchanged.
    #[test]
    fn at_most_one_position_per_ticker(s in scenario_strategy()) {
        let alloc = run(&s);
        let tickers: Vec<&Ticker> = alloc.balanced.tickers().collect();
        let mut dedup = tickers.clone();
        dedup.sort();
        dedup.dedup();
        prop_assert_eq!(tickers.len(), dedup.len());
    }
}
