//! Human-readable run report: allocation amount, current and rebalanced
//! portfolios, and the operation list.
//!
//! Each table renders independently; a table that fails to render is replaced
//! by a one-line notice and the rest of the report still prints.

use std::fmt::{self, Write};

use colored::Colorize;
use equiweight::{Allocation, Operation, Portfolio, PriceMap, Side, format_cents};

/// Render the full report for one run.
pub fn render(original: &Portfolio, alloc: &Allocation, prices: &PriceMap, cash: i64) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\nAllocation: {}\n",
        format_cents(cash).green()
    ));

    for (title, portfolio) in [
        ("CURRENT PORTFOLIO", original),
        ("REBALANCED PORTFOLIO", &alloc.balanced),
    ] {
        out.push('\n');
        out.push_str(&or_fallback(render_portfolio(title, portfolio, prices), title));
    }

    out.push('\n');
    out.push_str(&or_fallback(render_operations(&alloc.operations), "OPERATIONS"));

    if !alloc.unreached.is_empty() {
        out.push_str(&format!(
            "\nBudget exhausted before: {}\n",
            join(alloc.unreached.iter().map(|t| t.as_str()))
        ));
    }
    if !alloc.skipped.is_empty() {
        out.push_str(&format!(
            "\nSkipped (no price): {}\n",
            join(alloc.skipped.iter().map(|t| t.as_str()))
        ));
    }
    out
}

fn or_fallback(rendered: Result<String, fmt::Error>, title: &str) -> String {
    rendered.unwrap_or_else(|_| format!("Could not render the {} table\n", title.to_lowercase()))
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

/// One row of a portfolio table.
struct Row<'a> {
    ticker: &'a str,
    amount: u64,
    price: Option<i64>,
    total: Option<i64>,
}

/// Holdings table sorted by market value, largest first.
pub fn render_portfolio(
    title: &str,
    portfolio: &Portfolio,
    prices: &PriceMap,
) -> Result<String, fmt::Error> {
    let mut rows: Vec<Row<'_>> = portfolio
        .positions()
        .iter()
        .map(|p| {
            let price = prices.usable(&p.ticker);
            Row {
                ticker: p.ticker.as_str(),
                amount: p.amount,
                price: price.map(|px| px.0),
                total: price.and_then(|px| px.value_of(p.amount)),
            }
        })
        .collect();
    // Stable: equal totals keep portfolio order
    rows.sort_by(|a, b| b.total.unwrap_or(i64::MIN).cmp(&a.total.unwrap_or(i64::MIN)));

    let mut out = String::new();
    writeln!(out, "{title}:")?;
    if rows.is_empty() {
        writeln!(out, "  No positions.")?;
        return Ok(out);
    }

    writeln!(
        out,
        "  {:10} {:>10} {:>12} {:>14}",
        "Ticker", "Quantity", "Price", "Total"
    )?;
    for row in &rows {
        writeln!(
            out,
            "  {:10} {:>10} {:>12} {:>14}",
            row.ticker,
            row.amount,
            money_or_na(row.price),
            money_or_na(row.total),
        )?;
    }
    let grand_total = rows
        .iter()
        .filter_map(|r| r.total)
        .try_fold(0i64, |acc, v| acc.checked_add(v));
    writeln!(out, "  {:10} {:>10} {:>12} {:>14}", "Total", "", "", money_or_na(grand_total))?;
    Ok(out)
}

fn money_or_na(cents: Option<i64>) -> String {
    cents.map_or_else(|| "n/a".to_string(), format_cents)
}

/// Operation table in execution order.
pub fn render_operations(operations: &[Operation]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "OPERATIONS:")?;
    if operations.is_empty() {
        writeln!(out, "  No operations.")?;
        return Ok(out);
    }

    writeln!(out, "  {:>3}  {:10} {:10} {:>10}", "#", "Operation", "Ticker", "Quantity")?;
    for (i, op) in operations.iter().enumerate() {
        // Pad before coloring so escape codes do not skew the columns
        let label = format!("{:10}", op.side);
        let label = match op.side {
            Side::Buy => label.green(),
            Side::Sell => label.red(),
        };
        writeln!(
            out,
            "  {:>3}  {} {:10} {:>10}",
            i + 1,
            label,
            op.ticker,
            op.quantity
        )?;
    }
    Ok(out)
}
