use criterion::{criterion_group, criterion_main, Criterion};

use vesta::exchange::Exchange;
use vesta::orderbook::{AggregationMode, OrderAction, Stock};

fn build_exchange(mode: AggregationMode) -> Exchange {
    let mut exchange = Exchange::new("bench");
    exchange.add_stock(Stock::with_aggregation("ABC", mode));

    for i in 0..1000u64 {
        let price = 100.0 + (i % 10) as f64;
        exchange
            .order("ABC", OrderAction::Sell, 10, Some(price + 10.0))
            .unwrap();
        exchange
            .order("ABC", OrderAction::Buy, 10, Some(price))
            .unwrap();
    }
    exchange
}

fn benchmarks(c: &mut Criterion) {
    let prefix = build_exchange(AggregationMode::Prefix);
    c.bench_function("l1 prefix", |b| b.iter(|| prefix.get_l1_data("ABC")));

    let best = build_exchange(AggregationMode::BestPrice);
    c.bench_function("l1 best price", |b| b.iter(|| best.get_l1_data("ABC")));

    c.bench_function("order submission", |b| {
        b.iter(|| build_exchange(AggregationMode::Prefix))
    });
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
