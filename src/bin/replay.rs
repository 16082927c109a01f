//! Event Replay Tool
//!
//! Run with: cargo run --bin replay --release -- events.json --top 10

use std::path::PathBuf;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use customer_ltv::{replay, Reducer};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "customer_ltv=warn".into()),
        )
        .init();

    let mut top = 10usize;
    let mut path: Option<PathBuf> = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--top" {
            top = args
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| anyhow::anyhow!("--top expects a number"))?;
        } else {
            path = Some(PathBuf::from(arg));
        }
    }
    let path = path.ok_or_else(|| anyhow::anyhow!("usage: replay <events-file> [--top K]"))?;

    let start = Instant::now();
    let mut reducer = Reducer::new();
    let report = replay::replay_file(&mut reducer, &path)?;
    let elapsed = start.elapsed();

    println!("=== Replay Results ===");
    println!("Events: {}", report.total());
    println!("Accepted: {}", report.accepted);
    println!("Decode errors: {}", report.decode_errors);
    println!("Data errors: {}", report.data_errors);
    for error in &report.errors {
        println!("  {}", error);
    }
    println!("Customers: {}", reducer.customer_count());
    println!("Orders: {}", reducer.order_count());
    if let Some(watermark) = reducer.watermark() {
        println!("As of: {}", watermark.to_rfc3339());
    }
    println!("Time: {:.3}s", elapsed.as_secs_f64());

    println!("\n=== Top {} Customers by LTV ===", top);
    println!("customer_id\tlast_name\tvisits\texpenditure\tltv");
    for summary in reducer.top_k(top) {
        println!(
            "{}\t{}\t{}\t{:.2}\t{:.2}",
            summary.customer_id,
            summary.last_name.as_deref().unwrap_or("-"),
            summary.visits,
            summary.expenditure,
            summary.ltv
        );
    }

    Ok(())
}
