//! ringlru-bench - hit ratio and throughput of the shared LRU cache

mod driver;
mod report;
mod workload;

use std::time::Duration;

use anyhow::{ensure, Result};
use clap::Parser;
use tracing::info;

use crate::driver::Config;
use crate::report::Summary;
use crate::workload::Workload;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Worker threads
    #[arg(short, long, default_value_t = 8)]
    threads: usize,

    /// Cache capacity (number of entries)
    #[arg(short, long, default_value_t = 10)]
    capacity: usize,

    /// Number of distinct candidate keys
    #[arg(long, default_value_t = 1000)]
    demand: usize,

    /// Run time in seconds; 0 prints a rate line every second until killed
    #[arg(short, long, default_value_t = 0)]
    duration: u64,

    /// Operations per worker between tally publications
    #[arg(short, long, default_value_t = 1000)]
    batch: usize,

    /// Length of the `x` prefix on every key
    #[arg(long, default_value_t = 100)]
    key_padding: usize,

    /// Seed for per-worker key selection (OS entropy when absent)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the cache contents after a bounded run
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    ensure!(args.threads > 0, "at least one worker thread is required");
    ensure!(args.batch > 0, "batch size must be positive");

    info!("Starting ringlru-bench v{}", env!("CARGO_PKG_VERSION"));
    info!(
        threads = args.threads,
        capacity = args.capacity,
        demand = args.demand,
        duration = args.duration,
        "configuration"
    );

    let cache = ringlru::instance(args.capacity)?;
    let workload = Workload::new(args.demand, args.key_padding)?;
    let config = Config {
        threads: args.threads,
        batch: args.batch,
        duration: (args.duration > 0).then(|| Duration::from_secs(args.duration)),
        seed: args.seed,
    };

    let outcome = driver::run(cache, &workload, &config);

    print!(
        "{}",
        Summary {
            threads: args.threads,
            capacity: cache.capacity(),
            demand: workload.len(),
            elapsed: outcome.elapsed,
            sample: outcome.sample,
        }
    );

    if args.dump {
        print!("{}", cache.dump());
    }

    let stats = cache.stats().snapshot();
    info!(
        evictions = stats.evictions,
        hit_ratio = stats.hit_ratio(),
        "cache statistics"
    );

    Ok(())
}
