//! Multi-threaded get-or-put driver

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use ringlru::StringCache;
use tracing::{debug, info};

use crate::report::{Interval, Sample};
use crate::workload::{KeyPicker, Workload};

/// Driver settings derived from the command line
#[derive(Debug, Clone)]
pub struct Config {
    pub threads: usize,
    pub batch: usize,
    /// `None` runs until the process is killed
    pub duration: Option<Duration>,
    pub seed: Option<u64>,
}

/// Totals published by workers after each batch
#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    total: AtomicU64,
}

impl Counters {
    // Total is bumped before hits and read after it, so a sample never
    // reports more hits than requests.
    fn publish(&self, hits: u64, total: u64) {
        self.total.fetch_add(total, Ordering::Relaxed);
        self.hits.fetch_add(hits, Ordering::Release);
    }

    fn sample(&self) -> Sample {
        let hits = self.hits.load(Ordering::Acquire);
        let total = self.total.load(Ordering::Relaxed);
        Sample { hits, total }
    }
}

/// Counts sampled at the end of a bounded run
#[derive(Debug, Clone, Copy)]
pub struct Outcome {
    pub elapsed: Duration,
    pub sample: Sample,
}

/// Run the workers against `cache`.
///
/// With a duration, returns once it has elapsed and all workers have
/// stopped. Without one, prints a rate line every second and never returns.
pub fn run(cache: &StringCache, workload: &Workload, config: &Config) -> Outcome {
    let stop = AtomicBool::new(false);
    let counters = Counters::default();
    let started = Instant::now();

    let outcome = thread::scope(|s| {
        for worker_id in 0..config.threads {
            let picker = workload.picker(config.seed.map(|seed| seed.wrapping_add(worker_id as u64)));
            let (stop, counters) = (&stop, &counters);
            s.spawn(move || worker(cache, picker, config.batch, stop, counters));
        }
        info!(threads = config.threads, "workers started");

        match config.duration {
            Some(duration) => thread::sleep(duration),
            None => report_every_second(&counters),
        }

        let outcome = Outcome {
            elapsed: started.elapsed(),
            sample: counters.sample(),
        };
        stop.store(true, Ordering::Relaxed);
        outcome
    });

    info!(
        total = outcome.sample.total,
        hits = outcome.sample.hits,
        "workers stopped"
    );
    outcome
}

fn worker(
    cache: &StringCache,
    mut picker: KeyPicker<'_>,
    batch: usize,
    stop: &AtomicBool,
    counters: &Counters,
) {
    while !stop.load(Ordering::Relaxed) {
        let mut hits = 0;
        let mut total = 0;

        for j in 0..batch {
            let key = picker.next_key();
            if cache.get(key).is_some() {
                hits += 1;
            } else {
                cache.put(key, j.to_string());
            }
            total += 1;
        }

        counters.publish(hits, total);
    }
    debug!("worker exiting");
}

fn report_every_second(counters: &Counters) {
    let mut prev = counters.sample();
    let mut prev_at = Instant::now();

    loop {
        thread::sleep(Duration::from_secs(1));

        let now = counters.sample();
        let now_at = Instant::now();
        println!("{}", Interval::between(prev, now, now_at - prev_at));

        prev = now;
        prev_at = now_at;
    }
}
