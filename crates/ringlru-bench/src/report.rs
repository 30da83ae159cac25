//! Throughput and hit-ratio reporting

use std::fmt;
use std::time::Duration;

/// Aggregate hit/total counts at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sample {
    pub hits: u64,
    pub total: u64,
}

impl Sample {
    fn since(self, earlier: Sample) -> Sample {
        Sample {
            hits: self.hits.saturating_sub(earlier.hits),
            total: self.total.saturating_sub(earlier.total),
        }
    }

    /// Thousands of requests per second over `elapsed`
    pub fn rate_kreq(&self, elapsed: Duration) -> f64 {
        let secs = elapsed.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.total as f64 / 1000.0 / secs
        }
    }

    pub fn hit_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.hits as f64 / self.total as f64 * 100.0
        }
    }
}

/// One line of the periodic report
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    delta: Sample,
    elapsed: Duration,
}

impl Interval {
    pub fn between(prev: Sample, now: Sample, elapsed: Duration) -> Self {
        Self {
            delta: now.since(prev),
            elapsed,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rate = {:.2} kreq/s, hit ratio = {:.3}%",
            self.delta.rate_kreq(self.elapsed),
            self.delta.hit_percent()
        )
    }
}

/// Final tab-separated result of a bounded run
#[derive(Debug, Clone)]
pub struct Summary {
    pub threads: usize,
    pub capacity: usize,
    pub demand: usize,
    pub elapsed: Duration,
    pub sample: Sample,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "type\tthreads\tcache\tdemand\tduration\trate\tratio")?;
        writeln!(
            f,
            "lru\t{}\t{}\t{}\t{:.3}\t{:.2}\t{:.3}%",
            self.threads,
            self.capacity,
            self.demand,
            self.elapsed.as_secs_f64(),
            self.sample.rate_kreq(self.elapsed),
            self.sample.hit_percent()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_uses_deltas() {
        let prev = Sample {
            hits: 100,
            total: 1_000,
        };
        let now = Sample {
            hits: 400,
            total: 5_000,
        };

        let line = Interval::between(prev, now, Duration::from_secs(1)).to_string();
        assert_eq!(line, "rate = 4.00 kreq/s, hit ratio = 7.500%");
    }

    #[test]
    fn test_zero_totals_do_not_divide_by_zero() {
        let idle = Sample::default();

        assert_eq!(idle.hit_percent(), 0.0);
        assert_eq!(idle.rate_kreq(Duration::ZERO), 0.0);
        assert_eq!(
            Interval::between(idle, idle, Duration::from_secs(1)).to_string(),
            "rate = 0.00 kreq/s, hit ratio = 0.000%"
        );
    }

    #[test]
    fn test_summary_table() {
        let summary = Summary {
            threads: 8,
            capacity: 10,
            demand: 1000,
            elapsed: Duration::from_secs(2),
            sample: Sample {
                hits: 50,
                total: 5_000,
            },
        };

        assert_eq!(
            summary.to_string(),
            "type\tthreads\tcache\tdemand\tduration\trate\tratio\n\
             lru\t8\t10\t1000\t2.000\t2.50\t1.000%\n"
        );
    }
}
