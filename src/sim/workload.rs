use rand::prelude::*;

use super::RawRecord;

/// Parameters for a synthetic workload: at each tick a process arrives with
/// probability `p_arrival`; it is short with probability `p_short`.
#[derive(Debug, Clone)]
pub struct BernoulliWorkload {
    pub ticks: u64,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_ticks: i64,
    pub long_ticks: i64,
    pub seed: u64,
}

impl Default for BernoulliWorkload {
    fn default() -> Self {
        Self {
            ticks: 50,
            p_arrival: 0.3,
            p_short: 0.3,
            short_ticks: 2,
            long_ticks: 6,
            seed: 0,
        }
    }
}

impl BernoulliWorkload {
    pub fn generate(&self) -> Vec<RawRecord> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut records = Vec::new();

        for t in 0..self.ticks {
            if rng.random::<f64>() < self.p_arrival {
                let burst = if rng.random::<f64>() < self.p_short {
                    self.short_ticks
                } else {
                    self.long_ticks
                };

                records.push(RawRecord {
                    pid: records.len() as i64 + 1,
                    arrival: t as i64,
                    burst,
                    priority: rng.random_range(0..=3),
                });
            }
        }

        records
    }
}
