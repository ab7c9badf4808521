use std::fmt;

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::{
    config::SimConfig,
    core::{Pid, ProcessRecord, Ticks},
    error::{InputError, SimError},
};

/// A process record exactly as supplied by a loader, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RawRecord {
    pub pid: i64,
    pub arrival: i64,
    pub burst: i64,
    pub priority: i64,
}

impl RawRecord {
    pub fn new(pid: i64, arrival: i64, burst: i64, priority: i64) -> Self {
        Self {
            pid,
            arrival,
            burst,
            priority,
        }
    }
}

impl From<(i64, i64, i64, i64)> for RawRecord {
    fn from((pid, arrival, burst, priority): (i64, i64, i64, i64)) -> Self {
        Self::new(pid, arrival, burst, priority)
    }
}

impl fmt::Display for RawRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pid={} arrival={} burst={} priority={}",
            self.pid, self.arrival, self.burst, self.priority
        )
    }
}

/// Validated simulation input, in input order.
///
/// Input order is the tie-break for every policy, so it is preserved as
/// given. A `ProcessSet` always holds at least one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSet {
    records: Vec<ProcessRecord>,
}

impl ProcessSet {
    pub fn new<R>(records: impl IntoIterator<Item = R>, config: &SimConfig) -> Result<Self, SimError>
    where
        R: Into<RawRecord>,
    {
        let mut seen = FxHashSet::default();
        let mut validated = Vec::new();
        let mut max_arrival: Ticks = 0;
        let mut total_burst: Ticks = 0;

        for raw in records.into_iter().map(Into::into) {
            if validated.len() == config.max_processes {
                return Err(InputError::TooManyProcesses {
                    record: raw,
                    max: config.max_processes,
                }
                .into());
            }
            let record = validate(raw, &mut seen)?;

            max_arrival = max_arrival.max(record.arrival_time);
            total_burst = match total_burst.checked_add(record.burst_time) {
                Some(total) if total.checked_add(max_arrival).is_some() => total,
                _ => return Err(InputError::HorizonOverflow { record: raw }.into()),
            };
            validated.push(record);
        }

        if validated.is_empty() {
            return Err(SimError::EmptyInput);
        }
        Ok(Self { records: validated })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcessRecord> {
        self.records.iter()
    }

    pub fn get(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.records.iter().find(|r| r.pid == pid)
    }

    pub fn total_burst(&self) -> Ticks {
        self.records.iter().map(|r| r.burst_time).sum()
    }

    pub fn into_records(self) -> Vec<ProcessRecord> {
        self.records
    }
}

fn validate(raw: RawRecord, seen: &mut FxHashSet<Pid>) -> Result<ProcessRecord, InputError> {
    let Ok(arrival_time) = Ticks::try_from(raw.arrival) else {
        return Err(InputError::NegativeArrival { record: raw });
    };
    let burst_time = match Ticks::try_from(raw.burst) {
        Ok(burst) if burst > 0 => burst,
        _ => return Err(InputError::NonPositiveBurst { record: raw }),
    };
    if !seen.insert(raw.pid) {
        return Err(InputError::DuplicatePid { record: raw });
    }

    Ok(ProcessRecord {
        pid: raw.pid,
        arrival_time,
        burst_time,
        priority: raw.priority,
    })
}
