pub mod fcfs;
pub mod round_robin;

use std::{fmt, num::NonZeroU64, str::FromStr, sync::LazyLock};

use regex::Regex;

use crate::{
    core::{SimCtx, Ticks, TimelineEvent},
    error::{ParameterError, SimError},
    sim::{ProcessSet, SimReport, driver::simulate},
};
pub use fcfs::FcfsScheduler;
pub use round_robin::{RoundRobinScheduler, RrMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// Nothing can run yet; the processor idles until the given time.
    IdleUntil(Ticks),
}

pub trait Scheduler {
    fn name(&self) -> String;

    // Called once, before the first dispatch
    fn start(&mut self, _ctx: &SimCtx) {}

    /// Pick the next process, run it for one slice through
    /// `SimCtx::run_slice` and return the recorded slice.
    fn dispatch(&mut self, ctx: &mut SimCtx) -> Result<TimelineEvent, DispatchError>;
}

/// Which policy a caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerSpec {
    Fcfs,
    /// Round robin over an explicit ready queue.
    RoundRobin { quantum: NonZeroU64 },
    /// Round robin as repeated input-order scans of the process list.
    CyclicScan { quantum: NonZeroU64 },
}

static SCHEDSPEC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)(?:(f|fcfs)|(r|rr|c)(-?\d+))$").expect("schedspec pattern is valid")
});

impl SchedulerSpec {
    pub fn round_robin(quantum: i64) -> Result<Self, SimError> {
        Ok(Self::RoundRobin {
            quantum: positive_quantum(quantum)?,
        })
    }

    pub fn cyclic_scan(quantum: i64) -> Result<Self, SimError> {
        Ok(Self::CyclicScan {
            quantum: positive_quantum(quantum)?,
        })
    }

    /// Run this policy over its own copy of `set`.
    pub fn simulate(&self, set: ProcessSet) -> SimReport {
        match *self {
            Self::Fcfs => simulate(set, FcfsScheduler::new()),
            Self::RoundRobin { quantum } => simulate(set, RoundRobinScheduler::new(quantum)),
            Self::CyclicScan { quantum } => {
                simulate(set, RoundRobinScheduler::cyclic_scan(quantum))
            }
        }
    }
}

fn positive_quantum(quantum: i64) -> Result<NonZeroU64, ParameterError> {
    Ticks::try_from(quantum)
        .ok()
        .and_then(NonZeroU64::new)
        .ok_or(ParameterError::NonPositiveQuantum(quantum))
}

impl FromStr for SchedulerSpec {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || SimError::from(ParameterError::UnknownAlgorithm(s.to_owned()));
        let caps = SCHEDSPEC_RE.captures(s.trim()).ok_or_else(unknown)?;
        if caps.get(1).is_some() {
            return Ok(Self::Fcfs);
        }

        // The pattern only admits integers, so a parse failure means overflow
        let quantum: i64 = caps[3]
            .parse()
            .map_err(|_| ParameterError::QuantumOutOfRange(caps[3].to_owned()))?;
        match caps[2].to_ascii_lowercase().as_str() {
            "c" => Self::cyclic_scan(quantum),
            _ => Self::round_robin(quantum),
        }
    }
}

impl fmt::Display for SchedulerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fcfs => write!(f, "F"),
            Self::RoundRobin { quantum } => write!(f, "R{quantum}"),
            Self::CyclicScan { quantum } => write!(f, "C{quantum}"),
        }
    }
}
