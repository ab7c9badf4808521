use log::info;

use super::{ProcessSet, RawRecord, SimReport};
use crate::{
    config::SimConfig,
    core::SchedCore,
    error::SimError,
    scheduler::{Scheduler, SchedulerSpec},
};

/// Runs policies over one validated process set.
///
/// Every run gets its own clone of the set, so several policies can be
/// compared on the same input.
#[derive(Debug, Clone)]
pub struct Sim {
    set: ProcessSet,
}

impl Sim {
    pub fn new(set: ProcessSet) -> Self {
        Self { set }
    }

    pub fn from_records<R: Into<RawRecord>>(
        records: impl IntoIterator<Item = R>,
        config: &SimConfig,
    ) -> Result<Self, SimError> {
        ProcessSet::new(records, config).map(Self::new)
    }

    pub fn process_set(&self) -> &ProcessSet {
        &self.set
    }

    pub fn run(&self, spec: SchedulerSpec) -> SimReport {
        spec.simulate(self.set.clone())
    }

    pub fn run_with<S: Scheduler>(&self, scheduler: S) -> SimReport {
        simulate(self.set.clone(), scheduler)
    }

    pub fn run_all(&self, specs: &[SchedulerSpec]) -> Vec<SimReport> {
        specs.iter().map(|&spec| self.run(spec)).collect()
    }
}

/// Run `scheduler` over `set` until every process has completed.
pub fn simulate<S: Scheduler>(set: ProcessSet, scheduler: S) -> SimReport {
    let name = scheduler.name();
    let mut core = SchedCore::new(set.into_records(), scheduler);
    core.run_to_completion();

    let report = SimReport::from_ctx(name, &core.ctx);
    info!(
        "{}: {} processes done at t={} after {} steps (avg WT {:.2}, avg TAT {:.2})",
        report.scheduler,
        report.processes.len(),
        core.now(),
        core.observer().steps(),
        report.aggregate.average_waiting_time,
        report.aggregate.average_turnaround_time
    );
    report
}
