use average::{Estimate, Mean};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::core::{Pid, SimCtx, Ticks, TimelineEvent};

/// Final timing of one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessMetrics {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: i64,
    pub start_time: Ticks,
    pub completion_time: Ticks,
    pub waiting_time: Ticks,
    pub turnaround_time: Ticks,
    /// First dispatch minus arrival.
    pub response_time: Ticks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateMetrics {
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub average_response_time: f64,
    pub max_waiting_time: Ticks,
    pub busy_time: Ticks,
    pub idle_time: Ticks,
    pub makespan: Ticks,
    pub cpu_utilization: f64,
    /// Completed processes per tick of makespan.
    pub throughput: f64,
}

/// Everything a run produces: the slices in dispatch order, per-process
/// results in input order and the aggregates over them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimReport {
    pub scheduler: String,
    pub timeline: Vec<TimelineEvent>,
    pub processes: Vec<ProcessMetrics>,
    pub aggregate: AggregateMetrics,
}

impl SimReport {
    /// Build the report of a finished run.
    pub fn from_ctx(scheduler: String, ctx: &SimCtx) -> Self {
        debug_assert!(ctx.all_completed(), "Report requested before the run finished");

        let processes: Vec<ProcessMetrics> = ctx
            .processes
            .iter()
            .map(|p| {
                let start_time = p.start_time.expect("Completed process was never dispatched");
                ProcessMetrics {
                    pid: p.pid(),
                    arrival_time: p.record.arrival_time,
                    burst_time: p.record.burst_time,
                    priority: p.record.priority,
                    start_time,
                    completion_time: p.completion_time.expect("Process missing completion time"),
                    waiting_time: p.waiting_time.expect("Process missing waiting time"),
                    turnaround_time: p.turnaround_time.expect("Process missing turnaround time"),
                    response_time: start_time - p.record.arrival_time,
                }
            })
            .collect();

        let makespan = ctx.now;
        let aggregate = AggregateMetrics {
            average_waiting_time: avg(processes.iter().map(|p| p.waiting_time as f64)),
            average_turnaround_time: avg(processes.iter().map(|p| p.turnaround_time as f64)),
            average_response_time: avg(processes.iter().map(|p| p.response_time as f64)),
            max_waiting_time: processes.iter().map(|p| p.waiting_time).max().unwrap_or(0),
            busy_time: ctx.busy_time,
            idle_time: ctx.idle_time,
            makespan,
            cpu_utilization: ratio(ctx.busy_time as f64, makespan),
            throughput: ratio(processes.len() as f64, makespan),
        };

        Self {
            scheduler,
            timeline: ctx.timeline.clone(),
            processes,
            aggregate,
        }
    }

    pub fn process(&self, pid: Pid) -> Option<&ProcessMetrics> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    /// Pids ordered by completion time.
    pub fn completion_order(&self) -> Vec<Pid> {
        let mut done: Vec<_> = self
            .processes
            .iter()
            .map(|p| (p.completion_time, p.pid))
            .collect();
        done.sort_unstable();
        done.into_iter().map(|(_, pid)| pid).collect()
    }

    /// Total processor time each pid received across the timeline.
    pub fn executed_time(&self) -> FxHashMap<Pid, Ticks> {
        let mut executed = FxHashMap::default();
        for event in &self.timeline {
            *executed.entry(event.pid).or_insert(0) += event.duration;
        }
        executed
    }

    pub fn slices_of(&self, pid: Pid) -> impl Iterator<Item = &TimelineEvent> {
        self.timeline.iter().filter(move |e| e.pid == pid)
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}

fn ratio(numerator: f64, makespan: Ticks) -> f64 {
    if makespan == 0 {
        0.0
    } else {
        numerator / makespan as f64
    }
}
