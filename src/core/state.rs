use log::trace;

use super::event::TimelineEvent;

pub type Pid = i64;
pub type Ticks = u64;
// Index into the process table, i.e. input position
pub type ProcIdx = usize;

/// Validated input for one process. Never changes during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    // Carried through to the report, no policy reads it
    pub priority: i64,
}

/// Orders pending arrivals by (arrival time, input position).
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct Arrival(pub Ticks, pub ProcIdx);

// KeyedPriorityQueue is a max-heap, so the earliest arrival has to compare greatest
impl PartialOrd for Arrival {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Arrival {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (other.0, other.1).cmp(&(self.0, self.1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    NotArrived,
    Ready,
    Completed,
}

#[derive(Debug, Clone)]
pub struct Process {
    pub record: ProcessRecord,
    pub state: ProcessState,
    pub remaining_time: Ticks,
    pub start_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
    pub waiting_time: Option<Ticks>,
    pub turnaround_time: Option<Ticks>,
}

impl Process {
    pub fn new(record: ProcessRecord) -> Self {
        Self {
            remaining_time: record.burst_time,
            record,
            state: ProcessState::NotArrived,
            start_time: None,
            completion_time: None,
            waiting_time: None,
            turnaround_time: None,
        }
    }

    pub fn pid(&self) -> Pid {
        self.record.pid
    }

    pub fn is_eligible(&self) -> bool {
        self.state == ProcessState::Ready
    }
}

/// State of a single-processor simulation run.
///
/// Policies pick what runs next; `SimCtx` is the only place that moves the
/// clock, so the timing fields stay consistent whatever the policy does.
#[derive(Debug)]
pub struct SimCtx {
    pub now: Ticks,
    pub processes: Vec<Process>,
    pub timeline: Vec<TimelineEvent>,
    pub busy_time: Ticks,
    pub idle_time: Ticks,
    completed: usize,
}

impl SimCtx {
    pub fn new(records: impl IntoIterator<Item = ProcessRecord>) -> Self {
        let mut ctx = Self {
            now: 0,
            processes: records.into_iter().map(Process::new).collect(),
            timeline: Vec::new(),
            busy_time: 0,
            idle_time: 0,
            completed: 0,
        };
        ctx.admit_arrivals();
        ctx
    }

    pub fn process(&self, idx: ProcIdx) -> &Process {
        &self.processes[idx]
    }

    pub fn process_mut(&mut self, idx: ProcIdx) -> &mut Process {
        &mut self.processes[idx]
    }

    pub fn completed_count(&self) -> usize {
        self.completed
    }

    pub fn all_completed(&self) -> bool {
        self.completed == self.processes.len()
    }

    /// Earliest arrival among processes that still have work left.
    pub fn next_unfinished_arrival(&self) -> Option<Ticks> {
        self.processes
            .iter()
            .filter(|p| p.state != ProcessState::Completed)
            .map(|p| p.record.arrival_time)
            .min()
    }

    fn admit_arrivals(&mut self) {
        let now = self.now;
        for process in &mut self.processes {
            if process.state == ProcessState::NotArrived && process.record.arrival_time <= now {
                trace!("t={now} P{} arrived at {}", process.pid(), process.record.arrival_time);
                process.state = ProcessState::Ready;
            }
        }
    }

    /// Leave the processor idle until `until`.
    pub fn idle_until(&mut self, until: Ticks) {
        debug_assert!(
            until > self.now,
            "Idle period must move time forward (now={}, until={until})",
            self.now
        );
        let gap = until.saturating_sub(self.now);
        self.idle_time += gap;
        self.now += gap;
        self.admit_arrivals();
    }

    /// Run process `idx` for `ticks` starting now and record the slice.
    pub fn run_slice(&mut self, idx: ProcIdx, ticks: Ticks) -> TimelineEvent {
        let now = self.now;
        let process = self.process_mut(idx);
        debug_assert!(
            process.is_eligible(),
            "P{} dispatched while {:?}",
            process.pid(),
            process.state
        );
        debug_assert!(
            ticks > 0 && ticks <= process.remaining_time,
            "P{} slice of {ticks} with {} remaining",
            process.pid(),
            process.remaining_time
        );

        process.start_time.get_or_insert(now);
        process.remaining_time -= ticks;
        let event = TimelineEvent {
            pid: process.pid(),
            start: now,
            duration: ticks,
        };
        let finished = process.remaining_time == 0;

        self.now += ticks;
        self.busy_time += ticks;
        self.timeline.push(event.clone());
        if finished {
            self.mark_completed(idx);
        }
        self.admit_arrivals();
        event
    }

    fn mark_completed(&mut self, idx: ProcIdx) {
        let now = self.now;
        let process = &mut self.processes[idx];
        debug_assert_eq!(process.remaining_time, 0, "P{} completed early", process.pid());

        let turnaround = now - process.record.arrival_time;
        debug_assert!(
            turnaround >= process.record.burst_time,
            "P{} finished faster than its burst",
            process.pid()
        );
        process.state = ProcessState::Completed;
        process.completion_time = Some(now);
        process.turnaround_time = Some(turnaround);
        process.waiting_time = Some(turnaround - process.record.burst_time);
        self.completed += 1;
    }
}
