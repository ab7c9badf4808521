use std::{collections::VecDeque, num::NonZeroU64};

use keyed_priority_queue::KeyedPriorityQueue;

use super::{DispatchError, Scheduler};
use crate::core::{Arrival, ProcIdx, SimCtx, Ticks, TimelineEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RrMode {
    /// FIFO ready queue. Processes that arrive during a slice are queued
    /// ahead of the process that slice preempted.
    Queue,
    /// Repeated scans of the process list in input order, checking
    /// eligibility at the moment each process is visited.
    CyclicScan,
}

/// Preemptive round robin with a fixed time quantum.
pub struct RoundRobinScheduler {
    quantum: Ticks,
    mode: RrMode,
    // Queue mode
    ready: VecDeque<ProcIdx>,
    pending: KeyedPriorityQueue<ProcIdx, Arrival>,
    preempted: Option<ProcIdx>,
    // Cyclic-scan mode
    cursor: ProcIdx,
    served_in_scan: bool,
}

impl RoundRobinScheduler {
    pub fn new(quantum: NonZeroU64) -> Self {
        Self::with_mode(quantum, RrMode::Queue)
    }

    pub fn cyclic_scan(quantum: NonZeroU64) -> Self {
        Self::with_mode(quantum, RrMode::CyclicScan)
    }

    pub fn with_mode(quantum: NonZeroU64, mode: RrMode) -> Self {
        Self {
            quantum: quantum.get(),
            mode,
            ready: VecDeque::new(),
            pending: KeyedPriorityQueue::new(),
            preempted: None,
            cursor: 0,
            served_in_scan: false,
        }
    }

    fn run_for_quantum(&self, ctx: &mut SimCtx, idx: ProcIdx) -> TimelineEvent {
        let exec_time = ctx.process(idx).remaining_time.min(self.quantum);
        ctx.run_slice(idx, exec_time)
    }

    // Move everything that has arrived by now from `pending` to the back of
    // the ready queue, earliest arrival first, ties in input order.
    fn admit_arrivals(&mut self, now: Ticks) {
        while let Some((_, &Arrival(arrival, _))) = self.pending.peek() {
            if arrival > now {
                break;
            }
            if let Some((idx, _)) = self.pending.pop() {
                self.ready.push_back(idx);
            }
        }
    }

    fn dispatch_queue(&mut self, ctx: &mut SimCtx) -> Result<TimelineEvent, DispatchError> {
        self.admit_arrivals(ctx.now);
        if let Some(idx) = self.preempted.take() {
            self.ready.push_back(idx);
        }

        let Some(idx) = self.ready.pop_front() else {
            return match self.pending.peek() {
                Some((_, &Arrival(arrival, _))) => Err(DispatchError::IdleUntil(arrival)),
                None => unreachable!("dispatch called with every process completed"),
            };
        };

        let event = self.run_for_quantum(ctx, idx);
        if ctx.process(idx).remaining_time > 0 {
            self.preempted = Some(idx);
        }
        Ok(event)
    }

    fn dispatch_scan(&mut self, ctx: &mut SimCtx) -> Result<TimelineEvent, DispatchError> {
        loop {
            if let Some(idx) = (self.cursor..ctx.processes.len()).find(|&i| ctx.process(i).is_eligible()) {
                self.cursor = idx + 1;
                self.served_in_scan = true;
                return Ok(self.run_for_quantum(ctx, idx));
            }

            // End of the list. Start another scan, unless this whole scan
            // found nothing to run, in which case wait for the next arrival.
            self.cursor = 0;
            if !std::mem::take(&mut self.served_in_scan) {
                let next = ctx
                    .next_unfinished_arrival()
                    .expect("dispatch called with every process completed");
                return Err(DispatchError::IdleUntil(next));
            }
        }
    }
}

impl Scheduler for RoundRobinScheduler {
    fn name(&self) -> String {
        match self.mode {
            RrMode::Queue => format!("Round Robin (quantum = {})", self.quantum),
            RrMode::CyclicScan => format!("Round Robin, cyclic scan (quantum = {})", self.quantum),
        }
    }

    fn start(&mut self, ctx: &SimCtx) {
        if self.mode == RrMode::Queue {
            for (idx, process) in ctx.processes.iter().enumerate() {
                self.pending
                    .push(idx, Arrival(process.record.arrival_time, idx));
            }
        }
    }

    fn dispatch(&mut self, ctx: &mut SimCtx) -> Result<TimelineEvent, DispatchError> {
        match self.mode {
            RrMode::Queue => self.dispatch_queue(ctx),
            RrMode::CyclicScan => self.dispatch_scan(ctx),
        }
    }
}
