use super::{DispatchError, Scheduler};
use crate::core::{ProcIdx, SimCtx, TimelineEvent};

/// Non-preemptive first-come-first-served in input order.
///
/// Records are served strictly by position, not re-sorted by arrival time:
/// a later record with an earlier arrival still waits its turn.
#[derive(Debug, Default)]
pub struct FcfsScheduler {
    cursor: ProcIdx,
}

impl FcfsScheduler {
    pub fn new() -> Self {
        Self { cursor: 0 }
    }
}

impl Scheduler for FcfsScheduler {
    fn name(&self) -> String {
        "FCFS".to_owned()
    }

    fn dispatch(&mut self, ctx: &mut SimCtx) -> Result<TimelineEvent, DispatchError> {
        let idx = self.cursor;
        let process = ctx.process(idx);
        if process.record.arrival_time > ctx.now {
            return Err(DispatchError::IdleUntil(process.record.arrival_time));
        }

        let burst = process.remaining_time;
        self.cursor += 1;
        Ok(ctx.run_slice(idx, burst))
    }
}
