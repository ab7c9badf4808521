use log::debug;

use super::{
    event::TimelineEvent,
    observer::Observer,
    state::{Pid, ProcessRecord, SimCtx, Ticks},
};
use crate::scheduler::{DispatchError, Scheduler};

pub struct SchedCore<S: Scheduler> {
    pub ctx: SimCtx,
    pub scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(records: impl IntoIterator<Item = ProcessRecord>, mut scheduler: S) -> Self {
        let ctx = SimCtx::new(records);
        scheduler.start(&ctx);
        Self {
            ctx,
            scheduler,
            observer: Observer::new(),
        }
    }

    /// Give the processor to whatever the policy picks next.
    ///
    /// Returns `None` when the processor sat idle for this step instead.
    pub fn step(&mut self) -> Option<TimelineEvent> {
        let event = match self.scheduler.dispatch(&mut self.ctx) {
            Ok(event) => {
                debug!(
                    "t={} P{} ran {} ticks ({} remaining)",
                    event.start,
                    event.pid,
                    event.duration,
                    self.remaining_of(event.pid)
                );
                Some(event)
            }
            Err(DispatchError::IdleUntil(until)) => {
                debug!("t={} cpu idle until {until}", self.ctx.now);
                self.ctx.idle_until(until);
                None
            }
        };
        self.observer.observe(&self.ctx);
        event
    }

    pub fn run_to_completion(&mut self) {
        while !self.ctx.all_completed() {
            self.step();
        }
    }

    fn remaining_of(&self, pid: Pid) -> Ticks {
        self.ctx
            .processes
            .iter()
            .find(|p| p.pid() == pid)
            .map_or(0, |p| p.remaining_time)
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::FcfsScheduler;

    #[test]
    fn idle_steps_yield_no_event() {
        let records = [(1, 2, 3), (2, 2, 1)].map(|(pid, arrival_time, burst_time)| ProcessRecord {
            pid,
            arrival_time,
            burst_time,
            priority: 0,
        });
        let mut core = SchedCore::new(records, FcfsScheduler::new());

        assert_eq!(core.step(), None);
        assert_eq!(core.now(), 2);
        assert_eq!(core.step().map(|e| (e.pid, e.start)), Some((1, 2)));
        assert_eq!(core.step().map(|e| (e.pid, e.start)), Some((2, 5)));
        assert!(core.ctx.all_completed());
        assert_eq!(core.observer().steps(), 3);
    }
}
