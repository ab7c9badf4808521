use super::state::{ProcessState, SimCtx};

/// Checks the run invariants after every dispatch. Compiled out in release.
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SimCtx) {
        self.step += 1;

        debug_assert_eq!(
            ctx.busy_time + ctx.idle_time,
            ctx.now,
            "Busy and idle time must account for the whole clock"
        );

        // Earlier pairs were checked on earlier steps
        if let [.., prev, last] = ctx.timeline.as_slice() {
            debug_assert!(
                prev.end() <= last.start,
                "Slice for P{} overlaps slice for P{}",
                prev.pid,
                last.pid
            );
        }

        let mut completed = 0;
        for process in &ctx.processes {
            let pid = process.pid();
            let burst = process.record.burst_time;
            debug_assert!(
                process.remaining_time <= burst,
                "P{pid} has more work left than its burst"
            );

            match process.state {
                ProcessState::Completed => {
                    completed += 1;
                    debug_assert_eq!(process.remaining_time, 0, "Completed P{pid} still has work");
                    debug_assert_eq!(
                        process.turnaround_time,
                        process.waiting_time.map(|wt| wt + burst),
                        "P{pid} turnaround must equal waiting plus burst"
                    );
                }
                ProcessState::NotArrived => {
                    debug_assert!(
                        process.record.arrival_time > ctx.now,
                        "P{pid} arrived but was never admitted"
                    );
                    debug_assert!(process.start_time.is_none(), "P{pid} ran before arriving");
                }
                ProcessState::Ready => {
                    debug_assert!(process.remaining_time > 0, "Ready P{pid} has no work left");
                }
            }
        }
        debug_assert_eq!(
            completed,
            ctx.completed_count(),
            "Completion counter out of sync with process states"
        );
    }
}
