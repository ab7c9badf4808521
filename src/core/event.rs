use serde::Serialize;

use crate::core::{Pid, Ticks};

/// One contiguous stretch of processor time given to a single process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEvent {
    pub pid: Pid,
    pub start: Ticks,
    pub duration: Ticks,
}

impl TimelineEvent {
    pub fn end(&self) -> Ticks {
        self.start + self.duration
    }
}
