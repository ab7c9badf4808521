pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::SchedCore;
pub use event::TimelineEvent;
pub use observer::Observer;
pub use state::{Arrival, Pid, ProcIdx, Process, ProcessRecord, ProcessState, SimCtx, Ticks};
