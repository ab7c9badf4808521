pub mod config;
pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;

pub use config::SimConfig;
pub use crate::core::{Pid, TimelineEvent};
pub use error::SimError;
pub use scheduler::{Scheduler, SchedulerSpec};
pub use sim::{ProcessSet, RawRecord, Sim, SimReport};
