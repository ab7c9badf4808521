pub mod driver;
pub mod loader;
pub mod process_set;
pub mod report;
pub mod workload;

pub use driver::Sim;
pub use loader::parse_records;
pub use process_set::{ProcessSet, RawRecord};
pub use report::{AggregateMetrics, ProcessMetrics, SimReport};
pub use workload::BernoulliWorkload;
