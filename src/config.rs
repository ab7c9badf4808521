pub const DEFAULT_MAX_PROCESSES: usize = 100;

/// Knobs that bound a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Upper bound on the number of records a `ProcessSet` accepts.
    pub max_processes: usize,
}

impl SimConfig {
    pub fn with_max_processes(max_processes: usize) -> Self {
        Self { max_processes }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_processes: DEFAULT_MAX_PROCESSES,
        }
    }
}
