/*!
 * Round-Robin Scheduler
 * Drives processes through fixed per-process quanta off a FIFO ready queue
 */

mod operations;
mod queue;
mod stats;
mod types;

pub use queue::ReadyQueue;
pub use stats::{ProcessStats, RunReport, SchedulerStats};
pub use types::{
    ContextSnapshot, SchedulerConfig, TerminationReason, TraceEvent, DEFAULT_TICK_LIMIT,
    DEFAULT_TRACE_LIMIT,
};

use crate::core::errors::SchedulerResult;
use crate::isa::Program;
use crate::process::Process;
use tracing::debug;

/// Round-robin scheduler
///
/// Holds only configuration; the ready queue and counters live for one `schedule` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobin {
    config: SchedulerConfig,
}

impl RoundRobin {
    /// Create scheduler with default configuration (trace recording on)
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    /// Create scheduler with custom configuration
    pub fn with_config(config: SchedulerConfig) -> Self {
        debug!(
            record_trace = config.record_trace,
            tick_limit = ?config.tick_limit,
            trace_limit = ?config.trace_limit,
            terminate_loops = config.terminate_loops,
            "Round-robin scheduler initialized"
        );
        Self { config }
    }

    pub fn config(&self) -> SchedulerConfig {
        self.config
    }
}

/// Run a simulation with the default scheduler
pub fn schedule<P: Program>(
    processes: &mut [Process],
    programs: &[P],
) -> SchedulerResult<RunReport> {
    RoundRobin::new().schedule(processes, programs)
}
