/*!
 * Round-Robin Simulator Library
 * Cooperative multiprogramming: instruction decoding, execution and round-robin scheduling
 */

pub mod core;
pub mod execution;
pub mod isa;
pub mod loader;
pub mod monitoring;
pub mod process;
pub mod report;
pub mod scheduler;

// Re-exports
pub use crate::core::{DecodeError, LoadError, Pid, SchedulerError, SimulatorConfig, Word};
pub use execution::{execute, Effect, Flow, Step};
pub use isa::{decode, ArithOp, Instruction, Operand, Program, Register};
pub use loader::Workload;
pub use monitoring::init_tracing;
pub use process::{Process, ProcessState, Registers};
pub use scheduler::{
    schedule, ContextSnapshot, ProcessStats, ReadyQueue, RoundRobin, RunReport, SchedulerConfig, SchedulerStats,
    TerminationReason, TraceEvent,
};
