/*!
 * Scheduler Types
 * Configuration, termination reasons and trace events
 */

use crate::core::types::{Address, Pid, Quantum};
use crate::execution::Effect;
use crate::isa::Instruction;
use crate::process::{Process, Registers};
use serde::Serialize;
use std::fmt;

/// Default tick budget for one run
pub const DEFAULT_TICK_LIMIT: u64 = 1_000_000;

/// Default cap on recorded trace events
pub const DEFAULT_TRACE_LIMIT: usize = 10_000;

/// Scheduler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Keep every scheduling event in the run report
    pub record_trace: bool,
    /// Stop dispatching once this many ticks have run. Checked between slices, so a
    /// slice that starts under the limit always runs to its normal end.
    /// `None` removes the limit; in-range `JMP` loops then never finish.
    pub tick_limit: Option<u64>,
    /// Stop recording after this many trace events. `None` keeps everything.
    pub trace_limit: Option<usize>,
    /// Terminate a process once it is known to loop forever, instead of only reporting it
    pub terminate_loops: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            record_trace: true,
            tick_limit: Some(DEFAULT_TICK_LIMIT),
            trace_limit: Some(DEFAULT_TRACE_LIMIT),
            terminate_loops: false,
        }
    }
}

impl SchedulerConfig {
    /// Statistics only, no per-tick trace
    pub const fn quiet() -> Self {
        Self {
            record_trace: false,
            tick_limit: Some(DEFAULT_TICK_LIMIT),
            trace_limit: Some(DEFAULT_TRACE_LIMIT),
            terminate_loops: false,
        }
    }

    pub const fn with_tick_limit(mut self, limit: Option<u64>) -> Self {
        self.tick_limit = limit;
        self
    }

    pub const fn with_trace_limit(mut self, limit: Option<usize>) -> Self {
        self.trace_limit = limit;
        self
    }

    pub const fn with_terminate_loops(mut self, enabled: bool) -> Self {
        self.terminate_loops = enabled;
        self
    }
}

/// Why a process reached `Terminated`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// The program counter ran past the last instruction
    Completed,
    /// No instructions were ever pending
    EmptyProgram,
    /// A JMP pointed outside the program
    JumpOutOfRange,
    /// An instruction failed to decode
    DecodeFault,
    /// The execution unit asked to stop
    Halted,
    /// The program counter revisited an address, so the process could never finish
    Looping,
}

impl TerminationReason {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::EmptyProgram => "empty_program",
            Self::JumpOutOfRange => "jump_out_of_range",
            Self::DecodeFault => "decode_fault",
            Self::Halted => "halted",
            Self::Looping => "looping",
        }
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Program counter and registers of one process at a context switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContextSnapshot {
    pub pid: Pid,
    pub pc: Address,
    pub registers: Registers,
}

impl From<&Process> for ContextSnapshot {
    fn from(process: &Process) -> Self {
        Self {
            pid: process.pid,
            pc: process.pc,
            registers: process.registers,
        }
    }
}

impl fmt::Display for ContextSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P{} (PC={}, AX={}, BX={}, CX={})",
            self.pid, self.pc, self.registers.ax, self.registers.bx, self.registers.cx
        )
    }
}

/// One scheduling event, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    Enqueued {
        pid: Pid,
    },
    /// `saved` is the outgoing process as it left the CPU, `loaded` the incoming one
    ContextSwitch {
        saved: ContextSnapshot,
        loaded: ContextSnapshot,
    },
    Dispatched {
        pid: Pid,
        pc: Address,
        quantum: Quantum,
    },
    Executed {
        pid: Pid,
        address: Address,
        instruction: Instruction,
        effect: Effect,
        remaining: Quantum,
    },
    Faulted {
        pid: Pid,
        address: Address,
        error: String,
    },
    /// `queue` lists the ready queue front to back after the requeue
    Preempted {
        pid: Pid,
        pc: Address,
        queue: Vec<Pid>,
    },
    LoopDetected {
        pid: Pid,
        pc: Address,
        ticks: u64,
    },
    Terminated {
        pid: Pid,
        pc: Address,
        reason: TerminationReason,
    },
    TickLimitReached {
        ticks: u64,
        unfinished: usize,
    },
    /// Last recorded event; nothing after the cap is kept
    TraceTruncated {
        limit: usize,
    },
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enqueued { pid } => write!(f, "P{} enqueued", pid),
            Self::ContextSwitch { saved, loaded } => {
                write!(f, "context switch: saved {} | loaded {}", saved, loaded)
            }
            Self::Dispatched { pid, pc, quantum } => {
                write!(f, "P{} running (PC={}, Q={})", pid, pc, quantum)
            }
            Self::Executed {
                address,
                instruction,
                effect,
                remaining,
                ..
            } => {
                write!(f, "  [{}] {:<12}", address, instruction.to_string())?;
                match effect {
                    Effect::None => f.write_str(" | no effect")?,
                    Effect::Register { reg, before, after } => {
                        write!(f, " | {}: {} -> {}", reg, before, after)?
                    }
                    Effect::Jump { from, to } => write!(f, " | PC: {} -> {}", from, to)?,
                    Effect::JumpOutOfRange { target, .. } => {
                        write!(f, " | JMP {} out of range", target)?
                    }
                }
                write!(f, " | quantum left: {}", remaining)
            }
            Self::Faulted {
                pid,
                address,
                error,
            } => write!(f, "P{} fault at [{}]: {}", pid, address, error),
            Self::Preempted { pid, pc, queue } => {
                write!(f, "P{} quantum exhausted at PC={}, back to queue | queue: ", pid, pc)?;
                for (i, queued) in queue.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" -> ")?;
                    }
                    write!(f, "P{}", queued)?;
                }
                Ok(())
            }
            Self::LoopDetected { pid, pc, ticks } => write!(
                f,
                "P{} is looping: {} ticks without finishing (PC={})",
                pid, ticks, pc
            ),
            Self::Terminated { pid, pc, reason } => {
                write!(f, "P{} terminated at PC={} ({})", pid, pc, reason)
            }
            Self::TickLimitReached { ticks, unfinished } => write!(
                f,
                "tick limit reached after {} ticks, {} processes left ready",
                ticks, unfinished
            ),
            Self::TraceTruncated { limit } => {
                write!(f, "trace truncated after {} events", limit)
            }
        }
    }
}
