/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{Pid, Quantum};
use miette::Diagnostic;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Decoding result
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Scheduling result
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Loading result
pub type LoadResult<T> = Result<T, LoadError>;

/// Instruction decoding errors, one per violated grammar rule
#[derive(Error, Debug, Clone, Serialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum DecodeError {
    #[error("empty instruction")]
    #[diagnostic(code(decode::empty), help("Blank lines carry no instruction."))]
    Empty,

    #[error("NOP takes no operands")]
    #[diagnostic(code(decode::nop_operands), help("Write NOP on its own."))]
    NopOperands,

    #[error("INC requires a register")]
    #[diagnostic(code(decode::missing_register), help("Example: INC AX"))]
    MissingRegister,

    #[error("INC only accepts AX, BX or CX, got '{0}'")]
    #[diagnostic(code(decode::invalid_register))]
    InvalidRegister(String),

    #[error("JMP requires a target address")]
    #[diagnostic(code(decode::missing_target), help("Example: JMP 0"))]
    MissingJumpTarget,

    #[error("JMP target must be an integer, got '{0}'")]
    #[diagnostic(code(decode::invalid_target))]
    InvalidJumpTarget(String),

    #[error("JMP target cannot be negative ({0})")]
    #[diagnostic(
        code(decode::negative_target),
        help("Addresses are zero-based instruction indices.")
    )]
    NegativeJumpTarget(String),

    #[error("{0} requires two operands")]
    #[diagnostic(code(decode::missing_operands), help("Example: ADD AX, 3"))]
    MissingOperands(String),

    #[error("{0} requires a comma between operands")]
    #[diagnostic(code(decode::missing_comma), help("Example: SUB BX, CX"))]
    MissingComma(String),

    #[error("destination must be AX, BX or CX, got '{0}'")]
    #[diagnostic(code(decode::invalid_destination))]
    InvalidDestination(String),

    #[error("second operand must be a register or integer, got '{0}'")]
    #[diagnostic(code(decode::invalid_source))]
    InvalidSource(String),

    #[error("instruction not allowed: {0}")]
    #[diagnostic(
        code(decode::unknown_opcode),
        help("Valid opcodes: NOP, INC, JMP, ADD, SUB, MUL.")
    )]
    UnknownOpcode(String),
}

/// Structural errors that reject a `schedule` call before any process is touched
#[derive(Error, Debug, Clone, Serialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("{processes} processes but {programs} programs")]
    #[diagnostic(
        code(scheduler::length_mismatch),
        help("Programs are indexed in parallel with processes; supply one per process.")
    )]
    LengthMismatch { processes: usize, programs: usize },

    #[error("Process {0} appears more than once")]
    #[diagnostic(code(scheduler::duplicate_pid), help("PIDs must be unique within a run."))]
    DuplicatePid(Pid),

    #[error("Invalid PID {0}")]
    #[diagnostic(code(scheduler::invalid_pid), help("PIDs are positive integers."))]
    InvalidPid(Pid),

    #[error("Process {pid} has invalid quantum {quantum}")]
    #[diagnostic(code(scheduler::invalid_quantum), help("Quantum must be at least 1 tick."))]
    InvalidQuantum { pid: Pid, quantum: Quantum },
}

/// Workload loading errors
#[derive(Error, Debug, Diagnostic)]
pub enum LoadError {
    #[error("Cannot read {}: {source}", path.display())]
    #[diagnostic(code(load::io), help("Check that the file exists and is readable."))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Syntax error on line {line}: {text}")]
    #[diagnostic(
        code(load::syntax),
        help("Expected: PID: <num> [, AX=<int>][, BX=<int>][, CX=<int>] , Quantum=<num>")
    )]
    Syntax { line: usize, text: String },

    #[error("Line {line}: {reason}")]
    #[diagnostic(code(load::invalid_process))]
    InvalidProcess { line: usize, reason: String },

    #[error("No processes defined in {}", .0.display())]
    #[diagnostic(code(load::empty), help("Add at least one process line."))]
    Empty(PathBuf),

    #[error("Missing program for process {pid}: {}", path.display())]
    #[diagnostic(code(load::missing_program), help("Each process needs <dir>/<pid>.txt."))]
    MissingProgram { pid: Pid, path: PathBuf },

    #[error("{} (line {line}): {source} | text: {text}", path.display())]
    #[diagnostic(code(load::invalid_instruction))]
    InvalidInstruction {
        path: PathBuf,
        line: usize,
        text: String,
        #[source]
        source: DecodeError,
    },
}
