/*!
 * Process Types
 * Register file, lifecycle state and the process record
 */

use crate::core::types::{Address, Pid, Quantum, Word};
use crate::isa::Register;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Process is waiting in the ready queue
    Ready,
    /// Process is executing its slice (never observed after `schedule` returns)
    Running,
    /// Process has finished its program
    Terminated,
}

impl ProcessState {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Running => "running",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Private register file of a process
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registers {
    pub ax: Word,
    pub bx: Word,
    pub cx: Word,
}

impl Registers {
    pub const fn new(ax: Word, bx: Word, cx: Word) -> Self {
        Self { ax, bx, cx }
    }

    #[inline]
    pub const fn get(&self, reg: Register) -> Word {
        match reg {
            Register::AX => self.ax,
            Register::BX => self.bx,
            Register::CX => self.cx,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, reg: Register) -> &mut Word {
        match reg {
            Register::AX => &mut self.ax,
            Register::BX => &mut self.bx,
            Register::CX => &mut self.cx,
        }
    }
}

/// Simulated process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub pid: Pid,
    pub pc: Address,
    pub registers: Registers,
    pub quantum: Quantum,
    pub state: ProcessState,
}

impl Process {
    /// Initialize a process: `pc = 0`, state `Ready`
    pub fn new(pid: Pid, ax: Word, bx: Word, cx: Word, quantum: Quantum) -> Self {
        Self::with_registers(pid, Registers::new(ax, bx, cx), quantum)
    }

    pub fn with_registers(pid: Pid, registers: Registers, quantum: Quantum) -> Self {
        Self {
            pid,
            pc: 0,
            registers,
            quantum,
            state: ProcessState::Ready,
        }
    }

    /// Overwrite the state. Transition legality is the scheduler's concern.
    #[inline]
    pub fn set_state(&mut self, state: ProcessState) {
        self.state = state;
    }

    /// Read a register by name
    #[inline]
    pub const fn register(&self, reg: Register) -> Word {
        self.registers.get(reg)
    }

    #[inline]
    pub fn register_mut(&mut self, reg: Register) -> &mut Word {
        self.registers.get_mut(reg)
    }

    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.state == ProcessState::Terminated
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PID {} | PC={} | AX={} | BX={} | CX={} | Q={} | State={}",
            self.pid,
            self.pc,
            self.registers.ax,
            self.registers.bx,
            self.registers.cx,
            self.quantum,
            self.state
        )
    }
}
