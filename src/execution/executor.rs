/*!
 * Execution Unit
 * Applies one decoded instruction to one process
 */

use crate::core::types::{Address, Word};
use crate::isa::{Instruction, Operand, Register};
use crate::process::Process;
use serde::Serialize;
use tracing::warn;

/// Whether the scheduler may keep running the process after this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    Continue,
    /// Terminate immediately regardless of remaining quantum (reserved for HALT-like opcodes)
    Halt,
}

/// Observable effect of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    None,
    Register {
        reg: Register,
        before: Word,
        after: Word,
    },
    Jump {
        from: Address,
        to: Address,
    },
    JumpOutOfRange {
        target: Address,
        program_len: usize,
    },
}

/// Result of executing one instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    pub flow: Flow,
    pub effect: Effect,
}

impl Step {
    const fn advance(effect: Effect) -> Self {
        Self {
            flow: Flow::Continue,
            effect,
        }
    }
}

/// Execute `instruction` against `process`, whose program holds `program_len` instructions.
///
/// Every opcode except `JMP` advances `pc` past itself. `JMP` assigns `pc` directly;
/// a target outside the program sets `pc = program_len` so the scheduler terminates it.
pub fn execute(process: &mut Process, instruction: &Instruction, program_len: usize) -> Step {
    match *instruction {
        Instruction::Nop => {
            process.pc += 1;
            Step::advance(Effect::None)
        }
        Instruction::Inc { reg } => {
            let before = process.register(reg);
            let after = before.wrapping_add(1);
            *process.register_mut(reg) = after;
            process.pc += 1;
            Step::advance(Effect::Register { reg, before, after })
        }
        Instruction::Arith { op, dest, src } => {
            let rhs = resolve(process, src);
            let before = process.register(dest);
            let after = op.apply(before, rhs);
            *process.register_mut(dest) = after;
            process.pc += 1;
            Step::advance(Effect::Register {
                reg: dest,
                before,
                after,
            })
        }
        Instruction::Jmp { target } => {
            let from = process.pc;
            if target < program_len {
                process.pc = target;
                Step::advance(Effect::Jump { from, to: target })
            } else {
                warn!(
                    pid = process.pid,
                    pc = from,
                    target,
                    program_len,
                    "JMP target out of range, terminating process"
                );
                process.pc = program_len;
                Step::advance(Effect::JumpOutOfRange {
                    target,
                    program_len,
                })
            }
        }
    }
}

/// Resolve a register-or-immediate operand
#[inline]
fn resolve(process: &Process, operand: Operand) -> Word {
    match operand {
        Operand::Register(reg) => process.register(reg),
        Operand::Immediate(value) => value,
    }
}
