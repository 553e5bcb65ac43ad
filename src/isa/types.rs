/*!
 * Instruction Set Types
 * Decoded form of the simulator's instruction set
 */

use crate::core::types::{Address, Word};
use serde::{Deserialize, Serialize};
use std::fmt;

/// General purpose register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Register {
    AX,
    BX,
    CX,
}

impl Register {
    /// Parse an upper-case register name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "AX" => Some(Self::AX),
            "BX" => Some(Self::BX),
            "CX" => Some(Self::CX),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AX => "AX",
            Self::BX => "BX",
            Self::CX => "CX",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arithmetic operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
}

impl ArithOp {
    pub fn from_mnemonic(op: &str) -> Option<Self> {
        match op {
            "ADD" => Some(Self::Add),
            "SUB" => Some(Self::Sub),
            "MUL" => Some(Self::Mul),
            _ => None,
        }
    }

    #[inline]
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
        }
    }

    /// Apply with the host's wrapping integer semantics
    #[inline]
    pub fn apply(&self, lhs: Word, rhs: Word) -> Word {
        match self {
            Self::Add => lhs.wrapping_add(rhs),
            Self::Sub => lhs.wrapping_sub(rhs),
            Self::Mul => lhs.wrapping_mul(rhs),
        }
    }
}

/// Source operand of an arithmetic instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Operand {
    Register(Register),
    Immediate(Word),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register(reg) => write!(f, "{}", reg),
            Self::Immediate(value) => write!(f, "{}", value),
        }
    }
}

/// Decoded instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "opcode", rename_all = "snake_case")]
pub enum Instruction {
    Nop,
    Inc {
        reg: Register,
    },
    Jmp {
        target: Address,
    },
    Arith {
        op: ArithOp,
        dest: Register,
        src: Operand,
    },
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nop => f.write_str("NOP"),
            Self::Inc { reg } => write!(f, "INC {}", reg),
            Self::Jmp { target } => write!(f, "JMP {}", target),
            Self::Arith { op, dest, src } => write!(f, "{} {}, {}", op.mnemonic(), dest, src),
        }
    }
}
