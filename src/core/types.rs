/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
pub type Pid = u32;

/// Register word (signed, wraps on overflow)
pub type Word = i32;

/// Instruction address within a program
pub type Address = usize;

/// Quantum length in ticks
pub type Quantum = u32;
