/*!
 * Instruction Set Module
 * Instruction types, text decoding and program sources
 */

pub mod decoder;
pub mod traits;
pub mod types;

// Re-export public API
pub use decoder::decode;
pub use traits::Program;
pub use types::{ArithOp, Instruction, Operand, Register};
