/*!
 * Process Module
 * Process records and their state transitions
 */

pub mod types;

// Re-export for convenience
pub use types::{Process, ProcessState, Registers};
