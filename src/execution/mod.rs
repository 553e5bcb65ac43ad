/*!
 * Execution Module
 * Per-tick instruction semantics
 */

pub mod executor;

pub use executor::{execute, Effect, Flow, Step};
