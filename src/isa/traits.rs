/*!
 * Program Traits
 * Instruction sources addressed by program counter
 */

use super::decoder::decode;
use super::types::Instruction;
use crate::core::errors::DecodeResult;
use crate::core::types::Address;

/// An ordered instruction list that the scheduler fetches from one tick at a time.
///
/// Text programs decode on fetch, so a malformed line only surfaces when it is reached.
pub trait Program {
    /// Number of instructions
    fn len(&self) -> usize;

    /// Fetch and decode the instruction at `pc` (`pc < len()`)
    fn fetch(&self, pc: Address) -> DecodeResult<Instruction>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Program for [Instruction] {
    #[inline]
    fn len(&self) -> usize {
        <[Instruction]>::len(self)
    }

    #[inline]
    fn fetch(&self, pc: Address) -> DecodeResult<Instruction> {
        Ok(self[pc])
    }
}

impl Program for [String] {
    #[inline]
    fn len(&self) -> usize {
        <[String]>::len(self)
    }

    fn fetch(&self, pc: Address) -> DecodeResult<Instruction> {
        decode(&self[pc])
    }
}

impl Program for [&str] {
    #[inline]
    fn len(&self) -> usize {
        <[&str]>::len(self)
    }

    fn fetch(&self, pc: Address) -> DecodeResult<Instruction> {
        decode(self[pc])
    }
}

impl<T> Program for Vec<T>
where
    [T]: Program,
{
    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    fn fetch(&self, pc: Address) -> DecodeResult<Instruction> {
        self.as_slice().fetch(pc)
    }
}
