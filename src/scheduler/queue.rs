/*!
 * Ready Queue
 * FIFO of processes awaiting their next turn
 */

use std::collections::VecDeque;
use std::fmt;

/// Strict FIFO queue. It does not deduplicate; the scheduler guarantees
/// a process is never queued twice at the same time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyQueue<T> {
    entries: VecDeque<T>,
}

impl<T> ReadyQueue<T> {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Enqueue at the back
    #[inline]
    pub fn push_back(&mut self, item: T) {
        self.entries.push_back(item);
    }

    /// Dequeue from the front
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        self.entries.pop_front()
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.entries.front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate front to back
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

impl<T> Default for ReadyQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Display> fmt::Display for ReadyQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return f.write_str("(empty)");
        }
        for (i, item) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "P{}", item)?;
        }
        Ok(())
    }
}
