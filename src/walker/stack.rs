//! This module contains the implementation of the walker's abstract stack.

use crate::constant::STACK_SENTINEL_VALUE;

/// A simulated EVM stack of 64-bit values.
///
/// # Indexing
///
/// Indexing into this stack is zero-based, where frame 0 is the top stack
/// frame.
///
/// # Totality
///
/// Unlike a real EVM stack, every operation on the abstract stack succeeds.
/// Reading or popping a frame that does not exist yields
/// [`STACK_SENTINEL_VALUE`], and swapping with a frame that does not exist
/// does nothing. The stack is unbounded, as the walker never executes the
/// bytecode and so has no depth limit to enforce.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AbstractStack {
    data: Vec<u64>,
}

impl AbstractStack {
    /// Creates a new stack without any items on it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes the provided value onto the top of the stack.
    pub fn push(&mut self, value: u64) {
        self.data.push(value);
    }

    /// Pops the top value from the stack, or the sentinel if it is empty.
    pub fn pop(&mut self) -> u64 {
        self.data.pop().unwrap_or(STACK_SENTINEL_VALUE)
    }

    /// Reads from the stack frame at the provided `depth`, or the sentinel if
    /// there is no such frame.
    #[must_use]
    pub fn read(&self, depth: usize) -> u64 {
        self.index_of(depth)
            .map_or(STACK_SENTINEL_VALUE, |index| self.data[index])
    }

    /// Implements `DUPN`, pushing a copy of the item at depth `n - 1` onto the
    /// top of the stack.
    ///
    /// If that item does not exist the sentinel is pushed instead.
    pub fn dup(&mut self, n: usize) {
        let value = self.read(n.saturating_sub(1));
        self.push(value);
    }

    /// Implements `SWAPN`, exchanging the top item with the item at depth
    /// `n`.
    ///
    /// If either item does not exist the stack is left unchanged.
    pub fn swap(&mut self, n: usize) {
        if let (Some(top), Some(other)) = (self.index_of(0), self.index_of(n)) {
            self.data.swap(top, other);
        }
    }

    /// Gets the current size of the stack.
    #[must_use]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Checks if the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Gets the index into the backing storage of the frame at `depth`.
    fn index_of(&self, depth: usize) -> Option<usize> {
        self.data.len().checked_sub(depth + 1)
    }
}
