//! Retry-with-growth for OS queries whose result size is only known after the call
//!
//! Process enumeration and module name queries both fill a caller-provided
//! buffer and cannot tell an exact fit from a truncated result. The routine
//! here is the single place that handles that contract: the buffer doubles on
//! every "too small" outcome until the answer fits or the attempt budget runs
//! out.

use crate::core::types::{MemoryError, MemoryResult};
use tracing::{debug, trace};

/// Default number of calls before giving up
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Growth policy for a sized query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowingBuffer {
    initial_capacity: usize,
    max_attempts: usize,
}

impl GrowingBuffer {
    /// Create a policy starting at `initial_capacity` elements
    pub fn new(initial_capacity: usize) -> Self {
        GrowingBuffer {
            initial_capacity: initial_capacity.max(1),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Override the attempt budget
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Largest capacity the policy will ever try
    pub fn max_capacity(&self) -> usize {
        let doublings = self.max_attempts.saturating_sub(1).min(usize::BITS as usize - 1);
        self.initial_capacity.saturating_mul(1usize << doublings)
    }

    /// Run `query` until its answer fits in the buffer
    ///
    /// `query` fills the buffer and returns the number of elements written.
    /// A count equal to the capacity is treated as possibly truncated, as is
    /// [`MemoryError::BufferTooSmall`]; both retry with twice the capacity.
    /// Any other error is returned as is without retrying.
    pub fn query<T, F>(&self, what: &str, mut query: F) -> MemoryResult<Vec<T>>
    where
        T: Copy + Default,
        F: FnMut(&mut [T]) -> MemoryResult<usize>,
    {
        let mut capacity = self.initial_capacity;

        for attempt in 1..=self.max_attempts {
            let mut buffer = vec![T::default(); capacity];

            match query(&mut buffer) {
                Ok(written) if written < capacity => {
                    buffer.truncate(written);
                    return Ok(buffer);
                }
                Ok(written) => {
                    // an exact fit looks the same as a truncated result
                    trace!(what, attempt, capacity, written, "result may be truncated");
                }
                Err(e) if e.is_insufficient_buffer() => {
                    trace!(what, attempt, capacity, "buffer too small");
                }
                Err(e) => return Err(e),
            }

            capacity = capacity.saturating_mul(2);
        }

        debug!(what, attempts = self.max_attempts, "giving up on growing buffer");
        Err(MemoryError::GaveUp {
            what: what.to_string(),
            attempts: self.max_attempts,
        })
    }
}
