//! The memory tape: byte cells allocated lazily behind a single bounds check.
//!
//! Storage starts out unallocated. The first access below the small threshold
//! allocates a block of `small` cells; the first access at or above it grows
//! storage, once, to the full `max` capacity. Contents survive the growth.

use crate::error::{ConfigError, TapeError};

/// Cells allocated on first touch below the threshold.
pub const DEFAULT_SMALL_CELLS: usize = 100;
/// Hard upper bound of the tape.
pub const DEFAULT_MAX_CELLS: usize = 30_000;

/// Capacities governing tape growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapeLimits {
    small: usize,
    max: usize,
}

impl TapeLimits {
    /// Validate a pair of capacities. `max` must be non-zero and `small` must not exceed it.
    pub fn new(small: usize, max: usize) -> Result<Self, ConfigError> {
        if max == 0 || small > max {
            return Err(ConfigError::InvalidLimits { small, max });
        }
        Ok(Self { small, max })
    }

    pub fn small(&self) -> usize {
        self.small
    }

    pub fn max(&self) -> usize {
        self.max
    }
}

impl Default for TapeLimits {
    fn default() -> Self {
        Self {
            small: DEFAULT_SMALL_CELLS,
            max: DEFAULT_MAX_CELLS,
        }
    }
}

/// Byte cells plus the data pointer.
#[derive(Debug)]
pub struct Tape {
    cells: Vec<u8>,
    limits: TapeLimits,
    /// Current cell. May point anywhere; only dereferencing is checked.
    pub cursor: isize,
}

impl Tape {
    pub fn new(limits: TapeLimits) -> Self {
        Self {
            cells: Vec::new(),
            limits,
            cursor: 0,
        }
    }

    /// Number of cells currently backed by storage.
    pub fn allocated(&self) -> usize {
        self.cells.len()
    }

    /// Make sure `index` is backed by storage, allocating or growing as needed.
    ///
    /// Fails when `index` lies outside `[0, max)`. Calling it again for an
    /// already covered index does nothing.
    pub fn ensure_allocated(&mut self, index: isize) -> Result<usize, TapeError> {
        let Some(slot) = usize::try_from(index).ok().filter(|&i| i < self.limits.max) else {
            return Err(TapeError {
                index,
                capacity: self.limits.max,
            });
        };

        if slot < self.cells.len() {
            return Ok(slot);
        }

        let target = if slot < self.limits.small {
            self.limits.small
        } else {
            self.limits.max
        };
        log::debug!(
            "tape: growing from {} to {} cells (touched cell {})",
            self.cells.len(),
            target,
            slot
        );
        self.cells.resize(target, 0);
        Ok(slot)
    }

    pub fn get(&mut self, index: isize) -> Result<u8, TapeError> {
        let slot = self.ensure_allocated(index)?;
        Ok(self.cells[slot])
    }

    pub fn set(&mut self, index: isize, value: u8) -> Result<(), TapeError> {
        let slot = self.ensure_allocated(index)?;
        self.cells[slot] = value;
        Ok(())
    }

    /// Add one to a cell, wrapping 255 to 0. Returns the new value.
    pub fn increment(&mut self, index: isize) -> Result<u8, TapeError> {
        let slot = self.ensure_allocated(index)?;
        self.cells[slot] = self.cells[slot].wrapping_add(1);
        Ok(self.cells[slot])
    }

    /// Subtract one from a cell, wrapping 0 to 255. Returns the new value.
    pub fn decrement(&mut self, index: isize) -> Result<u8, TapeError> {
        let slot = self.ensure_allocated(index)?;
        self.cells[slot] = self.cells[slot].wrapping_sub(1);
        Ok(self.cells[slot])
    }

    pub fn current(&mut self) -> Result<u8, TapeError> {
        self.get(self.cursor)
    }
}
