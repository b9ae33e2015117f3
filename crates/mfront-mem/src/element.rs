//! Storage for assembled frontal blocks.
//!
//! An `Element` owns three buffers: row indices, column indices, and the dense
//! `nrows x ncols` value block. They are requested in that order; if any
//! request fails the buffers already obtained are dropped before the error
//! propagates, so a failed call never leaks.

use std::mem::size_of;

use crate::alloc::{MemoryAllocator, TrackedBuf};
use crate::error::{Error, Result};

/// One assembled frontal block.
#[derive(Debug)]
pub struct Element {
    pub rows: TrackedBuf<usize>,
    pub cols: TrackedBuf<usize>,
    pub values: TrackedBuf<f64>,
}

impl Element {
    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    pub fn ncols(&self) -> usize {
        self.cols.len()
    }

    /// Total accounted size of the three buffers, in bytes.
    pub fn total_bytes(&self) -> usize {
        self.rows.bytes() + self.cols.bytes() + self.values.bytes()
    }

    /// Column-major access into the value block.
    pub fn value(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.nrows() && j < self.ncols(), "({i}, {j}) outside element");
        self.values[j * self.nrows() + i]
    }

    pub fn value_mut(&mut self, i: usize, j: usize) -> &mut f64 {
        debug_assert!(i < self.nrows() && j < self.ncols(), "({i}, {j}) outside element");
        let nrows = self.nrows();
        &mut self.values[j * nrows + i]
    }
}

/// Allocates frontal element storage through a `MemoryAllocator`.
#[derive(Clone, Default)]
pub struct ElementPool {
    alloc: MemoryAllocator,
}

impl ElementPool {
    pub fn new(alloc: MemoryAllocator) -> Self {
        Self { alloc }
    }

    pub fn alloc_element(&self, nrows: usize, ncols: usize) -> Result<Element> {
        let entries = nrows
            .checked_mul(ncols)
            .ok_or(Error::InvalidDimensions { nrows, ncols })?;
        if entries.checked_mul(size_of::<f64>()).is_none() {
            return Err(Error::InvalidDimensions { nrows, ncols });
        }

        let rows = self.alloc.allocate::<usize>(nrows, "element.rows")?;
        let cols = self.alloc.allocate::<usize>(ncols, "element.cols")?;
        let values = self.alloc.allocate::<f64>(entries, "element.values")?;

        #[cfg(feature = "tracing")]
        tracing::trace!(nrows, ncols, entries, "element allocated");

        Ok(Element { rows, cols, values })
    }

    /// Working buffer of `entries` numeric values for one subtree traversal.
    pub fn alloc_workspace(&self, entries: usize) -> Result<TrackedBuf<f64>> {
        self.alloc.allocate::<f64>(entries, "workspace")
    }

    pub fn allocator(&self) -> &MemoryAllocator {
        &self.alloc
    }
}
