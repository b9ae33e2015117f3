use thiserror::Error;

/// Result type local to mfront-mem.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("out of memory: {count} x {element_size} bytes (tag '{tag}')")]
    OutOfMemory {
        tag: &'static str,
        count: usize,
        element_size: usize,
    },

    #[error("allocation size overflow: {count} x {element_size} bytes (tag '{tag}')")]
    SizeOverflow {
        tag: &'static str,
        count: usize,
        element_size: usize,
    },

    #[error("memory cap exceeded for tag '{tag}': requested {requested} bytes, capacity {capacity}, used {used}")]
    CapacityExceeded {
        tag: &'static str,
        requested: usize,
        capacity: usize,
        used: usize,
    },

    #[error("injected allocation failure on request {request} (tag '{tag}')")]
    InjectedFault { tag: &'static str, request: u64 },

    #[error("invalid element dimensions: {nrows} x {ncols}")]
    InvalidDimensions { nrows: usize, ncols: usize },
}

impl Error {
    /// Every variant is an out-of-memory condition from the caller's point of
    /// view except malformed dimensions.
    pub fn is_out_of_memory(&self) -> bool {
        !matches!(self, Error::InvalidDimensions { .. })
    }
}
