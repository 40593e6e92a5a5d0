//! Text buffer pooling.
//!
//! Every parse copies its input into a buffer leased from a pool, and the
//! owning [`Document`](super::Document) hands the buffer back on disposal.
//! Repeated parses therefore reuse allocations instead of growing fresh ones.

use std::{
    collections::VecDeque,
    sync::{
        Arc, OnceLock,
        atomic::{AtomicUsize, Ordering},
    },
};

use parking_lot::Mutex;

/// A source of reusable text buffers.
///
/// Implementations must be shareable across threads: one pool typically
/// serves every parse in a process.
pub trait BufferPool: Send + Sync {
    /// Returns an empty buffer with at least `min_capacity` bytes reserved.
    fn lease(&self, min_capacity: usize) -> String;

    /// Takes a buffer back. Contents are discarded.
    fn release(&self, buffer: String);
}

/// Thread-safe free-list pool.
///
/// Buffers are handed out most-recently-released first. At most
/// `max_retained` idle buffers are kept; extra releases are freed.
#[derive(Debug)]
pub struct SharedBufferPool {
    available: Mutex<VecDeque<String>>,
    max_retained: usize,
    leased: AtomicUsize,
    released: AtomicUsize,
}

impl SharedBufferPool {
    pub const DEFAULT_MAX_RETAINED: usize = 64;

    pub fn new() -> Self {
        Self::with_max_retained(Self::DEFAULT_MAX_RETAINED)
    }

    pub fn with_max_retained(max_retained: usize) -> Self {
        Self {
            available: Mutex::new(VecDeque::new()),
            max_retained,
            leased: AtomicUsize::new(0),
            released: AtomicUsize::new(0),
        }
    }

    /// Number of idle buffers waiting to be leased.
    pub fn available_count(&self) -> usize {
        self.available.lock().len()
    }

    /// Total leases served since creation.
    pub fn leased_count(&self) -> usize {
        self.leased.load(Ordering::Relaxed)
    }

    /// Total buffers given back since creation.
    pub fn released_count(&self) -> usize {
        self.released.load(Ordering::Relaxed)
    }

    /// Frees all idle buffers.
    pub fn clear(&self) {
        self.available.lock().clear();
    }
}

impl Default for SharedBufferPool {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferPool for SharedBufferPool {
    fn lease(&self, min_capacity: usize) -> String {
        self.leased.fetch_add(1, Ordering::Relaxed);
        let mut buffer = self.available.lock().pop_back().unwrap_or_default();
        buffer.reserve(min_capacity);
        buffer
    }

    fn release(&self, mut buffer: String) {
        self.released.fetch_add(1, Ordering::Relaxed);
        buffer.clear();
        let mut available = self.available.lock();
        if available.len() < self.max_retained {
            available.push_back(buffer);
        }
    }
}

/// The process-wide pool used when no pool is configured.
pub fn default_pool() -> Arc<dyn BufferPool> {
    static POOL: OnceLock<Arc<SharedBufferPool>> = OnceLock::new();
    POOL.get_or_init(|| Arc::new(SharedBufferPool::new())).clone()
}
