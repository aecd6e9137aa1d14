//! A small pool of reusable `Vec<u16>` scratch buffers.
//!
//! Text at or below [`STACK_THRESHOLD`] code units is normalized into a
//! stack array and never touches the pool. Longer text rents one buffer for
//! the duration of the call and returns it on drop — exactly one rent and
//! one return per call, regardless of how the call exits (including via
//! `?`), which is what the `Drop` impl on [`PooledBuffer`] buys us over an
//! explicit close/release method.

use std::sync::Mutex;

/// Text up to this many code units is normalized on the stack; longer text
/// goes through the pool instead.
pub const STACK_THRESHOLD: usize = 512;

pub struct BufferPool {
    free: Mutex<Vec<Vec<u16>>>,
}

impl BufferPool {
    pub fn new() -> Self {
        BufferPool {
            free: Mutex::new(Vec::new()),
        }
    }

    /// Rents a buffer, reusing a freed one if available. The returned guard
    /// releases the buffer back to the pool when dropped.
    pub fn rent(&self) -> PooledBuffer<'_> {
        let buf = self
            .free
            .lock()
            .expect("buffer pool mutex poisoned")
            .pop()
            .unwrap_or_default();
        PooledBuffer { pool: self, buf: Some(buf) }
    }

    fn reclaim(&self, mut buf: Vec<u16>) {
        buf.clear();
        if let Ok(mut free) = self.free.lock() {
            free.push(buf);
        }
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

/// A rented `Vec<u16>`. Derefs to the buffer; returns it to the owning pool
/// when dropped.
pub struct PooledBuffer<'a> {
    pool: &'a BufferPool,
    buf: Option<Vec<u16>>,
}

impl<'a> std::ops::Deref for PooledBuffer<'a> {
    type Target = Vec<u16>;
    fn deref(&self) -> &Vec<u16> {
        self.buf.as_ref().expect("buffer taken before drop")
    }
}

impl<'a> std::ops::DerefMut for PooledBuffer<'a> {
    fn deref_mut(&mut self) -> &mut Vec<u16> {
        self.buf.as_mut().expect("buffer taken before drop")
    }
}

impl<'a> Drop for PooledBuffer<'a> {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            self.pool.reclaim(buf);
        }
    }
}
