//! Shared output buffer
//!
//! One fixed-capacity buffer receives the output of every command segment.
//! Writes past the capacity are dropped, never wrapped.

use crate::config::{GUARD_MARGIN, OUTPUT_BUFFER_SIZE};
use spin::{Mutex, MutexGuard};

/// Process-wide output buffer, shared by all consoles.
pub static OUTPUT_BUFFER: Mutex<OutputBuffer> = Mutex::new(OutputBuffer::new());

/// Lock the process-wide output buffer.
pub fn output_buffer() -> MutexGuard<'static, OutputBuffer> {
    OUTPUT_BUFFER.lock()
}

/// Fixed-capacity byte buffer for command output
pub struct OutputBuffer {
    buf: [u8; OUTPUT_BUFFER_SIZE],
    len: usize,
    capacity: usize,
}

impl OutputBuffer {
    /// Create empty buffer using the full configured size
    pub const fn new() -> Self {
        Self {
            buf: [0u8; OUTPUT_BUFFER_SIZE],
            len: 0,
            capacity: OUTPUT_BUFFER_SIZE,
        }
    }

    /// Create empty buffer limited to `capacity` bytes.
    ///
    /// The limit is clamped to [`OUTPUT_BUFFER_SIZE`].
    pub const fn with_capacity(capacity: usize) -> Self {
        let capacity = if capacity < OUTPUT_BUFFER_SIZE {
            capacity
        } else {
            OUTPUT_BUFFER_SIZE
        };
        Self {
            buf: [0u8; OUTPUT_BUFFER_SIZE],
            len: 0,
            capacity,
        }
    }

    /// Change the effective capacity, dropping anything past it
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.min(OUTPUT_BUFFER_SIZE);
        self.len = self.len.min(self.capacity);
    }

    /// Effective capacity in bytes
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes written so far
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes left before the capacity is reached
    pub fn remaining(&self) -> usize {
        self.capacity - self.len
    }

    /// Check if no more bytes fit
    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// True once at most `margin` bytes remain.
    pub fn near_end(&self, margin: usize) -> bool {
        self.remaining() <= margin
    }

    /// [`near_end`](Self::near_end) with the configured [`GUARD_MARGIN`].
    pub fn is_near_end(&self) -> bool {
        self.near_end(GUARD_MARGIN)
    }

    /// Clear buffer
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Append as much of `s` as fits.
    ///
    /// The cut never falls inside a UTF-8 sequence. Returns bytes written.
    pub fn push_str(&mut self, s: &str) -> usize {
        let mut to_copy = s.len().min(self.remaining());
        while !s.is_char_boundary(to_copy) {
            to_copy -= 1;
        }
        self.buf[self.len..self.len + to_copy].copy_from_slice(&s.as_bytes()[..to_copy]);
        self.len += to_copy;
        to_copy
    }

    /// Replace the contents with as much of `s` as fits
    pub fn fill(&mut self, s: &str) -> usize {
        self.clear();
        self.push_str(s)
    }

    /// Get written bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Get buffer as string slice
    pub fn as_str(&self) -> &str {
        // Only whole UTF-8 sequences are ever stored
        core::str::from_utf8(self.as_bytes()).unwrap_or("")
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Write for OutputBuffer {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

impl core::fmt::Debug for OutputBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OutputBuffer")
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .field("contents", &self.as_str())
            .finish()
    }
}
