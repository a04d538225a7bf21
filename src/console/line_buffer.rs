//! Input line accumulator
//!
//! Holds printable ASCII typed at the console until Enter. Bytes typed past
//! [`LINE_SIZE`] are dropped and the line is marked as overflowed, so a
//! truncated command is never dispatched.

use crate::config::LINE_SIZE;

/// Console input line
pub struct LineBuffer {
    bytes: [u8; LINE_SIZE],
    len: usize,
    overflowed: bool,
}

impl LineBuffer {
    pub const fn new() -> Self {
        Self {
            bytes: [0u8; LINE_SIZE],
            len: 0,
            overflowed: false,
        }
    }

    /// Append a byte; `false` if it did not fit.
    pub fn push(&mut self, byte: u8) -> bool {
        match self.bytes.get_mut(self.len) {
            Some(slot) => {
                *slot = byte;
                self.len += 1;
                true
            }
            None => {
                self.overflowed = true;
                false
            }
        }
    }

    /// Drop the last byte; `false` if the line was empty.
    pub fn backspace(&mut self) -> bool {
        if self.len == 0 {
            return false;
        }
        self.len -= 1;
        // Still dropped input on this line, keep the flag
        true
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.overflowed = false;
    }

    /// True if input was dropped since the last clear
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(self.as_bytes()).unwrap_or("")
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
