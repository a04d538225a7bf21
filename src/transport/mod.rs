//! Serial transport seam.
//!
//! The interpreter never touches hardware. Board glue implements
//! [`Transport`]; [`CliPort`] adds scoped access around every write.
//!
//! ```text
//! Console ──▶ CliPort ──▶ acquire ─▶ write ─▶ release ──▶ UART
//!                  ◀────── read_char / read ◀────────────
//! ```

#[cfg(target_os = "espidf")]
pub mod esp_uart;

#[cfg(target_os = "espidf")]
pub use esp_uart::EspUart;

use crate::console::ConsoleError;

/// Character-stream link driven by the console
pub trait Transport {
    /// Wait for the next byte
    fn read_char_blocking(&mut self) -> Result<u8, ConsoleError>;

    /// Next byte if one is already available
    fn read_char(&mut self) -> Option<u8>;

    /// Fill `buf` completely
    fn read(&mut self, buf: &mut [u8]) -> Result<(), ConsoleError>;

    /// Take exclusive use of the write side
    fn acquire(&mut self);

    /// Give up the write side taken by [`acquire`](Self::acquire)
    fn release(&mut self);

    /// Write all of `data`
    fn write(&mut self, data: &[u8]) -> Result<(), ConsoleError>;
}

/// Holds transport access; releases it on drop.
pub struct AccessGuard<'a, T: Transport> {
    transport: &'a mut T,
}

impl<'a, T: Transport> AccessGuard<'a, T> {
    /// Acquire access
    pub fn new(transport: &'a mut T) -> Self {
        transport.acquire();
        Self { transport }
    }

    /// Write while holding access
    pub fn write(&mut self, data: &[u8]) -> Result<(), ConsoleError> {
        self.transport.write(data)
    }
}

impl<T: Transport> Drop for AccessGuard<'_, T> {
    fn drop(&mut self) {
        self.transport.release();
    }
}

/// Console side of the transport
pub struct CliPort<T: Transport> {
    transport: T,
}

impl<T: Transport> CliPort<T> {
    /// Wrap a transport
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Blocking read of one byte
    pub fn get_char(&mut self) -> Result<u8, ConsoleError> {
        self.transport.read_char_blocking()
    }

    /// Non-blocking read of one byte
    pub fn get_char_non_blocking(&mut self) -> Option<u8> {
        self.transport.read_char()
    }

    /// Read exactly `buf.len()` bytes
    pub fn get_chars(&mut self, buf: &mut [u8]) -> Result<(), ConsoleError> {
        self.transport.read(buf)
    }

    /// Send raw bytes under scoped access
    pub fn send_data(&mut self, data: &[u8]) -> Result<(), ConsoleError> {
        if data.is_empty() {
            return Ok(());
        }
        AccessGuard::new(&mut self.transport).write(data)
    }

    /// Send a string under scoped access
    pub fn send_str(&mut self, s: &str) -> Result<(), ConsoleError> {
        self.send_data(s.as_bytes())
    }

    /// Borrow the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutably borrow the transport
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Unwrap the transport
    pub fn into_inner(self) -> T {
        self.transport
    }
}

impl<T: Transport> core::fmt::Write for CliPort<T> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.send_str(s).map_err(|_| core::fmt::Error)
    }
}
