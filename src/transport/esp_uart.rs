//! UART transport on ESP-IDF.
//!
//! Console on UART0 through the on-board USB-UART bridge.
//!
//! ```text
//! ESP32-S3 GPIO43 (TX) ──────▶ USB-UART RX
//! ESP32-S3 GPIO44 (RX) ◀────── USB-UART TX
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

use esp_idf_svc::hal::delay::{BLOCK, NON_BLOCK};
use esp_idf_svc::hal::gpio;
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::uart::{self, UartDriver};
use esp_idf_svc::sys::EspError;

use super::Transport;
use crate::console::ConsoleError;

/// UART configuration for the console.
pub struct EspUartConfig {
    pub baud_rate: u32,
}

impl Default for EspUartConfig {
    fn default() -> Self {
        Self { baud_rate: 115200 }
    }
}

/// Console transport over an ESP-IDF UART driver
pub struct EspUart<'d> {
    driver: UartDriver<'d>,
    /// Write-side owner flag
    busy: AtomicBool,
}

impl<'d> EspUart<'d> {
    /// Install the UART driver on the given pins.
    pub fn new<U: uart::Uart>(
        uart: impl Peripheral<P = U> + 'd,
        tx_pin: impl Peripheral<P = impl gpio::OutputPin> + 'd,
        rx_pin: impl Peripheral<P = impl gpio::InputPin> + 'd,
        config: &EspUartConfig,
    ) -> Result<Self, EspError> {
        let uart_config = uart::config::Config::default()
            .baudrate(esp_idf_svc::hal::units::Hertz(config.baud_rate));

        let driver = UartDriver::new(
            uart,
            tx_pin,
            rx_pin,
            Option::<gpio::AnyIOPin>::None, // CTS
            Option::<gpio::AnyIOPin>::None, // RTS
            &uart_config,
        )?;

        Ok(Self {
            driver,
            busy: AtomicBool::new(false),
        })
    }
}

impl Transport for EspUart<'_> {
    fn read_char_blocking(&mut self) -> Result<u8, ConsoleError> {
        let mut byte = [0u8; 1];
        loop {
            let n = self
                .driver
                .read(&mut byte, BLOCK)
                .map_err(|_| ConsoleError::Transport)?;
            if n == 1 {
                return Ok(byte[0]);
            }
        }
    }

    fn read_char(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.driver.read(&mut byte, NON_BLOCK) {
            Ok(1) => Some(byte[0]),
            _ => None,
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), ConsoleError> {
        let mut filled = 0;
        while filled < buf.len() {
            filled += self
                .driver
                .read(&mut buf[filled..], BLOCK)
                .map_err(|_| ConsoleError::Transport)?;
        }
        Ok(())
    }

    fn acquire(&mut self) {
        while self
            .busy
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            core::hint::spin_loop();
        }
    }

    fn release(&mut self) {
        self.busy.store(false, Ordering::Release);
    }

    fn write(&mut self, data: &[u8]) -> Result<(), ConsoleError> {
        let mut sent = 0;
        while sent < data.len() {
            sent += self
                .driver
                .write(&data[sent..])
                .map_err(|_| ConsoleError::Transport)?;
        }
        Ok(())
    }
}
