//! Console session: line editing over a transport, dispatch on Enter

use super::{ConsoleError, Interpreter, LineBuffer, OutputBuffer};
use crate::transport::{CliPort, Transport};

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Console state machine
pub struct Console<T: Transport> {
    port: CliPort<T>,
    line: LineBuffer,
    /// Escape sequence state
    escape_state: EscapeState,
    /// Previous byte was a carriage return
    after_cr: bool,
}

#[derive(Clone, Copy, PartialEq)]
enum EscapeState {
    Normal,
    Escape,      // Got ESC
    Bracket,     // Got ESC [
}

impl<T: Transport> Console<T> {
    /// Create new console on a transport
    pub fn new(transport: T) -> Self {
        Self {
            port: CliPort::new(transport),
            line: LineBuffer::new(),
            escape_state: EscapeState::Normal,
            after_cr: false,
        }
    }

    /// Port used for all output
    pub fn port(&mut self) -> &mut CliPort<T> {
        &mut self.port
    }

    /// Current, not yet submitted, input
    pub fn pending_line(&self) -> &str {
        self.line.as_str()
    }

    /// Read one byte if available and process it
    pub fn poll(
        &mut self,
        interp: &mut Interpreter,
        out: &mut OutputBuffer,
    ) -> Option<Result<(), ConsoleError>> {
        let byte = self.port.get_char_non_blocking()?;
        self.process_byte(byte, interp, out)
    }

    /// Wait for one byte and process it
    pub fn step(
        &mut self,
        interp: &mut Interpreter,
        out: &mut OutputBuffer,
    ) -> Option<Result<(), ConsoleError>> {
        match self.port.get_char() {
            Ok(byte) => self.process_byte(byte, interp, out),
            Err(e) => Some(Err(e)),
        }
    }

    /// Process a single input byte
    ///
    /// Returns Some(result) if a command completed, None if more input needed.
    pub fn process_byte(
        &mut self,
        byte: u8,
        interp: &mut Interpreter,
        out: &mut OutputBuffer,
    ) -> Option<Result<(), ConsoleError>> {
        let after_cr = core::mem::replace(&mut self.after_cr, byte == b'\r');
        match self.escape_state {
            // CRLF terminals: the LF belongs to the CR already handled
            EscapeState::Normal if byte == b'\n' && after_cr => None,
            EscapeState::Normal => self.process_normal(byte, interp, out),
            EscapeState::Escape => {
                if byte == b'[' {
                    self.escape_state = EscapeState::Bracket;
                } else {
                    self.escape_state = EscapeState::Normal;
                }
                None
            }
            EscapeState::Bracket => {
                // Cursor keys are not supported, drop the final byte
                self.escape_state = EscapeState::Normal;
                None
            }
        }
    }

    fn process_normal(
        &mut self,
        byte: u8,
        interp: &mut Interpreter,
        out: &mut OutputBuffer,
    ) -> Option<Result<(), ConsoleError>> {
        match byte {
            // Enter
            b'\r' | b'\n' => {
                if let Err(e) = self.port.send_str("\r\n") {
                    return Some(Err(e));
                }

                if self.line.is_empty() {
                    return self.print_prompt().err().map(Err);
                }

                let result = if self.line.overflowed() {
                    self.port
                        .send_str("Line too long.\r\n\r\n")
                        .and(Err(ConsoleError::LineTooLong))
                } else {
                    self.run_line(interp, out)
                };
                self.line.clear();
                if let Err(e) = self.print_prompt() {
                    return Some(Err(e));
                }
                Some(result)
            }

            // Backspace
            0x7F | 0x08 => {
                if self.line.backspace() {
                    // Echo: backspace, space, backspace
                    return self.port.send_str("\x08 \x08").err().map(Err);
                }
                None
            }

            // Escape
            0x1B => {
                self.escape_state = EscapeState::Escape;
                None
            }

            // Ctrl+C
            0x03 => {
                self.line.clear();
                if let Err(e) = self.port.send_str("^C\r\n") {
                    return Some(Err(e));
                }
                self.print_prompt().err().map(Err)
            }

            // Ctrl+U (clear line)
            0x15 => {
                for _ in 0..self.line.len() {
                    if let Err(e) = self.port.send_str("\x08 \x08") {
                        return Some(Err(e));
                    }
                }
                self.line.clear();
                None
            }

            // Printable character
            0x20..=0x7E => {
                if self.line.push(byte) {
                    return self.port.send_data(&[byte]).err().map(Err);
                }
                None
            }

            _ => None,
        }
    }

    /// Dispatch the buffered line and send every output segment.
    ///
    /// A failed send does not abandon a streaming command: the remaining
    /// segments are drained unsent so the interpreter ends up idle, and the
    /// first transport error is returned.
    fn run_line(
        &mut self,
        interp: &mut Interpreter,
        out: &mut OutputBuffer,
    ) -> Result<(), ConsoleError> {
        let line = self.line.as_str();
        let mut send_error = None;
        loop {
            let result = interp.process_line(line, out);
            if send_error.is_none() {
                send_error = self.port.send_data(out.as_bytes()).err();
            }
            match result {
                Ok(true) => continue,
                Ok(false) => break,
                Err(e) => return Err(send_error.unwrap_or(e)),
            }
        }
        match send_error {
            Some(e) => {
                log::warn!("output dropped: {}", e);
                Err(e)
            }
            None => Ok(()),
        }
    }

    /// Print the prompt
    pub fn print_prompt(&mut self) -> Result<(), ConsoleError> {
        self.port.send_str("> ")
    }

    /// Print welcome banner
    pub fn print_banner(&mut self) -> Result<(), ConsoleError> {
        self.port.send_str("\r\n")?;
        self.port.send_str(VERSION)?;
        self.port.send_str("\r\nType 'help' for commands.\r\n")?;
        self.print_prompt()
    }
}
