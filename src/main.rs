//! serial-console - Main entry point
//!
//! On the device: console on UART0, polled from the main task.
//! On the host: console on stdin/stdout, for trying commands out.
//!
//! Both register a few demo commands next to the built-in help.

use core::fmt::Write;

use serial_console::console::{
    output_buffer, parameters, register_command, Arity, CommandContext, CommandDefinition,
    CommandHandler, Console, ConsoleError, INTERPRETER, VERSION,
};

fn register_demo_commands() -> Result<(), ConsoleError> {
    register_command(CommandDefinition::new(
        "echo",
        "\r\necho <words>:\r\n Prints its parameters back\r\n\r\n",
        Arity::Variable,
        cmd_echo,
    ))?;
    register_command(CommandDefinition::new(
        "version",
        "\r\nversion:\r\n Shows the firmware version\r\n\r\n",
        Arity::Exact(0),
        cmd_version,
    ))?;
    register_command(CommandDefinition::new(
        "count",
        "\r\ncount <n>:\r\n Counts to n, one line per output segment\r\n\r\n",
        Arity::Exact(1),
        CountCommand::default(),
    ))
}

// --- Command Implementations ---

fn cmd_echo(ctx: &mut CommandContext<'_>) -> bool {
    for (i, word) in parameters(ctx.line).enumerate() {
        if i > 0 {
            ctx.out.push_str(" ");
        }
        ctx.out.push_str(word);
    }
    ctx.out.push_str("\r\n");
    false
}

fn cmd_version(ctx: &mut CommandContext<'_>) -> bool {
    let _ = write!(ctx.out, "{}\r\n", VERSION);
    false
}

/// Emits one line per call until it reaches the requested count
#[derive(Default)]
struct CountCommand {
    current: u32,
    target: u32,
}

impl CommandHandler for CountCommand {
    fn invoke(&mut self, ctx: &mut CommandContext<'_>) -> bool {
        if self.current == 0 {
            match ctx.param(1).map(str::parse::<u32>) {
                Some(Ok(n)) if n > 0 => self.target = n,
                _ => {
                    ctx.out.push_str("count: expected a positive number\r\n");
                    return false;
                }
            }
        }

        self.current += 1;
        let _ = write!(ctx.out, "{}\r\n", self.current);

        if self.current < self.target {
            true
        } else {
            self.current = 0;
            false
        }
    }
}

#[cfg(target_os = "espidf")]
fn main() -> Result<(), esp_idf_svc::sys::EspError> {
    use esp_idf_svc::hal::delay::FreeRtos;
    use esp_idf_svc::hal::prelude::Peripherals;
    use serial_console::transport::esp_uart::{EspUart, EspUartConfig};

    // Initialize ESP-IDF
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let peripherals = Peripherals::take()?;
    let uart = EspUart::new(
        peripherals.uart0,
        peripherals.pins.gpio43,
        peripherals.pins.gpio44,
        &EspUartConfig::default(),
    )?;

    if let Err(e) = register_demo_commands() {
        log::error!("command registration failed: {}", e);
    }

    let mut console = Console::new(uart);
    if let Err(e) = console.print_banner() {
        log::error!("banner: {}", e);
    }

    loop {
        let result = {
            let mut interp = INTERPRETER.lock();
            let mut out = output_buffer();
            console.poll(&mut interp, &mut out)
        };

        match result {
            Some(Err(ConsoleError::Transport)) => log::error!("console transport failed"),
            Some(Err(e)) => log::debug!("command failed: {}", e),
            Some(Ok(())) => {}
            None => FreeRtos::delay_ms(10),
        }
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    let mut console = Console::new(host::StdioTransport::new());

    if let Err(e) = register_demo_commands() {
        eprintln!("command registration failed: {}", e);
        return;
    }
    if console.print_banner().is_err() {
        return;
    }

    loop {
        let mut interp = INTERPRETER.lock();
        let mut out = output_buffer();
        // End of input
        if let Some(Err(ConsoleError::Transport)) = console.step(&mut interp, &mut out) {
            break;
        }
    }
}

#[cfg(not(target_os = "espidf"))]
mod host {
    use std::io::{Read, Write};

    use serial_console::console::ConsoleError;
    use serial_console::transport::Transport;

    /// Transport over the process's stdin/stdout
    pub struct StdioTransport {
        stdin: std::io::Stdin,
        stdout: std::io::Stdout,
    }

    impl StdioTransport {
        pub fn new() -> Self {
            Self {
                stdin: std::io::stdin(),
                stdout: std::io::stdout(),
            }
        }
    }

    impl Default for StdioTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transport for StdioTransport {
        fn read_char_blocking(&mut self) -> Result<u8, ConsoleError> {
            let mut byte = [0u8; 1];
            self.read(&mut byte)?;
            Ok(byte[0])
        }

        fn read_char(&mut self) -> Option<u8> {
            // stdin has no portable non-blocking read
            None
        }

        fn read(&mut self, buf: &mut [u8]) -> Result<(), ConsoleError> {
            self.stdin
                .lock()
                .read_exact(buf)
                .map_err(|_| ConsoleError::Transport)
        }

        fn acquire(&mut self) {}

        fn release(&mut self) {
            let _ = self.stdout.flush();
        }

        fn write(&mut self, data: &[u8]) -> Result<(), ConsoleError> {
            self.stdout
                .lock()
                .write_all(data)
                .map_err(|_| ConsoleError::Transport)
        }
    }
}
