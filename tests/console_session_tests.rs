//! Console session tests over an in-memory transport

use std::collections::VecDeque;

use serial_console::config::LINE_SIZE;
use serial_console::console::error::NOT_RECOGNISED_MSG;
use serial_console::console::{
    Arity, CommandContext, CommandDefinition, CommandHandler, Console, ConsoleError, Interpreter,
    OutputBuffer, HELP_INFO,
};
use serial_console::transport::Transport;

/// Scripted input, captured output
#[derive(Default)]
struct MockTransport {
    input: VecDeque<u8>,
    output: Vec<u8>,
    held: bool,
    writes: usize,
    /// 1-based write number that fails
    fail_write: Option<usize>,
}

impl MockTransport {
    fn with_input(text: &str) -> Self {
        Self {
            input: text.bytes().collect(),
            ..Self::default()
        }
    }

    fn output(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl Transport for MockTransport {
    fn read_char_blocking(&mut self) -> Result<u8, ConsoleError> {
        self.input.pop_front().ok_or(ConsoleError::Transport)
    }

    fn read_char(&mut self) -> Option<u8> {
        self.input.pop_front()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), ConsoleError> {
        for slot in buf.iter_mut() {
            *slot = self.read_char_blocking()?;
        }
        Ok(())
    }

    fn acquire(&mut self) {
        assert!(!self.held, "acquire while already held");
        self.held = true;
    }

    fn release(&mut self) {
        assert!(self.held, "release without acquire");
        self.held = false;
    }

    fn write(&mut self, data: &[u8]) -> Result<(), ConsoleError> {
        assert!(self.held, "write outside acquire/release");
        self.writes += 1;
        if self.fail_write == Some(self.writes) {
            return Err(ConsoleError::Transport);
        }
        self.output.extend_from_slice(data);
        Ok(())
    }
}

/// Two output segments per invocation sequence
#[derive(Default)]
struct TwoSegments {
    sent_first: bool,
}

impl CommandHandler for TwoSegments {
    fn invoke(&mut self, ctx: &mut CommandContext<'_>) -> bool {
        self.sent_first = !self.sent_first;
        ctx.out.push_str(if self.sent_first { "[one]" } else { "[two]" });
        self.sent_first
    }
}

fn nop(_ctx: &mut CommandContext<'_>) -> bool {
    false
}

/// Feed all scripted input, collecting completed command results
fn run(
    console: &mut Console<MockTransport>,
    interp: &mut Interpreter,
) -> Vec<Result<(), ConsoleError>> {
    let mut out = OutputBuffer::new();
    let mut results = Vec::new();
    while !console.port().transport().input.is_empty() {
        if let Some(result) = console.poll(interp, &mut out) {
            results.push(result);
        }
    }
    results
}

#[test]
fn test_echo_and_prompt() {
    let mut interp = Interpreter::new();
    let mut console = Console::new(MockTransport::with_input("hi"));

    assert!(run(&mut console, &mut interp).is_empty());
    assert_eq!(console.pending_line(), "hi");
    assert_eq!(console.port().transport().output(), "hi");
}

#[test]
fn test_enter_runs_help_to_completion() {
    let mut interp = Interpreter::new();
    interp
        .register(CommandDefinition::new("a", "[A]", Arity::Variable, nop))
        .unwrap();
    let mut console = Console::new(MockTransport::with_input("help\r"));

    assert_eq!(run(&mut console, &mut interp), [Ok(())]);
    let expected = format!("help\r\n{}[A]> ", HELP_INFO.help);
    assert_eq!(console.port().transport().output(), expected);
    assert!(!interp.is_streaming());
    assert_eq!(console.pending_line(), "");
}

#[test]
fn test_streaming_segments_each_sent() {
    let mut interp = Interpreter::new();
    interp
        .register(CommandDefinition::new(
            "two",
            "",
            Arity::Exact(0),
            TwoSegments::default(),
        ))
        .unwrap();
    let mut console = Console::new(MockTransport::with_input("two\r"));

    assert_eq!(run(&mut console, &mut interp), [Ok(())]);
    let transport = console.port().transport();
    assert_eq!(transport.output(), "two\r\n[one][two]> ");
    // Three echoes, newline, two segments, prompt
    assert_eq!(transport.writes, 7);
    assert!(!transport.held);
}

#[test]
fn test_failed_send_leaves_interpreter_idle() {
    let mut interp = Interpreter::new();
    interp
        .register(CommandDefinition::new("a", "[A]", Arity::Variable, nop))
        .unwrap();
    // Four echoes and the newline, then the first help segment fails
    let mut console = Console::new(MockTransport {
        fail_write: Some(6),
        ..MockTransport::with_input("help\r")
    });

    assert_eq!(
        run(&mut console, &mut interp),
        [Err(ConsoleError::Transport)]
    );
    assert!(!interp.is_streaming());
    assert!(!console.port().transport().held);
    assert!(!console.port().transport().output().contains("[A]"));

    console.port().transport_mut().input.extend(b"zzz\r");
    assert_eq!(
        run(&mut console, &mut interp),
        [Err(ConsoleError::UnknownCommand)]
    );
    let expected = format!("zzz\r\n{}> ", NOT_RECOGNISED_MSG);
    assert!(console.port().transport().output().ends_with(&expected));
}

#[test]
fn test_crlf_prompts_once() {
    let mut interp = Interpreter::new();
    let mut console = Console::new(MockTransport::with_input("help\r\n"));

    assert_eq!(run(&mut console, &mut interp), [Ok(())]);
    let expected = format!("help\r\n{}> ", HELP_INFO.help);
    assert_eq!(console.port().transport().output(), expected);
}

#[test]
fn test_bare_newline_submits() {
    let mut interp = Interpreter::new();
    let mut console = Console::new(MockTransport::with_input("help\n\n"));

    assert_eq!(run(&mut console, &mut interp), [Ok(())]);
    let expected = format!("help\r\n{}> \r\n> ", HELP_INFO.help);
    assert_eq!(console.port().transport().output(), expected);
}

#[test]
fn test_unknown_command_reported() {
    let mut interp = Interpreter::new();
    let mut console = Console::new(MockTransport::with_input("nope\r"));

    assert_eq!(
        run(&mut console, &mut interp),
        [Err(ConsoleError::UnknownCommand)]
    );
    let expected = format!("nope\r\n{}> ", NOT_RECOGNISED_MSG);
    assert_eq!(console.port().transport().output(), expected);
}

#[test]
fn test_backspace_and_ctrl_u() {
    let mut interp = Interpreter::new();
    let mut console = Console::new(MockTransport::with_input("helq\x7fp"));
    run(&mut console, &mut interp);
    assert_eq!(console.pending_line(), "help");

    console.port().transport_mut().input.extend(b"\x15");
    run(&mut console, &mut interp);
    assert_eq!(console.pending_line(), "");
}

#[test]
fn test_escape_sequences_ignored() {
    let mut interp = Interpreter::new();
    // Up arrow, then text
    let mut console = Console::new(MockTransport::with_input("\x1b[Aok"));
    run(&mut console, &mut interp);
    assert_eq!(console.pending_line(), "ok");
}

#[test]
fn test_ctrl_c_discards_line() {
    let mut interp = Interpreter::new();
    let mut console = Console::new(MockTransport::with_input("junk\x03help\r"));

    assert_eq!(run(&mut console, &mut interp), [Ok(())]);
    assert!(console.port().transport().output().contains("^C\r\n> "));
}

#[test]
fn test_empty_line_only_prompts() {
    let mut interp = Interpreter::new();
    let mut console = Console::new(MockTransport::with_input("\r"));

    assert!(run(&mut console, &mut interp).is_empty());
    assert_eq!(console.port().transport().output(), "\r\n> ");
}

#[test]
fn test_overlong_line_not_dispatched() {
    let mut interp = Interpreter::new();
    let mut text = "help".to_string();
    text.push_str(&" ".repeat(LINE_SIZE));
    text.push('\r');
    let mut console = Console::new(MockTransport::with_input(&text));

    assert_eq!(
        run(&mut console, &mut interp),
        [Err(ConsoleError::LineTooLong)]
    );
    assert!(!interp.is_streaming());
    assert!(console.port().transport().output().ends_with("Line too long.\r\n\r\n> "));
}

#[test]
fn test_step_reports_transport_end() {
    let mut interp = Interpreter::new();
    let mut out = OutputBuffer::new();
    let mut console = Console::new(MockTransport::default());

    assert_eq!(
        console.step(&mut interp, &mut out),
        Some(Err(ConsoleError::Transport))
    );
}

#[test]
fn test_banner() {
    let mut console = Console::new(MockTransport::default());
    console.print_banner().unwrap();

    let output = console.port().transport().output();
    assert!(output.contains(serial_console::console::VERSION));
    assert!(output.ends_with("> "));
}
