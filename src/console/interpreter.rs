//! Line dispatcher
//!
//! Two states: idle, or streaming a command that asked to be called again.
//! While streaming, input lines are not matched; they go straight to the
//! retained handler.

use spin::Mutex;

use super::commands::CommandDefinition;
use super::output::OutputBuffer;
use super::parser::parameter_count;
use super::registry::Registry;
use super::ConsoleError;

/// Process-wide interpreter, for firmware that registers from several tasks.
///
/// The lock is the critical section around registration. Not reentrant:
/// a handler must not call back into it.
pub static INTERPRETER: Mutex<Interpreter> = Mutex::new(Interpreter::new());

/// Register a command with the process-wide interpreter
pub fn register_command(def: CommandDefinition) -> Result<(), ConsoleError> {
    INTERPRETER.lock().register(def)
}

/// Run one line through the process-wide interpreter
pub fn process_command(input: &str, out: &mut OutputBuffer) -> Result<bool, ConsoleError> {
    INTERPRETER.lock().process_line(input, out)
}

/// Command interpreter: registry plus dispatch state
pub struct Interpreter {
    registry: Registry,
    /// Command still producing output segments
    active: Option<usize>,
}

impl Interpreter {
    /// Create interpreter with only the help command
    pub const fn new() -> Self {
        Self {
            registry: Registry::new(),
            active: None,
        }
    }

    /// Register a command, see [`Registry::register`]
    pub fn register(&mut self, def: CommandDefinition) -> Result<(), ConsoleError> {
        self.registry.register(def)
    }

    /// Registered commands
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// True while a command has more output pending
    pub fn is_streaming(&self) -> bool {
        self.active.is_some()
    }

    /// Process one input line, or the next segment of a streaming command.
    ///
    /// Returns `Ok(true)` when more output is pending: call again (with any
    /// line) to get the next segment. On error the buffer holds a message for
    /// the user and the interpreter is idle.
    pub fn process_line(
        &mut self,
        input: &str,
        out: &mut OutputBuffer,
    ) -> Result<bool, ConsoleError> {
        let index = match self.active {
            Some(index) => index,
            None => self.lookup(input).map_err(|e| {
                if let Some(msg) = e.user_message() {
                    out.fill(msg);
                }
                e
            })?,
        };

        out.clear();
        let more = self.registry.invoke(index, input, out);

        match (self.active.is_some(), more) {
            (false, true) => log::debug!("command #{} streaming", index),
            (true, false) => log::debug!("command #{} finished streaming", index),
            _ => log::trace!("command #{} wrote {} bytes", index, out.len()),
        }

        self.active = more.then_some(index);
        Ok(more)
    }

    /// Match `input` and check its parameter count
    fn lookup(&self, input: &str) -> Result<usize, ConsoleError> {
        let Some(index) = self.registry.find(input) else {
            log::warn!("unknown command: {:?}", input);
            return Err(ConsoleError::UnknownCommand);
        };

        // find() only returns valid indices
        let info = self.registry.get(index).ok_or(ConsoleError::UnknownCommand)?;
        let count = parameter_count(input);
        if !info.arity.accepts(count) {
            log::warn!(
                "'{}' expects {:?} parameters, got {}",
                info.name,
                info.arity,
                count
            );
            return Err(ConsoleError::IncorrectParams);
        }

        log::debug!("dispatching '{}'", info.name);
        Ok(index)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
