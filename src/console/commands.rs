//! Command definitions and the built-in help command

use alloc::boxed::Box;

use super::output::OutputBuffer;
use super::ConsoleError;

/// Expected number of parameters after the command name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Any number of parameters, not checked by the dispatcher
    Variable,
    /// Exactly this many parameters
    Exact(u8),
}

impl Arity {
    /// Check a parameter count against this arity
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Self::Variable => true,
            Self::Exact(n) => count == usize::from(*n),
        }
    }
}

impl TryFrom<i8> for Arity {
    type Error = ConsoleError;

    /// `-1` means variable, `0..` means exact.
    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Variable),
            n if n >= 0 => Ok(Self::Exact(n as u8)),
            _ => Err(ConsoleError::InvalidArity),
        }
    }
}

/// Command metadata visible to every handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: &'static str,
    pub help: &'static str,
    pub arity: Arity,
}

/// Metadata of the built-in help command
pub const HELP_INFO: CommandInfo = CommandInfo {
    name: "help",
    help: "\r\nhelp:\r\n Lists all the registered commands\r\n\r\n",
    arity: Arity::Exact(0),
};

/// Read-only view over the registry metadata, in registration order.
///
/// Index 0 is always the help command.
#[derive(Debug, Clone, Copy)]
pub struct Commands<'a> {
    pub(crate) user: &'a [CommandInfo],
}

impl<'a> Commands<'a> {
    /// Number of commands, help included
    pub fn len(&self) -> usize {
        self.user.len() + 1
    }

    /// Never empty, help is always present
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Command at `index`
    pub fn get(&self, index: usize) -> Option<&'a CommandInfo> {
        match index {
            0 => Some(&HELP_INFO),
            i => self.user.get(i - 1),
        }
    }

    /// Iterate in registration order
    pub fn iter(&self) -> impl Iterator<Item = &'a CommandInfo> + 'a {
        core::iter::once(&HELP_INFO).chain(self.user.iter())
    }
}

/// Everything a handler sees for one invocation
pub struct CommandContext<'a> {
    /// Raw input line, name included
    pub line: &'a str,
    /// Output for this segment, cleared before the call
    pub out: &'a mut OutputBuffer,
    /// Registered commands
    pub commands: Commands<'a>,
}

impl<'a> CommandContext<'a> {
    /// Parameter by 1-based index
    pub fn param(&self, index: usize) -> Option<&'a str> {
        super::parser::parameter(self.line, index)
    }

    /// Number of parameters after the name
    pub fn param_count(&self) -> usize {
        super::parser::parameter_count(self.line)
    }
}

/// A command implementation.
///
/// Returns `true` while more output segments are pending: the dispatcher then
/// calls the same handler again on the next line, whatever its text.
pub trait CommandHandler: Send {
    fn invoke(&mut self, ctx: &mut CommandContext<'_>) -> bool;
}

impl<F> CommandHandler for F
where
    F: FnMut(&mut CommandContext<'_>) -> bool + Send,
{
    fn invoke(&mut self, ctx: &mut CommandContext<'_>) -> bool {
        self(ctx)
    }
}

/// A command to register
pub struct CommandDefinition {
    pub info: CommandInfo,
    pub handler: Box<dyn CommandHandler>,
}

impl CommandDefinition {
    /// Create a definition; validation happens at registration.
    pub fn new<H>(name: &'static str, help: &'static str, arity: Arity, handler: H) -> Self
    where
        H: CommandHandler + 'static,
    {
        Self {
            info: CommandInfo { name, help, arity },
            handler: Box::new(handler),
        }
    }

    /// Same as [`new`](Self::new), with closure signature inference.
    pub fn from_fn<F>(name: &'static str, help: &'static str, arity: Arity, f: F) -> Self
    where
        F: FnMut(&mut CommandContext<'_>) -> bool + Send + 'static,
    {
        Self::new(name, help, arity, f)
    }

    /// Name of the command
    pub fn name(&self) -> &'static str {
        self.info.name
    }
}

impl core::fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

/// Built-in help: one help text per invocation.
///
/// Keeps its own cursor so a listing can span several calls.
#[derive(Debug, Default)]
pub struct HelpCommand {
    cursor: Option<usize>,
}

impl HelpCommand {
    pub const fn new() -> Self {
        Self { cursor: None }
    }
}

impl CommandHandler for HelpCommand {
    fn invoke(&mut self, ctx: &mut CommandContext<'_>) -> bool {
        let pos = self.cursor.unwrap_or(0);

        if let Some(info) = ctx.commands.get(pos) {
            ctx.out.push_str(info.help);
        }

        let next = pos + 1;
        if next < ctx.commands.len() {
            self.cursor = Some(next);
            true
        } else {
            // Past the tail, next listing starts over
            self.cursor = None;
            false
        }
    }
}
