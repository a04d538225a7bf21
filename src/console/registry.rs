//! Command registry - append-only, ordered, help always first.

use alloc::boxed::Box;
use alloc::vec::Vec;

use super::commands::{
    CommandContext, CommandDefinition, CommandHandler, CommandInfo, Commands, HelpCommand,
};
use super::output::OutputBuffer;
use super::ConsoleError;

/// Registered commands.
///
/// Metadata and handlers live in parallel vectors so a running handler can
/// read every command's metadata. Entries are never removed or reordered.
pub struct Registry {
    help: HelpCommand,
    infos: Vec<CommandInfo>,
    handlers: Vec<Box<dyn CommandHandler>>,
}

impl Registry {
    /// Registry holding only the help command
    pub const fn new() -> Self {
        Self {
            help: HelpCommand::new(),
            infos: Vec::new(),
            handlers: Vec::new(),
        }
    }

    /// Append a command at the tail.
    ///
    /// Duplicate names are kept; lookups resolve to the first one. The
    /// duplicate warning scans the registry and only runs in debug builds,
    /// so release builds append in constant time.
    pub fn register(&mut self, def: CommandDefinition) -> Result<(), ConsoleError> {
        let name = def.info.name;
        if name.is_empty() || name.bytes().any(|b| b.is_ascii_whitespace()) {
            return Err(ConsoleError::InvalidName);
        }

        self.infos
            .try_reserve(1)
            .map_err(|_| ConsoleError::OutOfMemory)?;
        self.handlers
            .try_reserve(1)
            .map_err(|_| ConsoleError::OutOfMemory)?;

        if cfg!(debug_assertions) && self.commands().iter().any(|c| c.name == name) {
            log::warn!("command '{}' registered twice, first one wins", name);
        }

        self.infos.push(def.info);
        self.handlers.push(def.handler);
        log::info!("registered command '{}' ({:?})", name, def.info.arity);
        Ok(())
    }

    /// Index of the first command whose name ends exactly at a space or at
    /// the end of `line`.
    pub fn find(&self, line: &str) -> Option<usize> {
        self.commands().iter().position(|c| matches_name(line, c.name))
    }

    /// Metadata view, help first
    pub fn commands(&self) -> Commands<'_> {
        Commands { user: &self.infos }
    }

    /// Metadata of the command at `index`
    pub fn get(&self, index: usize) -> Option<&CommandInfo> {
        self.commands().get(index)
    }

    /// Number of commands, help included
    pub fn len(&self) -> usize {
        self.infos.len() + 1
    }

    /// Never empty
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Run the handler at `index` and return its continuation flag.
    ///
    /// An index past the tail returns `false` without writing.
    pub(crate) fn invoke(&mut self, index: usize, line: &str, out: &mut OutputBuffer) -> bool {
        let mut ctx = CommandContext {
            line,
            out,
            commands: Commands { user: &self.infos },
        };

        match index {
            0 => self.help.invoke(&mut ctx),
            i => match self.handlers.get_mut(i - 1) {
                Some(handler) => handler.invoke(&mut ctx),
                None => false,
            },
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Boundary match: `line` starts with `name` followed by a space or nothing.
pub fn matches_name(line: &str, name: &str) -> bool {
    line.starts_with(name) && matches!(line.as_bytes().get(name.len()), None | Some(b' '))
}
