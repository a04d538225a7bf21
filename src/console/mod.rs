//! Serial console command interpreter
//!
//! Registry of named commands, a dispatcher that streams multi-segment
//! output, and a line-editing session on top of a transport.
//! One shared fixed-size output buffer, no per-command allocation.

pub mod commands;
pub mod console;
pub mod error;
pub mod interpreter;
pub mod line_buffer;
pub mod output;
pub mod parser;
pub mod registry;

pub use commands::{
    Arity, CommandContext, CommandDefinition, CommandHandler, CommandInfo, Commands,
    HelpCommand, HELP_INFO,
};
pub use console::{Console, VERSION};
pub use error::ConsoleError;
pub use interpreter::{process_command, register_command, Interpreter, INTERPRETER};
pub use line_buffer::LineBuffer;
pub use output::{output_buffer, OutputBuffer, OUTPUT_BUFFER};
pub use parser::{get_parameter, parameter, parameter_count, parameters};
pub use registry::Registry;
