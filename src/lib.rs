//! # serial-console
//!
//! Embedded command-line interpreter for a serial console.
//!
//! ## Architecture
//!
//! ```text
//! Transport ──▶ Console ──▶ Interpreter ──▶ Registry ──▶ handler
//!    ▲            (line)     (idle/streaming)              │
//!    └──────────── OutputBuffer (one per process) ◀────────┘
//! ```
//!
//! - Commands are matched by exact name boundary, first registered wins
//! - Parameter count is checked before the handler runs
//! - A handler returning `true` is called again for its next output segment

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod console;
pub mod transport;

pub use console::{
    Arity, CommandContext, CommandDefinition, CommandHandler, Console, ConsoleError,
    Interpreter, OutputBuffer,
};
pub use transport::{CliPort, Transport};
