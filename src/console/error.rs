//! Console error types

/// Text written to the output buffer when no command matches.
pub const NOT_RECOGNISED_MSG: &str =
    "Command not recognised.  Enter 'help' to view a list of available commands.\r\n\r\n";

/// Text written to the output buffer when the parameter count is wrong.
pub const INCORRECT_PARAMS_MSG: &str =
    "Incorrect command parameter(s).  Enter \"help\" to view a list of available commands.\r\n\r\n";

/// Console error with code and message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// E01: No registered name matches the input
    UnknownCommand,
    /// E02: Parameter count differs from the command's arity
    IncorrectParams,
    /// E03: Command name is empty or contains whitespace
    InvalidName,
    /// E04: Expected parameter count below -1
    InvalidArity,
    /// E05: Registry storage could not grow
    OutOfMemory,
    /// E06: Transport read or write failed
    Transport,
    /// E07: Input line longer than the line buffer
    LineTooLong,
}

impl ConsoleError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "E01",
            Self::IncorrectParams => "E02",
            Self::InvalidName => "E03",
            Self::InvalidArity => "E04",
            Self::OutOfMemory => "E05",
            Self::Transport => "E06",
            Self::LineTooLong => "E07",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "unknown command",
            Self::IncorrectParams => "incorrect parameters",
            Self::InvalidName => "invalid command name",
            Self::InvalidArity => "invalid parameter count",
            Self::OutOfMemory => "out of memory",
            Self::Transport => "transport error",
            Self::LineTooLong => "line too long",
        }
    }

    /// Text the dispatcher leaves in the output buffer, if any.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::UnknownCommand => Some(NOT_RECOGNISED_MSG),
            Self::IncorrectParams => Some(INCORRECT_PARAMS_MSG),
            _ => None,
        }
    }
}

impl core::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}
