//! Module: config
//!
//! Purpose: Build-time configuration for the command interpreter.
//!
//! Architecture:
//! - build.rs forwards `CLI_OUTPUT_BUFFER_SIZE` and `CLI_LINE_SIZE` from the
//!   build environment as `rustc-env` values
//! - `parse_size` turns them into constants at compile time
//! - An empty, zero or malformed value falls back to the default
//!
//! Safety: All values are `const`, no runtime state.

/// Default capacity of the shared output buffer, in bytes.
pub const DEFAULT_OUTPUT_BUFFER_SIZE: usize = 256;

/// Default maximum console input line length, in bytes.
pub const DEFAULT_LINE_SIZE: usize = 128;

/// Capacity of the process-wide output buffer.
pub const OUTPUT_BUFFER_SIZE: usize = match option_env!("CLI_OUTPUT_BUFFER_SIZE") {
    Some(value) => parse_size(value, DEFAULT_OUTPUT_BUFFER_SIZE),
    None => DEFAULT_OUTPUT_BUFFER_SIZE,
};

/// Maximum console input line length.
pub const LINE_SIZE: usize = match option_env!("CLI_LINE_SIZE") {
    Some(value) => parse_size(value, DEFAULT_LINE_SIZE),
    None => DEFAULT_LINE_SIZE,
};

/// Bytes left in the output buffer at which a handler should stop writing.
pub const GUARD_MARGIN: usize = 50;

/// Parse a decimal size at compile time.
///
/// Returns `default` for empty input, any non-digit byte, overflow or zero.
pub const fn parse_size(value: &str, default: usize) -> usize {
    let bytes = value.as_bytes();
    if bytes.is_empty() {
        return default;
    }

    let mut result: usize = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if !b.is_ascii_digit() {
            return default;
        }
        result = match result.checked_mul(10) {
            Some(v) => match v.checked_add((b - b'0') as usize) {
                Some(v) => v,
                None => return default,
            },
            None => return default,
        };
        i += 1;
    }

    if result == 0 {
        default
    } else {
        result
    }
}
