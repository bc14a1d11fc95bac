use std::borrow::Borrow;

/// Errors that abort a Brainfuck execution.
///
/// Every variant carries the instruction index (`ip`, counted in chars of the
/// source) at which the condition was detected.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    /// A `[` immediately followed by `]`; such a loop either never runs or never ends.
    #[error("empty loop at instruction {ip}")]
    EmptyLoop { ip: usize },

    /// The data pointer dereferenced a cell outside of the tape.
    #[error("program overflowed its memory (ptr={ptr}) at instruction {ip}")]
    OutOfBounds { ip: usize, ptr: isize },

    /// One or more `[` were never closed.
    #[error("{count} opened bracket{} at instruction {ip}", plural_suffix(.count))]
    UnmatchedOpenBracket { ip: usize, count: usize },

    /// A `]` was reached with no open loop.
    #[error("missing '[' at instruction {ip}")]
    UnmatchedCloseBracket { ip: usize },

    /// The input or output channel failed.
    #[error("I/O error at instruction {ip}: {source}")]
    Io {
        ip: usize,
        #[source]
        source: std::io::Error,
    },
}

impl ExecutionError {
    /// Instruction index the error was raised at.
    pub fn ip(&self) -> usize {
        match self {
            ExecutionError::EmptyLoop { ip }
            | ExecutionError::OutOfBounds { ip, .. }
            | ExecutionError::UnmatchedOpenBracket { ip, .. }
            | ExecutionError::UnmatchedCloseBracket { ip }
            | ExecutionError::Io { ip, .. } => *ip,
        }
    }
}

/// A tape access outside of `[0, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cell {index} is outside of the tape (capacity {capacity})")]
pub struct TapeError {
    pub index: isize,
    pub capacity: usize,
}

/// Rejected tape configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "invalid tape limits: small block {small} must not exceed maximum {max}, \
         and maximum must be at least 1"
    )]
    InvalidLimits { small: usize, max: usize },
}

fn plural_suffix(n: impl Borrow<usize>) -> &'static str {
    if *n.borrow() == 1 { "" } else { "s" }
}
