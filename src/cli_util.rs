use std::io::{self, Write};

use crate::ExecutionError;

/// Print an execution error with the failing instruction marked by a caret.
/// If `program` is `Some("bf")`, messages are prefixed with "bf: ...".
pub fn print_execution_error(program: Option<&str>, code: &str, err: &ExecutionError) {
    let msg = describe(err);
    let msg = match program {
        Some(p) => format!("{p}: {msg}"),
        None => msg,
    };
    print_error_with_context(&msg, code, err.ip());
}

/// One-line message for `err`, without the instruction position.
pub fn describe(err: &ExecutionError) -> String {
    match err {
        ExecutionError::EmptyLoop { .. } => "Parse error: empty loop '[]'".to_string(),
        ExecutionError::OutOfBounds { ptr, .. } => {
            format!("Runtime error: program overflowed its memory (ptr={ptr})")
        }
        ExecutionError::UnmatchedOpenBracket { count, .. } => {
            let s = if *count == 1 { "" } else { "s" };
            format!("Parse error: {count} unmatched '[' bracket{s}")
        }
        ExecutionError::UnmatchedCloseBracket { .. } => {
            "Parse error: unmatched ']' bracket, missing '['".to_string()
        }
        ExecutionError::Io { source, .. } => format!("I/O error: {source}"),
    }
}

/// Print a concise error with instruction index and a caret context window,
/// working with UTF-8 by slicing using char indices.
pub fn print_error_with_context(prefix: &str, code: &str, pos: usize) {
    let mut stderr = io::stderr().lock();
    let _ = write_error_with_context(&mut stderr, prefix, code, pos);
    let _ = stderr.flush();
}

/// Same as [`print_error_with_context`], into any writer.
pub fn write_error_with_context<W: Write>(
    out: &mut W,
    prefix: &str,
    code: &str,
    pos: usize,
) -> io::Result<()> {
    writeln!(out, "{prefix} at instruction {pos}")?;

    // Show a short window around the position for context
    const WINDOW_CHARS: usize = 32;

    let total_chars = code.chars().count();
    if total_chars == 0 {
        return Ok(());
    }
    let start_char = pos.saturating_sub(WINDOW_CHARS);
    let end_char = (pos + WINDOW_CHARS + 1).min(total_chars);

    // Line breaks would push the caret out of place.
    let window: String = code
        .chars()
        .skip(start_char)
        .take(end_char.saturating_sub(start_char))
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    writeln!(out, "  {window}")?;

    let caret_offset = pos.saturating_sub(start_char);
    writeln!(out, "  {}^", " ".repeat(caret_offset))
}
