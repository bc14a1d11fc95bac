//! A small Brainfuck interpreter.
//!
//! Programs run against a tape of byte cells that is allocated lazily: a small
//! block (100 cells by default) on first use, grown once to the full capacity
//! (30,000 cells by default) when a cell past the block is touched.
//!
//! Behaviors:
//! - Cells wrap modulo 256 in both directions.
//! - Moving the pointer never fails; touching a cell outside of the tape does.
//! - `,` skips carriage returns and reads 0 once input is exhausted.
//! - `.` writes the current cell as a raw byte.
//! - `[]` is rejected as an empty loop; unbalanced brackets are reported when
//!   execution reaches them.
//! - Every other character is a comment.
//!
//! Quick start:
//!
//! ```
//! let code = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.";
//! let mut out = Vec::new();
//! tape_bf::run(code, std::io::empty(), &mut out).expect("program should run");
//! assert_eq!(out, b"Hello World!\n");
//! ```

mod byte_io;
pub mod cli_util;
pub mod config;
mod error;
mod interpreter;
mod tape;

pub use byte_io::ByteIo;
pub use error::{ConfigError, ExecutionError, TapeError};
pub use interpreter::{find_matching_close, run, Interpreter};
pub use tape::{Tape, TapeLimits, DEFAULT_MAX_CELLS, DEFAULT_SMALL_CELLS};
