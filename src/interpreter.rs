//! Instruction dispatch.
//!
//! Loops are resolved while running: entering a loop pushes the position of
//! its `[`, a `]` jumps back to the top of that stack, and a `[` over a zero
//! cell scans forward for its partner.

use std::io::{self, Read, Write};

use crate::byte_io::ByteIo;
use crate::error::{ExecutionError, TapeError};
use crate::tape::{Tape, TapeLimits};

/// A Brainfuck program ready to be run against any pair of byte channels.
pub struct Interpreter {
    code: String,
    limits: TapeLimits,
}

impl Interpreter {
    /// Create an interpreter with the default tape (100-cell block, 30,000 cells max).
    pub fn new(code: String) -> Self {
        Self::with_limits(code, TapeLimits::default())
    }

    pub fn with_limits(code: String, limits: TapeLimits) -> Self {
        Self { code, limits }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Execute the program until it halts.
    ///
    /// `,` reads from `input`, `.` writes to `output`. Output is flushed when
    /// the program ends normally; on error it is left as is.
    pub fn run<R: Read, W: Write>(&self, input: R, output: W) -> Result<(), ExecutionError> {
        self.execute(input, output).map(|_| ())
    }

    fn execute<R: Read, W: Write>(&self, input: R, output: W) -> Result<Context, ExecutionError> {
        let code: Vec<char> = self.code.chars().collect();
        let mut io = ByteIo::new(input, output);
        let mut ctx = Context::new(self.limits);

        log::debug!(
            "run: {} chars, tape {}/{} cells",
            code.len(),
            self.limits.small(),
            self.limits.max()
        );

        while ctx.pc < code.len() {
            ctx.step(&code, &mut io)?;
        }

        if let Some(&innermost) = ctx.open_loops.last() {
            return Err(ExecutionError::UnmatchedOpenBracket {
                ip: innermost,
                count: ctx.open_loops.len(),
            });
        }

        io.flush().map_err(|source| ExecutionError::Io {
            ip: code.len(),
            source,
        })?;
        log::debug!("run: halted, {} cells allocated", ctx.tape.allocated());
        Ok(ctx)
    }
}

/// Run `program` on a default tape.
pub fn run<R: Read, W: Write>(program: &str, input: R, output: W) -> Result<(), ExecutionError> {
    Interpreter::new(program.to_string()).run(input, output)
}

/// Mutable state of one execution.
struct Context {
    tape: Tape,
    /// Index of the next char to interpret.
    pc: usize,
    /// Positions of the `[` of every loop currently being executed.
    open_loops: Vec<usize>,
}

impl Context {
    fn new(limits: TapeLimits) -> Self {
        Self {
            tape: Tape::new(limits),
            pc: 0,
            open_loops: Vec::new(),
        }
    }

    /// Interpret the char at `pc` and move `pc` to the next one to run.
    fn step<R: Read, W: Write>(
        &mut self,
        code: &[char],
        io: &mut ByteIo<R, W>,
    ) -> Result<(), ExecutionError> {
        let ip = self.pc;
        let cursor = self.tape.cursor;
        let oob = |err: TapeError| ExecutionError::OutOfBounds { ip, ptr: err.index };
        let io_err = |source: io::Error| ExecutionError::Io { ip, source };

        match code[ip] {
            '>' => self.tape.cursor += 1,
            '<' => self.tape.cursor -= 1,
            '+' => {
                self.tape.increment(cursor).map_err(oob)?;
            }
            '-' => {
                self.tape.decrement(cursor).map_err(oob)?;
            }
            '.' => {
                let value = self.tape.get(cursor).map_err(oob)?;
                io.write_byte(value).map_err(io_err)?;
            }
            ',' => {
                self.tape.ensure_allocated(cursor).map_err(oob)?;
                let value = io.read_byte().map_err(io_err)?;
                self.tape.set(cursor, value).map_err(oob)?;
            }
            '[' => {
                if code.get(ip + 1) == Some(&']') {
                    return Err(ExecutionError::EmptyLoop { ip });
                }
                if self.tape.get(cursor).map_err(oob)? == 0 {
                    let open_loops = self.open_loops.len();
                    let close = find_matching_close(code, ip).map_err(|depth| {
                        ExecutionError::UnmatchedOpenBracket {
                            ip,
                            count: depth + open_loops,
                        }
                    })?;
                    log::trace!("skip loop {ip}..={close}");
                    self.pc = close + 1;
                    return Ok(());
                }
                self.open_loops.push(ip);
            }
            ']' => {
                let Some(&open) = self.open_loops.last() else {
                    return Err(ExecutionError::UnmatchedCloseBracket { ip });
                };
                if self.tape.get(cursor).map_err(oob)? != 0 {
                    log::trace!("repeat loop {open}..={ip}");
                    self.pc = open + 1;
                    return Ok(());
                }
                self.open_loops.pop();
            }
            _ => {}
        }

        self.pc += 1;
        Ok(())
    }
}

/// Find the `]` closing the `[` at `open`.
///
/// On failure returns how many brackets opened at or after `open` were still
/// open when the code ran out.
pub fn find_matching_close(code: &[char], open: usize) -> Result<usize, usize> {
    let mut depth = 1usize;
    for (i, &c) in code.iter().enumerate().skip(open + 1) {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
    }
    Err(depth)
}
