use clap::Parser;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tape_bf::cli_util::print_execution_error;
use tape_bf::config::{self, LimitOverrides};
use tape_bf::Interpreter;

/// Run a Brainfuck program.
///
/// `,` reads bytes from INPUT (or stdin). Carriage returns are skipped and
/// end of input reads as 0. `.` writes raw bytes to OUTPUT (or stdout).
#[derive(Parser, Debug)]
#[command(name = "bf", version)]
struct Cli {
    /// Brainfuck source file; characters other than ><+-.,[] are comments
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// File consumed by `,` (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// File written by `.` (defaults to stdout)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Cells allocated on first use (fallback BF_SMALL_CELLS, bf.toml; default 100)
    #[arg(long = "small-cells", value_name = "N")]
    small_cells: Option<usize>,

    /// Maximum tape size in cells (fallback BF_MAX_CELLS, bf.toml; default 30000)
    #[arg(long = "max-cells", value_name = "N")]
    max_cells: Option<usize>,
}

fn run(program: &str, cli: Cli) -> i32 {
    let limits = match config::resolve_limits(LimitOverrides {
        small: cli.small_cells,
        max: cli.max_cells,
    }) {
        Ok(limits) => limits,
        Err(e) => {
            eprintln!("{program}: {e}");
            return 2;
        }
    };

    let code = match read_source(&cli.source) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{program}: cannot read source file {}: {e}", cli.source.display());
            return 1;
        }
    };

    let input: Box<dyn Read> = match &cli.input {
        Some(path) => match File::open(path) {
            Ok(f) => Box::new(BufReader::new(f)),
            Err(e) => {
                eprintln!("{program}: cannot open input file {}: {e}", path.display());
                return 1;
            }
        },
        None => Box::new(io::stdin().lock()),
    };

    let output: Box<dyn Write> = match &cli.output {
        Some(path) => match File::create(path) {
            Ok(f) => Box::new(BufWriter::new(f)),
            Err(e) => {
                eprintln!("{program}: cannot open output file {}: {e}", path.display());
                return 1;
            }
        },
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    log::info!("running {}", cli.source.display());
    let bf = Interpreter::with_limits(code, limits);
    if let Err(err) = bf.run(input, output) {
        print_execution_error(Some(program), bf.code(), &err);
        return 1;
    }
    0
}

/// Load program text. Lines are joined without their terminators.
fn read_source(path: &Path) -> io::Result<String> {
    let content = fs::read_to_string(path)?;
    Ok(content.lines().collect())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let program = std::env::args().next().unwrap_or_else(|| String::from("bf"));
    let program = Path::new(&program)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("bf")
        .to_string();

    let cli = Cli::parse();
    let code = run(&program, cli);
    let _ = io::stderr().flush();
    std::process::exit(code);
}
