use std::io::{self, BufRead, IsTerminal};

use clap::Parser;
use thiserror::Error;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use iiccrc::crc::DEFAULT_INITIAL;
use iiccrc::row::{CommandTable, DEFAULT_COMMAND, initial_or_default, parse_initial};

const EXIT_SUCCESS: i32 = 0;
const EXIT_CLI: i32 = 2;
const EXIT_DECODE: i32 = 3;
const EXIT_IO: i32 = 4;

#[derive(Parser, Debug)]
#[command(
    name = "iiccrc",
    version,
    about = "CRC16-CCITT (reflected 0x8408) calculator for IIC commands"
)]
struct Args {
    /// Hex commands, one row each (e.g. "34 1E 08 AC 0D").
    /// Read line by line from stdin when omitted.
    #[arg(value_name = "COMMAND")]
    commands: Vec<String>,

    /// Initial register value in hex. Falls back to FFFF if unparsable.
    #[arg(
        long = "init",
        value_name = "HEX",
        env = "IICCRC_INIT",
        default_value = "FFFF"
    )]
    initial: String,

    /// Print only the result column.
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("{0} of {1} rows failed to decode")]
    Decode(usize, usize),
}

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    init_tracing();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() { EXIT_CLI } else { EXIT_SUCCESS };
        }
    };

    match calculate(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            error!(error = %err, "calculation failed");
            map_exit_code(&err)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn map_exit_code(err: &CliError) -> i32 {
    match err {
        CliError::Io(_) => EXIT_IO,
        CliError::Decode(..) => EXIT_DECODE,
    }
}

fn calculate(args: Args) -> Result<(), CliError> {
    if parse_initial(&args.initial).is_none() {
        warn!(
            value = %args.initial,
            "invalid initial value, using {DEFAULT_INITIAL:04X}"
        );
    }
    let initial = initial_or_default(&args.initial);

    let inputs = if args.commands.is_empty() {
        read_stdin_rows()?
    } else {
        args.commands
    };
    info!(rows = inputs.len(), initial, "calculating CRC16");

    let table = CommandTable::from_inputs(inputs, initial);
    let results = table.calculate();

    for (index, (row, result)) in table.rows().iter().zip(&results).enumerate() {
        if args.quiet {
            println!("{result}");
        } else {
            println!("IIC command #{index} 0x: {}  CRC16: {result}", row.input.trim());
        }
    }

    let failed = results.iter().filter(|r| r.is_error()).count();
    if failed > 0 {
        return Err(CliError::Decode(failed, results.len()));
    }
    Ok(())
}

// One row per line; an interactive or empty stdin yields the default command.
fn read_stdin_rows() -> io::Result<Vec<String>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(vec![DEFAULT_COMMAND.to_string()]);
    }

    let rows = stdin.lock().lines().collect::<io::Result<Vec<_>>>()?;
    if rows.is_empty() {
        return Ok(vec![DEFAULT_COMMAND.to_string()]);
    }
    Ok(rows)
}
