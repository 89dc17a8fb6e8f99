use clap::{Parser, Subcommand, ValueEnum};
use index_file::IndexFile;
use intervix_index::{LookupError, SliceKey, StrategyChoice, logging};
use intervix_types::{Closed, Interval};
use output::{print_error, write_info, write_positions};
use std::io::{self, Write as _};
use std::path::PathBuf;
use std::process;

mod index_file;
mod output;

/// Look up positions in an interval index described in a TOML file.
///
/// Positions are printed one per line. Exits with status 1 if the key
/// isn't in the index and 2 if the index file or the request is invalid.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file describing the index
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Override the lookup strategy of the index file
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Positions of the intervals containing a value
    Scalar {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Positions of the intervals equal to, or else overlapping, an interval
    Interval {
        #[arg(allow_negative_numbers = true)]
        low: f64,
        #[arg(allow_negative_numbers = true)]
        high: f64,
        /// Closure of the interval; defaults to the closure of the index file
        #[arg(long)]
        closed: Option<Closed>,
    },
    /// Positions for each value, in order
    List {
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        values: Vec<f64>,
    },
    /// Positions between two labels, both included
    Slice {
        #[arg(long, allow_negative_numbers = true)]
        start: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        stop: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        step: Option<i64>,
    },
    /// Print the size and flags of the index
    Info,
}

#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
enum StrategyArg {
    /// Binary search unless intervals overlap
    Auto,
    /// Always scan
    Scan,
}

impl From<StrategyArg> for StrategyChoice {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => StrategyChoice::Auto,
            StrategyArg::Scan => StrategyChoice::Scan,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_with_info_modules(&["intervix"]);

    let status = match execute(&cli) {
        Ok(()) => 0,
        Err(err) => {
            print_error(format!("{err:#}"));

            exit_status(&err)
        }
    };
    process::exit(status);
}

/// 1 for keys missing from the index, 2 for anything else.
fn exit_status(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<LookupError>() {
        Some(err) if err.is_key_error() => 1,
        _ => 2,
    }
}

fn execute(cli: &Cli) -> anyhow::Result<()> {
    let file = IndexFile::read(&cli.file)?;
    let config = match cli.strategy {
        Some(strategy) => file.config().with_strategy(strategy.into()),
        None => file.config(),
    };
    let index = file.build(&config)?;
    log::info!(
        "Loaded {} intervals from {}",
        index.len(),
        cli.file.display()
    );

    let mut out = io::stdout().lock();
    match &cli.command {
        Commands::Scalar { value } => {
            write_positions(&mut out, &index.locate(*value)?)?;
        }
        Commands::Interval { low, high, closed } => {
            let interval = Interval::new(*low, *high, closed.unwrap_or(config.closed))?;
            write_positions(&mut out, &index.locate(interval)?)?;
        }
        Commands::List { values } => {
            write_positions(&mut out, &index.locate(values.clone())?)?;
        }
        Commands::Slice { start, stop, step } => {
            let slice = SliceKey::between(*start, *stop);
            let slice = match step {
                Some(step) => slice.with_step(*step),
                None => slice,
            };
            write_positions(&mut out, &index.locate(slice)?)?;
        }
        Commands::Info => {
            write_info(&mut out, &index)?;
        }
    }
    out.flush()?;

    Ok(())
}
