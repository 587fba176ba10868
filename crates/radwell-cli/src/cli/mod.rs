mod commands;

use clap::Parser;
use radwell_core::SolverError;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().collect();
    match run(args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("radwell-rs: {error}");
            error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    match Cli::try_parse_from(&args) {
        Ok(cli) => dispatch(cli.command),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "radwell-rs",
    about = "Bound states and phase shifts for central nuclear wells"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Solve one (l, n) bound state of a Woods-Saxon well
    Bound(commands::BoundArgs),
    /// Tabulate elastic phase shifts over an energy range
    Phase(commands::PhaseArgs),
    /// Overlap integral of two bound-state JSON artifacts
    Overlap(commands::OverlapArgs),
}

fn dispatch(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Bound(args) => commands::run_bound_command(args),
        CliCommand::Phase(args) => commands::run_phase_command(args),
        CliCommand::Overlap(args) => commands::run_overlap_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(#[from] SolverError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            Self::Compute(_) => 3,
            Self::Internal(_) => 4,
        }
    }
}
