use crate::quote::{run_domestic_quote, run_options, run_overseas_quote, DomesticArgs, OverseasArgs};
use crate::server;
use capquote::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "capquote",
    about = "Price custom hat orders and serve the quote API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Price a single order and print the break table
    Quote {
        #[command(subcommand)]
        command: QuoteCommand,
    },
    /// Print the selectable styles, hat types, and decorations as JSON
    Options(RateCardArgs),
}

#[derive(Subcommand, Debug)]
enum QuoteCommand {
    /// Domestic quote from a stock style
    Domestic(DomesticArgs),
    /// Overseas quote from a hat type
    Overseas(OverseasArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) rates: RateCardArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RateCardArgs {
    /// JSON rate card to price against instead of the configured one
    #[arg(long)]
    pub(crate) rate_card: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quote {
            command: QuoteCommand::Domestic(args),
        } => run_domestic_quote(args),
        Command::Quote {
            command: QuoteCommand::Overseas(args),
        } => run_overseas_quote(args),
        Command::Options(args) => run_options(args),
    }
}
