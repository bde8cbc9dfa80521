use crate::report::{
    run_assess, run_company_list, run_company_summary, run_compare, run_sales_targets, AssessArgs,
    CompanyListArgs, CompareArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use quota_levy::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Quota Levy",
    about = "Estimate disability employment levies and serve the sales dashboard API",
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
    /// Assess the levy owed by one workforce
    Assess(AssessArgs),
    /// Compare the current levy against hiring through the placement service
    Compare(CompareArgs),
    /// Inspect the company registry
    Companies {
        #[command(subcommand)]
        command: CompaniesCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CompaniesCommand {
    /// List companies matching the given filters
    List(CompanyListArgs),
    /// Print registry-wide totals and per-priority counts
    Summary,
    /// List open sales targets ordered by priority
    Targets {
        /// Maximum number of targets to print
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Persist manual companies to this JSON file
    #[arg(long)]
    pub(crate) manual_store: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args),
        Command::Compare(args) => run_compare(args),
        Command::Companies {
            command: CompaniesCommand::List(args),
        } => run_company_list(args),
        Command::Companies {
            command: CompaniesCommand::Summary,
        } => run_company_summary(),
        Command::Companies {
            command: CompaniesCommand::Targets { limit },
        } => run_sales_targets(limit),
    }
}
