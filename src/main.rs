mod cli;
mod core;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "azcost", about = "Azure subscription cost reporting CLI", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and report costs for all subscriptions (default)
    Report {
        /// Number of days to look back, ending yesterday; prompts when omitted
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        days: Option<u32>,
    },
    /// Fetch a single day's cost breakdown for one subscription
    Day {
        /// Subscription name (main|prod|dev|test)
        subscription: String,
        /// Date to query, YYYY-MM-DD
        date: String,
    },
    /// Validate environment configuration without any network call
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let opts = cli::output::OutputOptions {
        use_color: cli::output::detect_color(!cli.no_color),
        verbose: cli.verbose,
    };

    match cli.command {
        None | Some(Commands::Report { .. }) => {
            let days = match cli.command {
                Some(Commands::Report { days }) => days,
                _ => None,
            };
            cli::report_cmd::run(days, &opts).await?;
        }
        Some(Commands::Day { subscription, date }) => {
            cli::report_cmd::run_day(&subscription, &date, &opts).await?;
        }
        Some(Commands::Check) => cli::config_cmd::check(&opts)?,
    }

    Ok(())
}
