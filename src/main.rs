mod commands;
mod config;
mod logging;
mod render;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::commands::show::ShowArgs;
use crate::config::{Config, LogLevel};

#[derive(Parser)]
#[command(name = "diarycal")]
#[command(about = "Show the calendar kept in a plain-text diary in your Dropbox")]
struct Cli {
    /// Log level, overriding the config file
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the calendar
    Show {
        /// First date shown (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Number of weeks to cover
        #[arg(short, long, default_value_t = commands::DEFAULT_NUM_WEEKS)]
        num_weeks: u32,

        /// Show the full year
        #[arg(short = 'y', long)]
        show_year: bool,

        /// Fetch fresh data from Dropbox
        #[arg(short, long)]
        fresh_data: bool,
    },
    /// Show the configuration
    Config,
    /// Connect diarycal to your Dropbox account
    Auth,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    logging::init(cli.log_level.unwrap_or(config.log.level), config.log.format);

    match cli.command {
        Commands::Show {
            date,
            num_weeks,
            show_year,
            fresh_data,
        } => {
            let args = ShowArgs {
                date,
                num_weeks,
                full_year: show_year,
                fresh: fresh_data,
            };
            commands::show::run(&config, args).await
        }
        Commands::Config => commands::config::run(&config),
        Commands::Auth => commands::auth::run(&config).await,
    }
}
