use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use booking_cli::app::{self, UpdateArgs};
use booking_cli::config::{AppConfig, Overrides};
use booking_cli::logging;
use booking_core::flow::{FlowContext, SimulatedSubmitter};
use booking_core::notifications::ScriptedNotificationFeed;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Fill in, price and submit an event quote request.
///
/// The draft is saved after every change, so the request can be completed
/// over several invocations.
#[derive(Debug, Parser)]
#[command(name = "booking", version, about)]
struct Cli {
    /// TOML config file; `booking.toml` is used if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Storage backend (`sqlite` or `memory`).
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Storage connection string, e.g. `sqlite:booking.db?mode=rwc`.
    #[arg(long, global = true)]
    db: Option<String>,

    /// Log level or filter directive; `RUST_LOG` takes precedence.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print notification badges, the saved draft, what is still missing, and
    /// the quote.
    Show,
    /// Change fields of the saved draft.
    Update(UpdateArgs),
    /// Check one step of the saved draft.
    Validate {
        /// Step number, 1 to 4.
        #[arg(long)]
        step: u8,
    },
    /// Print the itemized price estimate.
    Quote,
    /// Submit the completed draft.
    Submit,
    /// Delete the saved draft.
    Clear,
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging("warn");

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_overrides(Overrides {
        backend: cli.backend,
        db: cli.db,
        log_level: cli.log_level,
    });

    if !logging::env_filter_set() {
        logging::set_log_level(&config.logging.level)?;
    }
    if let Some(path) = &config.logging.file {
        logging::enable_file_logging(path)?;
    }
    debug!(?config, "effective configuration");

    let mut flow = app::open_flow(&config, FlowContext::default()).await?;

    let output = match cli.command {
        Command::Show => {
            let feed = ScriptedNotificationFeed::new(config.notifications.clone());
            app::run_show(&flow, &feed)
        }
        Command::Update(args) => {
            app::run_update(&mut flow, args, config.availability.as_ref()).await?
        }
        Command::Validate { step } => app::run_validate(&flow, step)?,
        Command::Quote => app::run_quote(&flow),
        Command::Submit => {
            let submitter = SimulatedSubmitter::new(config.submission.delay());
            app::run_submit(&mut flow, &submitter).await?
        }
        Command::Clear => app::run_clear(&mut flow).await?,
    };

    println!("{output}");
    Ok(())
}
