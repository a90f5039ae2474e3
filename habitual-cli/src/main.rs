mod commands;
mod parse;
mod render;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use habitual_core::Theme;
use session::Session;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "habitual")]
#[command(about = "Track your habits, browse the calendar and theme your profile")]
struct Cli {
    /// Theme for this run (light, dark, ocean, sunset)
    #[arg(long, global = true)]
    theme: Option<Theme>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List today's habits
    Habits {
        /// Mark a habit done/undone by id prefix before listing
        #[arg(long)]
        toggle: Option<String>,
    },
    /// Add a habit and export it to your calendar
    Add {
        title: Option<String>,

        /// Day of the habit (e.g. "tomorrow", "fri", "2026-03-20")
        #[arg(long)]
        on: Option<String>,

        /// Time of day (e.g. "7:30", "6pm")
        #[arg(long)]
        at: Option<String>,

        /// Length of the calendar event (e.g. "30m", "1h")
        #[arg(short, long)]
        duration: Option<String>,

        /// Only add the habit, don't write a calendar event
        #[arg(long)]
        no_export: bool,
    },
    /// Progress, weekly overview and suggested goal
    Dashboard,
    /// Month view with the habits of the selected day
    Calendar {
        /// Month to show (YYYY-MM), defaults to the selected day's month
        #[arg(short, long)]
        month: Option<String>,

        /// First column: 1 (Sunday) to 7 (Saturday), or a weekday name
        #[arg(long)]
        first_weekday: Option<String>,

        /// Selected day (defaults to today)
        #[arg(short, long)]
        select: Option<String>,
    },
    /// Show themes, or switch to one
    Theme {
        name: Option<Theme>,

        /// Remember the theme in the config file
        #[arg(long, requires = "name")]
        save: bool,
    },
    /// Show or edit your profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },
    /// Show config and export paths
    Config,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Edit profile fields; prompts for each field when none are given
    Edit(commands::profile::EditArgs),
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let session = Session::start(cli.theme)?;

    match cli.command {
        Commands::Habits { toggle } => commands::habits::run(session, toggle.as_deref()),
        Commands::Add {
            title,
            on,
            at,
            duration,
            no_export,
        } => commands::add::run(
            session,
            commands::add::AddArgs {
                title,
                on,
                at,
                duration,
                export: !no_export,
            },
        ),
        Commands::Dashboard => commands::dashboard::run(&session),
        Commands::Calendar {
            month,
            first_weekday,
            select,
        } => commands::calendar::run(
            &session,
            month.as_deref(),
            first_weekday.as_deref(),
            select.as_deref(),
        ),
        Commands::Theme { name, save } => commands::theme::run(session, name, save),
        Commands::Profile { action } => match action {
            None => commands::profile::show(&session),
            Some(ProfileAction::Edit(args)) => commands::profile::edit(&session, args),
        },
        Commands::Config => commands::config::run(&session),
    }
}

/// Logs go to stderr, filtered by HABITUAL_LOG (default: warn).
fn init_logging() {
    let filter = EnvFilter::try_from_env("HABITUAL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
