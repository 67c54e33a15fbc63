use clap::{Parser, Subcommand};

/// Command-line interface definition for punchtrack
/// CLI application to track punch-in/punch-out work sessions with SQLite
#[derive(Parser)]
#[command(
    name = "punchtrack",
    version = env!("CARGO_PKG_VERSION"),
    about = "Punch-clock time tracker: sessions, breaks, overtime and early-going over SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or check)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Begin the workday and punch in
    Start {
        /// Entry time (HH:MM); defaults to now
        #[arg(long = "at", help = "Entry time (HH:MM), defaults to now")]
        at: Option<String>,

        /// Work target for the day, e.g. "8h" or "7h30m"
        #[arg(long = "work", help = "Work target for the day (e.g. 8h, 7h30m)")]
        work: Option<String>,

        /// Break budget in minutes
        #[arg(long = "break", help = "Break budget in minutes")]
        break_minutes: Option<i64>,
    },

    /// Toggle between working and on-break
    Punch,

    /// Close any open session and return the timer to idle
    Reset,

    /// Show the live timer state
    Status,

    /// Keep the snapshot synced and report state on an interval
    Watch {
        #[arg(long, help = "Refresh interval in seconds (overrides config)")]
        interval: Option<u64>,

        #[arg(long, help = "Number of ticks to run (default: run until interrupted)")]
        ticks: Option<u64>,
    },

    /// Show the detailed timeline for one day
    Day {
        /// Date (YYYY-MM-DD); defaults to today
        date: Option<String>,
    },

    /// List day summaries for a period
    List {
        #[arg(
            long,
            short,
            help = "Period: YYYY-MM-DD, YYYY-MM, YYYY or START..END (default: current month)"
        )]
        period: Option<String>,

        #[arg(long = "today", help = "Show only today")]
        now: bool,
    },

    /// Add a completed session manually
    Add {
        /// Date of the session (YYYY-MM-DD)
        date: String,

        /// Punch-in time (HH:MM)
        #[arg(long = "in", help = "Punch-in time (HH:MM)")]
        start: String,

        /// Punch-out time (HH:MM)
        #[arg(long = "out", help = "Punch-out time (HH:MM)")]
        end: String,
    },

    /// Edit an existing session's times
    Edit {
        /// Worklog id to edit
        id: i64,

        /// New punch-in time (HH:MM)
        #[arg(long = "in", help = "New punch-in time (HH:MM)")]
        start: String,

        /// New punch-out time (HH:MM); omit to keep an active session open
        #[arg(long = "out", help = "New punch-out time (HH:MM)")]
        end: Option<String>,
    },

    /// Delete a session or merge away a break
    Delete {
        #[command(subcommand)]
        target: DeleteTarget,
    },

    /// Manage company holidays
    Holiday {
        #[command(subcommand)]
        action: HolidayAction,
    },

    /// Print rows from the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long, help = "Maximum number of rows to show", default_value = "50")]
        limit: usize,
    },

    /// Export day summaries
    Export {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Output format: csv or json (default: from file extension)")]
        format: Option<String>,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Period: YYYY-MM-DD, YYYY-MM, YYYY or START..END (default: current month)"
        )]
        range: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite the output file if it exists")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum DeleteTarget {
    /// Delete one work session by id
    Work {
        id: i64,

        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// Merge the break between two sessions into one continuous session
    Break {
        /// Id of the session before the break
        previous: i64,

        /// Id of the session after the break
        next: i64,

        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum HolidayAction {
    /// Add a holiday
    Add {
        /// Date (YYYY-MM-DD)
        date: String,

        /// Display name
        name: String,

        #[arg(
            long,
            help = "Duration in minutes for a partial holiday (omit for full day)"
        )]
        minutes: Option<i64>,
    },

    /// List holidays in a period
    List {
        #[arg(long, short, help = "Period: YYYY-MM-DD, YYYY-MM, YYYY or START..END")]
        period: Option<String>,
    },

    /// Remove a holiday by id
    Remove { id: i64 },
}
