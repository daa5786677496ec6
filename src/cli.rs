use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// NHL schedule query tool
///
/// Runs one query against the cached schedule dataset and prints the
/// result as JSON. Goes through the same authentication and rate-limit
/// pipeline as the hosted API; in non-production mode the built-in
/// development key is used when no key is given.
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// List today's games (UTC calendar day)
    #[arg(long, help_heading = "Queries")]
    pub today: bool,

    /// List yesterday's games (UTC calendar day)
    #[arg(long, help_heading = "Queries")]
    pub yesterday: bool,

    /// List games that have not gone final yet
    #[arg(short, long, help_heading = "Queries")]
    pub upcoming: bool,

    /// Start of a date range query, YYYY-MM-DD. Requires --end-date.
    #[arg(long, value_name = "DATE", help_heading = "Queries")]
    pub start_date: Option<String>,

    /// End of a date range query, YYYY-MM-DD. Requires --start-date.
    #[arg(long, value_name = "DATE", help_heading = "Queries")]
    pub end_date: Option<String>,

    /// Team name. Filters a date range, or alone looks the team up.
    #[arg(short, long, value_name = "NAME", help_heading = "Queries")]
    pub team: Option<String>,

    /// Weekly per-team game counts for the given week number
    #[arg(short, long, value_name = "WEEK", help_heading = "Queries")]
    pub week: Option<i32>,

    /// Year for --week. Defaults to the current year.
    #[arg(long, value_name = "YEAR", help_heading = "Queries")]
    pub year: Option<i32>,

    /// API key to authenticate with, sent as a bearer token
    #[arg(long, value_name = "KEY", help_heading = "Authentication")]
    pub api_key: Option<String>,

    /// Path to an alternate config file
    #[arg(long, value_name = "PATH", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Mirror logs to stdout in addition to the log file
    #[arg(short, long)]
    pub debug: bool,
}
