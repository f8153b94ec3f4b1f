use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use finboard_core::market::entity::NewsSort;
use crate::traffic::MAX_DELAY_SECS;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "finboard", version, about = "Terminal client for the finance dashboard API")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Overrides the API base URL for this run only
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path to a TOML config file (defaults to ./finboard.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Top stocks, market news, revenue and earnings at a glance.
    Dashboard {
        /// Ticker used for the revenue and earnings charts
        #[arg(long)]
        ticker: Option<String>,
    },

    /// Current price, change and price history for one ticker.
    Stocks { ticker: String },

    /// Positions and totals.
    Portfolio,

    /// Market news feed.
    News {
        /// Comma-separated tickers, e.g. AAPL,MSFT
        #[arg(long, value_delimiter = ',')]
        tickers: Vec<String>,
        /// Earliest publish date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Latest publish date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// LATEST or EARLIEST
        #[arg(long)]
        sort: Option<NewsSort>,
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Raw server metrics.
    Metrics,

    /// Ticker autocomplete.
    Search { query: String },

    /// Buy shares of a ticker.
    Buy { ticker: String, shares: u32 },

    /// Sell shares of a ticker.
    Sell { ticker: String, shares: u32 },

    /// Show or change the saved API URL.
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Send random GET requests to exercise the API.
    SimulateTraffic {
        #[arg(long, default_value_t = 300)]
        requests: u32,
        /// Minimum delay before each request, in seconds
        #[arg(long, default_value_t = 1.0, value_parser = parse_delay)]
        min_delay: f64,
        /// Maximum delay before each request, in seconds
        #[arg(long, default_value_t = 5.0, value_parser = parse_delay)]
        max_delay: f64,
    },

    /// Interactive mode; login and theme last until exit.
    Shell,
}

/// 延迟参数：有限、非负且不超过 `MAX_DELAY_SECS` 的秒数。
fn parse_delay(raw: &str) -> Result<f64, String> {
    let secs: f64 = raw.parse().map_err(|e| format!("{raw} is not a number: {e}"))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(format!("{raw} is not a finite, non-negative number of seconds"));
    }
    if secs > MAX_DELAY_SECS {
        return Err(format!("{raw} exceeds the {MAX_DELAY_SECS} second limit"));
    }
    Ok(secs)
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    Show,
    SetUrl { url: String },
}

/// One line typed into the interactive shell.
#[derive(Parser, Debug)]
#[command(multicall = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    #[command(flatten)]
    Run(Commands),

    /// Log in with a username and password.
    Login { username: String, password: String },

    /// Clear the logged-in user.
    Logout,

    /// Show the logged-in user and theme.
    Whoami,

    /// Switch between dark and light themes.
    Theme,

    /// Leave the shell.
    #[command(alias = "quit")]
    Exit,
}
