use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use cine_model::TimeWindow;

#[derive(Debug, Parser)]
#[command(
    name = "cinectl",
    version,
    about = "Browse trending movies, keep a watchlist and manage your session"
)]
pub struct Cli {
    /// TOML config file (defaults to $CINE_CONFIG, then the platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG wins when set
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in with your movie database username and password
    Login {
        #[arg(long, short)]
        username: Option<String>,
        /// Prompted for (hidden) when omitted
        #[arg(long, short)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show whether a session is stored
    Status,
    /// List trending movies
    Trending {
        #[command(flatten)]
        catalog: CatalogArgs,
        /// Only show titles containing this text (case-insensitive)
        #[arg(long, short)]
        search: Option<String>,
    },
    /// List popular movies via discover
    Popular {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        language: Option<String>,
    },
    /// Show details and reviews for a movie
    Movie { id: i64 },
    /// Rate a movie from 1 to 10
    Rate {
        id: i64,
        #[arg(allow_negative_numbers = true)]
        value: f32,
    },
    /// Remove your rating from a movie
    Unrate { id: i64 },
    /// Show the account for the stored session
    Profile,
    /// Interactive catalog browser (search, watchlist, selection)
    Browse {
        #[command(flatten)]
        catalog: CatalogArgs,
    },
}

#[derive(Debug, Clone, Args)]
pub struct CatalogArgs {
    /// Trending window; defaults to the configured one
    #[arg(long, short, value_enum)]
    pub window: Option<WindowArg>,
    #[arg(long, short)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum WindowArg {
    Day,
    Week,
}

impl From<WindowArg> for TimeWindow {
    fn from(arg: WindowArg) -> Self {
        match arg {
            WindowArg::Day => TimeWindow::Day,
            WindowArg::Week => TimeWindow::Week,
        }
    }
}
