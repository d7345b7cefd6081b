//! Command-line interface.

mod commands;

use clap::{Args, Parser, Subcommand};

use crate::client::ListFilters;
use crate::domain::{SortField, SortOrder};

/// Episodic - episode tracking API and list client
#[derive(Parser)]
#[command(name = "episodic")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the episode API until Ctrl+C
    Serve {
        /// Port to listen on (overrides config and PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the episode list as the client sees it
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filters: ListArgs,

        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },

    /// Flip the watched state of an episode
    Toggle {
        /// Episode ID
        id: String,

        #[command(flatten)]
        filters: ListArgs,
    },

    /// Write a default config.toml in the current directory
    #[command(alias = "init")]
    InitConfig,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Include watched episodes
    #[arg(long)]
    pub show_watched: bool,

    /// airDate, title, seriesTitle, season or episode
    #[arg(long, default_value = "airDate")]
    pub sort_by: SortField,

    /// asc or desc
    #[arg(long, default_value = "desc")]
    pub order: SortOrder,

    /// Case-insensitive text matched against titles and descriptions
    #[arg(long, default_value = "")]
    pub search: String,
}

impl ListArgs {
    #[must_use]
    pub fn filters(&self) -> ListFilters {
        ListFilters {
            hide_watched: !self.show_watched,
            sort_by: self.sort_by,
            order: self.order,
            search: self.search.clone(),
        }
    }
}

pub use commands::*;
