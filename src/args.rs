use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use scrape_cache::utils;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scrape-cache")]
#[command(about = "Scrape a page's links or text into a dated file cache")]
#[command(version)]
pub struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Root directory of the cache (overrides the configuration file)
    #[arg(long, global = true, env = "SCRAPE_CACHE_ROOT")]
    pub cache_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch a page and record its outbound links
    Links {
        /// Page URL
        url: String,

        /// Keep only links on the page's domain
        #[arg(short, long)]
        same_domain: bool,

        /// Keep each link once
        #[arg(short, long)]
        dedupe: bool,

        /// Print the result without caching it
        #[arg(long)]
        no_store: bool,
    },

    /// Fetch a page and record its visible text
    Text {
        /// Page URL
        url: String,

        /// Print the result without caching it
        #[arg(long)]
        no_store: bool,
    },

    /// Print the cached records of a page
    Load {
        /// Page URL
        url: String,

        /// Only records from this date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Delete the cached records of a page
    Clear {
        /// Page URL
        url: String,

        /// Only records from this date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// List every domain with cached records
    Domains,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    utils::parse_date(value).map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}
