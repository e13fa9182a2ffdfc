use clap::Parser;
use scrape_cache::{Page, Query, ScrapeConfig, cache};
use std::process::ExitCode;

mod args;
use args::{Args, Command};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ::log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => ScrapeConfig::from_file(path)?,
        None => ScrapeConfig::default(),
    };
    if let Some(root) = args.cache_root {
        config.cache_root = root;
    }

    match args.command {
        Command::Links {
            url,
            same_domain,
            dedupe,
            no_store,
        } => {
            let mut page = fetched_page(&url, config).await?;
            let query = page.scrape_links(same_domain, dedupe)?;
            finish(&mut page, &query, no_store)?;
        }
        Command::Text { url, no_store } => {
            let mut page = fetched_page(&url, config).await?;
            let query = page.scrape_text()?;
            finish(&mut page, &query, no_store)?;
        }
        Command::Load { url, date } => {
            let mut page = Page::with_config(&url, config)?;
            let count = page.cache_mut().load(date)?;
            ::log::info!("Loaded {} records for {}", count, url);
            for query in page.cache().records().values() {
                println!("== {} {} {}", query.date, query.time, query.action());
                println!("{}", query);
            }
        }
        Command::Clear { url, date } => {
            let page = Page::with_config(&url, config)?;
            page.cache().clear(date)?;
            println!("Cleared {}", page.cache().path().display());
        }
        Command::Domains => {
            for domain in cache::list_domains(&config.cache_root)? {
                println!("{}", domain);
            }
        }
    }

    Ok(())
}

/// Build a page handle and fetch it, failing if the fetch does
async fn fetched_page(url: &str, config: ScrapeConfig) -> Result<Page, Box<dyn std::error::Error>> {
    let mut page = Page::with_config(url, config)?;
    if !page.fetch().await {
        return Err(format!("failed to fetch {}", url).into());
    }
    Ok(page)
}

/// Print a fresh query and cache it unless told not to
fn finish(page: &mut Page, query: &Query, no_store: bool) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", query);
    if !no_store {
        let path = page.store(query)?;
        println!("Cached to {}", path.display());
    }
    Ok(())
}
