//! Valorant agent-pick scraper CLI
//!
//! Scrapes vlr.gg tournament pages into a flat CSV of agent picks.

use clap::{Parser, Subcommand};
use valpicks::{Config, Result};

#[derive(Parser)]
#[command(name = "valpicks")]
#[command(about = "Scrape Valorant agent picks from vlr.gg tournaments", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a default config file
    Init,
    /// Scrape a tournament into the dataset CSV
    Scrape {
        /// Tournament URL (overrides config)
        #[arg(long)]
        url: Option<String>,

        /// Output CSV path (overrides config)
        #[arg(long)]
        out: Option<String>,

        /// Cache fetched pages in this directory
        #[arg(long)]
        cache: Option<String>,

        /// Use cached pages only, no network requests
        #[arg(long)]
        offline: bool,
    },
    /// Show agent pick tallies from the exported dataset
    Stats {
        /// Restrict the tally to one map
        #[arg(long)]
        map: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    let result = match cli.command {
        Commands::Init => commands::init(&cli.config),
        Commands::Scrape {
            url,
            out,
            cache,
            offline,
        } => commands::scrape(&config, url, out, cache, offline),
        Commands::Stats { map } => commands::stats(&config, map),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use std::time::Duration;
    use valpicks::data::scrapers::vlr::VlrScraper;
    use valpicks::data::scrapers::HttpFetcher;
    use valpicks::data::{pipeline, PickDataset};

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        println!("\nNext steps:");
        println!("  1. Edit {} to point at a tournament", config_path);
        println!("  2. Run 'valpicks scrape' to build the dataset");
        println!("  3. Run 'valpicks stats' to tally agent picks");

        Ok(())
    }

    pub fn scrape(
        config: &Config,
        url: Option<String>,
        out: Option<String>,
        cache: Option<String>,
        offline: bool,
    ) -> Result<()> {
        let url = url.unwrap_or_else(|| config.scrape.tournament_url.clone());
        let out = out.unwrap_or_else(|| config.data.dataset_path.clone());

        let mut fetcher = HttpFetcher::new();
        if let Some(cache_dir) = cache {
            println!("Using cache directory: {}", cache_dir);
            fetcher = fetcher.with_cache(&cache_dir);
        }
        if offline {
            println!("Offline mode: using cached pages only");
            fetcher = fetcher.offline_only(true);
        }

        let scraper = VlrScraper::with_fetcher(fetcher, &config.scrape.base_url);
        let delay = Duration::from_millis(config.scrape.delay_ms);

        println!("Scraping {}", url);
        let dataset = pipeline::run(&scraper, &url, delay)?;
        println!("Collected {} pick rows", dataset.len());

        if dataset.is_empty() {
            println!("No picks found. Check the tournament URL or the page markup.");
            return Ok(());
        }

        dataset.save_csv(&out)?;
        println!("Saved dataset to {}", out);

        Ok(())
    }

    pub fn stats(config: &Config, map: Option<String>) -> Result<()> {
        let dataset = PickDataset::load_csv(&config.data.dataset_path)?;

        match map.as_deref() {
            Some(m) => println!("Agent picks on {}:", m),
            None => println!(
                "Agent picks across {} maps ({} rows):",
                dataset.maps().len(),
                dataset.len()
            ),
        }

        for (agent, count) in dataset.agent_counts(map.as_deref()) {
            match config.display.agent_colors.get(&agent) {
                Some(color) => println!("  {:<12} {:>4}  {}", agent, count, color),
                None => println!("  {:<12} {:>4}", agent, count),
            }
        }

        Ok(())
    }
}
