//! Valorant agent-pick scraping from vlr.gg tournament pages.
//!
//! Walks a tournament's match listing, each match page and each game in it,
//! and flattens the agent picks into one tabular dataset.

pub mod data;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// One agent pick in one game; the atomic dataset row.
///
/// `match_id` and `game_id` are kept as strings end to end so that exported
/// ids like `"123456"` survive a reload unchanged instead of being read back
/// as integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pick {
    pub map: String,
    /// Agent name. The column keeps the original dataset's plural header.
    pub agents: String,
    pub match_id: String,
    pub game_id: String,
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },

    #[error("No cached page for {url} (offline mode)")]
    Offline { url: String },

    #[error("Missing element: {context}")]
    MissingElement { context: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub scrape: ScrapeConfig,
    pub data: DataConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Tournament match-listing URL, the root of the traversal.
    pub tournament_url: String,
    /// Base URL that match ids are appended to.
    pub base_url: String,
    /// Pause after each match's games, in milliseconds. Politeness toward
    /// the upstream, not a correctness requirement.
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub dataset_path: String,
}

/// Cosmetic display settings for tally output. Not part of the scraped
/// data model and never written into the dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub agent_colors: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scrape: ScrapeConfig {
                tournament_url:
                    "https://www.vlr.gg/event/matches/1657/valorant-champions-2023/?series_id=all"
                        .to_string(),
                base_url: "https://www.vlr.gg".to_string(),
                delay_ms: 2000,
            },
            data: DataConfig {
                dataset_path: "data/agent_picks.csv".to_string(),
            },
            display: DisplayConfig {
                agent_colors: default_agent_colors(),
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScrapeError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| ScrapeError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ScrapeError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Agent-to-hex-color mapping used when printing tallies.
fn default_agent_colors() -> BTreeMap<String, String> {
    let colors = [
        ("Viper", "#2A4334"),
        ("Breach", "#8B4C31"),
        ("Astra", "#7E24D6"),
        ("Neon", "#566AAF"),
        ("Sova", "#223773"),
        ("Killjoy", "#F5CE2C"),
        ("Raze", "#F8A83E"),
        ("Fade", "#1E1F2C"),
        ("Omen", "#7577AF"),
        ("Chamber", "#A77E58"),
        ("Skye", "#628C66"),
        ("Brimstone", "#7F3319"),
        ("Kayo", "#13208F"),
        ("Jett", "#B7D2DA"),
        ("Harbor", "#0C8C74"),
        ("Gekko", "#C2ED57"),
        ("Sage", "#D9CFD8"),
        ("Yoru", "#3D498D"),
        ("Cypher", "#9B664B"),
        ("Phoenix", "#E58B47"),
        ("Reyna", "#7B3675"),
    ];
    colors
        .iter()
        .map(|(agent, color)| (agent.to_string(), color.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let reloaded: Config = toml::from_str(&text).unwrap();
        assert_eq!(reloaded.scrape.base_url, config.scrape.base_url);
        assert_eq!(reloaded.scrape.delay_ms, 2000);
        assert_eq!(
            reloaded.display.agent_colors.get("Jett").map(String::as_str),
            Some("#B7D2DA")
        );
    }
}
