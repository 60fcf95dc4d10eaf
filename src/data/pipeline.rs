//! Pipeline driving tournament → match → game extraction into one dataset

use crate::data::dataset::PickDataset;
use crate::data::scrapers::vlr::{self, VlrScraper};
use crate::data::scrapers::Fetch;
use crate::{Pick, Result};
use std::time::Duration;

/// Scrape every game of every match in a tournament into a flat dataset.
///
/// Strictly sequential: one fetch at a time, with `delay` slept after each
/// match's games to throttle requests against the upstream. The first fetch
/// or extraction failure aborts the whole run; rows accumulated before the
/// failure are discarded, never partially persisted.
pub fn run<F: Fetch>(
    scraper: &VlrScraper<F>,
    tournament_url: &str,
    delay: Duration,
) -> Result<PickDataset> {
    let match_ids = scraper.fetch_tournament(tournament_url)?;
    log::info!("Found {} match links", match_ids.len());

    let total = match_ids.len();
    let mut rows = Vec::new();

    for (n, match_id) in match_ids.iter().enumerate() {
        log::info!("Scraping match {} of {}", n + 1, total);

        let (document, game_ids) = scraper.fetch_match(match_id)?;

        for game_id in &game_ids {
            let (map_name, picks) = vlr::extract_game(&document, game_id)?;
            if picks.len() < 10 {
                log::warn!(
                    "Game {} of match {} has {} picks, expected 10",
                    game_id,
                    match_id,
                    picks.len()
                );
            }
            for agent in picks {
                rows.push(Pick {
                    map: map_name.clone(),
                    agents: agent,
                    match_id: match_id.clone(),
                    game_id: game_id.clone(),
                });
            }
        }

        std::thread::sleep(delay);
    }

    Ok(PickDataset::from_rows(rows))
}
