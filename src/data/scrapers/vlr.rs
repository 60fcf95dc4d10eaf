//! vlr.gg scraper for tournament agent picks
//!
//! All selectors and patterns tied to the live vlr.gg markup live in this
//! adapter. A layout change upstream should only ever require edits here.

use super::{Fetch, HttpFetcher};
use crate::{Result, ScrapeError};
use regex::Regex;
use scraper::{Html, Selector};

/// Scraper for vlr.gg tournament and match pages
pub struct VlrScraper<F = HttpFetcher> {
    fetcher: F,
    base_url: String,
}

impl VlrScraper<HttpFetcher> {
    pub fn new(base_url: &str) -> Self {
        Self::with_fetcher(HttpFetcher::new(), base_url)
    }
}

impl<F: Fetch> VlrScraper<F> {
    pub fn with_fetcher(fetcher: F, base_url: &str) -> Self {
        VlrScraper {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// URL of a match page, synthesized from its id
    pub fn match_url(&self, match_id: &str) -> String {
        format!("{}/{}", self.base_url, match_id)
    }

    /// Fetch a tournament listing and enumerate its match ids
    pub fn fetch_tournament(&self, url: &str) -> Result<Vec<String>> {
        let html = self.fetcher.get(url)?;
        Ok(parse_tournament(&html))
    }

    /// Fetch a match page once. Returns the parsed document for reuse by
    /// [`extract_game`] along with the game ids in page order; a match
    /// without games yields an empty list.
    pub fn fetch_match(&self, match_id: &str) -> Result<(Html, Vec<String>)> {
        let url = self.match_url(match_id);
        let html = self.fetcher.get(&url)?;
        let document = Html::parse_document(&html);
        let game_ids = parse_game_ids(&document);
        Ok((document, game_ids))
    }
}

/// Scan a tournament match listing for match ids.
///
/// Match links sit inside the `wf-card` blocks carrying the listing's exact
/// inline style. A link counts when its href has the `/<digits>/<slug>`
/// shape; the id itself must be exactly six digits, and ids of any other
/// width are silently dropped. Order is preserved and duplicates are kept.
pub fn parse_tournament(html: &str) -> Vec<String> {
    let card_selector = Selector::parse(r#"div.wf-card[style="margin-bottom: 30px;"]"#).unwrap();
    let link_selector = Selector::parse("a[href]").unwrap();

    let link_pattern = Regex::new(r"^/\d+/.+").unwrap();
    let id_pattern = Regex::new(r"\b\d{6}\b").unwrap();

    let document = Html::parse_document(html);
    let mut match_ids = Vec::new();

    for card in document.select(&card_selector) {
        for link in card.select(&link_selector) {
            let href = match link.value().attr("href") {
                Some(href) => href,
                None => continue,
            };
            if !link_pattern.is_match(href) {
                continue;
            }
            for id in id_pattern.find_iter(href) {
                match_ids.push(id.as_str().to_string());
            }
        }
    }

    match_ids
}

/// Game ids from a match page's games navigation, in page order.
pub fn parse_game_ids(document: &Html) -> Vec<String> {
    let nav_selector = Selector::parse("div.vm-stats-gamesnav-item.js-map-switch").unwrap();

    document
        .select(&nav_selector)
        .filter_map(|nav| nav.value().attr("data-game-id"))
        .map(str::to_string)
        .collect()
}

/// Map name and agent picks for one game on an already-parsed match page.
///
/// The pick list is read in document order and capped at 10; a shorter list
/// means a partially rendered game and is passed through untouched. A map
/// title that matches no capitalized word yields an empty map name.
pub fn extract_game(document: &Html, game_id: &str) -> Result<(String, Vec<String>)> {
    let game_selector = Selector::parse("div.vm-stats-game").unwrap();
    let title_selector = Selector::parse(r#"span[style="position: relative;"]"#).unwrap();
    let agent_selector = Selector::parse("span.stats-sq.mod-agent.small").unwrap();
    let img_selector = Selector::parse("img").unwrap();

    let title_pattern = Regex::new(r"\b[A-Z][a-z]*\b").unwrap();

    let game = document
        .select(&game_selector)
        .find(|e| e.value().attr("data-game-id") == Some(game_id))
        .ok_or_else(|| ScrapeError::MissingElement {
            context: format!("stats fragment for game {}", game_id),
        })?;

    let title = game
        .select(&title_selector)
        .next()
        .ok_or_else(|| ScrapeError::MissingElement {
            context: format!("map title span in game {}", game_id),
        })?;
    let title_text: String = title.text().collect();
    let map_name = title_pattern
        .find(&title_text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let picks: Vec<String> = game
        .select(&agent_selector)
        .take(10)
        .filter_map(|span| {
            span.select(&img_selector)
                .next()
                .and_then(|img| img.value().attr("title"))
                .map(str::to_string)
        })
        .collect();

    Ok((map_name, picks))
}
