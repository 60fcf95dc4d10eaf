//! Flat pick dataset: build, export, reload, tally
//!
//! One row per agent pick, insertion order = traversal order. The CSV file
//! written here is the boundary to the filtering/visualization layer; its
//! four columns (`map`, `agents`, `match_id`, `game_id`) are the contract.

use crate::{Pick, Result};
use std::path::Path;

/// Ordered collection of pick rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickDataset {
    rows: Vec<Pick>,
}

impl PickDataset {
    pub fn new() -> Self {
        PickDataset { rows: Vec::new() }
    }

    pub fn from_rows(rows: Vec<Pick>) -> Self {
        PickDataset { rows }
    }

    pub fn rows(&self) -> &[Pick] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the dataset as CSV, creating parent directories as needed.
    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_path(path)?;
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        log::debug!("Wrote {} rows to {}", self.rows.len(), path.display());
        Ok(())
    }

    /// Load a previously exported dataset. Ids come back as the strings
    /// they were written as.
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        let mut rows = Vec::new();
        for record in reader.deserialize() {
            rows.push(record?);
        }
        Ok(PickDataset { rows })
    }

    /// Unique map names in first-seen order.
    pub fn maps(&self) -> Vec<String> {
        let mut maps: Vec<String> = Vec::new();
        for row in &self.rows {
            if !maps.iter().any(|m| m == &row.map) {
                maps.push(row.map.clone());
            }
        }
        maps
    }

    /// Tally agent picks, optionally restricted to one map. Sorted by
    /// count descending, then agent name for a stable order.
    pub fn agent_counts(&self, map: Option<&str>) -> Vec<(String, usize)> {
        use std::collections::BTreeMap;

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for row in &self.rows {
            if let Some(wanted) = map {
                if row.map != wanted {
                    continue;
                }
            }
            *counts.entry(row.agents.as_str()).or_insert(0) += 1;
        }

        let mut tally: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(agent, count)| (agent.to_string(), count))
            .collect();
        tally.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(map: &str, agent: &str, match_id: &str, game_id: &str) -> Pick {
        Pick {
            map: map.to_string(),
            agents: agent.to_string(),
            match_id: match_id.to_string(),
            game_id: game_id.to_string(),
        }
    }

    fn temp_csv(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("valpicks_{}_{}.csv", name, std::process::id()))
    }

    #[test]
    fn test_csv_round_trip_preserves_ids_as_strings() {
        let dataset = PickDataset::from_rows(vec![
            pick("Ascent", "Jett", "123456", "140027"),
            pick("Ascent", "Sova", "123456", "140027"),
            pick("Bind", "Raze", "654321", "140030"),
        ]);

        let path = temp_csv("round_trip");
        dataset.save_csv(&path).unwrap();
        let reloaded = PickDataset::load_csv(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(reloaded, dataset);
        assert_eq!(reloaded.rows()[0].match_id, "123456");
        assert_eq!(reloaded.rows()[2].game_id, "140030");
    }

    #[test]
    fn test_csv_header_matches_consumer_contract() {
        let dataset = PickDataset::from_rows(vec![pick("Haven", "Omen", "111111", "1")]);

        let path = temp_csv("header");
        dataset.save_csv(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let header = content.lines().next().unwrap();
        assert_eq!(header, "map,agents,match_id,game_id");
    }

    #[test]
    fn test_agent_counts_with_map_filter() {
        let dataset = PickDataset::from_rows(vec![
            pick("Ascent", "Jett", "1", "1"),
            pick("Ascent", "Jett", "1", "2"),
            pick("Ascent", "Omen", "1", "1"),
            pick("Bind", "Jett", "2", "1"),
        ]);

        let all = dataset.agent_counts(None);
        assert_eq!(all, vec![("Jett".to_string(), 3), ("Omen".to_string(), 1)]);

        let ascent = dataset.agent_counts(Some("Ascent"));
        assert_eq!(
            ascent,
            vec![("Jett".to_string(), 2), ("Omen".to_string(), 1)]
        );

        assert!(dataset.agent_counts(Some("Haven")).is_empty());
    }

    #[test]
    fn test_maps_in_first_seen_order() {
        let dataset = PickDataset::from_rows(vec![
            pick("Bind", "Jett", "1", "1"),
            pick("Ascent", "Jett", "1", "2"),
            pick("Bind", "Omen", "2", "1"),
        ]);
        assert_eq!(dataset.maps(), vec!["Bind".to_string(), "Ascent".to_string()]);
    }
}
