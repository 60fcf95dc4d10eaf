//! Dataset assembly and vlr.gg scraping
//!
//! Scraping adapters for vlr.gg pages, the pipeline that drives them, and
//! the flat pick dataset with its CSV export.

pub mod dataset;
pub mod pipeline;
pub mod scrapers;

pub use dataset::PickDataset;
