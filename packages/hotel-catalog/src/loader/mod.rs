//! JSON loaders feeding the catalog
//!
//! - `hotels`: hotel list document (`{"sr": [...]}`)
//! - `reviews`: review documents discovered under a directory tree
//!
//! Per-file failures are logged and skipped so one bad file does not stop the
//! load pass. Only failures that make the whole pass meaningless (missing
//! hotel file, missing review root) are returned as errors.

pub mod hotels;
pub mod reviews;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::CatalogConfig;
use crate::{Catalog, Result};

pub use hotels::{load_hotels, parse_hotels};
pub use reviews::{discover_review_files, load_reviews, parse_review_file, ParsedReviews};

/// JSON scalar as found in the source documents
///
/// The source data is loose about types: ids may be numbers or strings,
/// coordinates and ratings are often quoted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum JsonScalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl JsonScalar {
    pub(crate) fn into_string(self) -> String {
        match self {
            JsonScalar::Text(text) => text,
            JsonScalar::Number(number) => number.to_string(),
            JsonScalar::Bool(flag) => flag.to_string(),
        }
    }

    pub(crate) fn as_f64(&self) -> Option<f64> {
        match self {
            JsonScalar::Text(text) => text.trim().parse().ok(),
            JsonScalar::Number(number) => number.as_f64(),
            JsonScalar::Bool(_) => None,
        }
    }

    pub(crate) fn as_i64(&self) -> Option<i64> {
        match self {
            JsonScalar::Text(text) => text.trim().parse().ok(),
            JsonScalar::Number(number) => number.as_i64(),
            JsonScalar::Bool(_) => None,
        }
    }
}

/// Counters of a review load pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
    pub files_parsed: usize,
    /// Unreadable files and files not matching the review schema
    pub files_skipped: usize,
    pub reviews_added: usize,
    /// Reviews absorbed by an existing entry with the same composite key
    pub duplicates: usize,
    /// Reviews rejected by validation or malformed in the file
    pub rejected: usize,
}

impl fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files parsed, {} skipped; {} reviews added, {} duplicates, {} rejected",
            self.files_parsed, self.files_skipped, self.reviews_added, self.duplicates, self.rejected
        )
    }
}

/// Build a catalog from the hotel file and review tree named in `config`
pub fn load_catalog(config: &CatalogConfig) -> Result<(Catalog, LoadSummary)> {
    let mut catalog = Catalog::new();

    let hotels = load_hotels(&mut catalog, &config.hotels_file)?;
    info!(
        "Loaded {} hotels from {}",
        hotels,
        config.hotels_file.display()
    );

    let summary = load_reviews(&mut catalog, &config.reviews_dir, config.parallel)?;
    info!(
        "Loaded reviews from {}: {}",
        config.reviews_dir.display(),
        summary
    );

    Ok((catalog, summary))
}
