//! hotel-catalog - Hotel and review index
//!
//! > "Index once, query many."
//!
//! ## Core Principles
//!
//! 1. **Hotel order**: hotels are kept sorted by id (plain string order)
//! 2. **Review order**: per hotel, newest first, then username, then review id
//! 3. **Single owner**: `Catalog` owns both indexes; loaders may parse in
//!    parallel but insert from one thread
//!
//! ## Layout
//!
//! - `domain`: models, `HotelIndex`, `ReviewIndex`
//! - `catalog`: composition and report rendering
//! - `loader`: hotel list and review file loaders
//! - `report`: report writer
//! - `config`: YAML/env configuration
//!
//! ## Usage
//!
//! ```rust
//! use hotel_catalog::{AddOutcome, Catalog, ReviewDraft};
//!
//! let mut catalog = Catalog::new();
//! catalog.add_hotel(
//!     "25622",
//!     "Hilton San Francisco Union Square",
//!     "San Francisco",
//!     "CA",
//!     "55 Cyril Magnin St",
//!     37.78,
//!     -122.4,
//! );
//!
//! let outcome = catalog.add_review(ReviewDraft::new(
//!     "25622",
//!     "23d756a64672vr2gwegyhqw4",
//!     5,
//!     "Great deal",
//!     "Loved the neighborhood, very lively",
//!     true,
//!     "2014-09-05T05:00:45",
//!     "Chris",
//! ));
//! assert_eq!(outcome, AddOutcome::Added);
//! assert_eq!(catalog.average_rating("25622"), 5.0);
//! ```

pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod loader;
pub mod report;

pub use catalog::{AddOutcome, Catalog, HOTEL_SEPARATOR, REVIEW_SEPARATOR};
pub use config::{CatalogConfig, ConfigError};
pub use error::{CatalogError, ErrorKind, Result};
pub use loader::{load_catalog, LoadSummary};
pub use report::write_report;

// Domain re-exports
pub use domain::{Address, Hotel, HotelIndex, Review, ReviewDraft, ReviewIndex, ReviewKey};
