//! Domain layer for the hotel catalog
//!
//! # Domain Models
//!
//! - `Address`: Location of a hotel (owned by its `Hotel`)
//! - `Hotel`: Hotel record, keyed by hotel id
//! - `ReviewDraft`: Unvalidated review as produced by the loaders
//! - `Review`: Validated, immutable review
//! - `ReviewKey`: Composite ordering key of a review
//!
//! # Indexes
//!
//! - `HotelIndex`: hotel id → hotel, ascending by id
//! - `ReviewIndex`: hotel id → reviews, each collection in `ReviewKey` order
//!
//! # Examples
//!
//! ```rust
//! use hotel_catalog::domain::{Review, ReviewDraft};
//!
//! let draft = ReviewDraft::new(
//!     "25622",
//!     "57b717a44751ca0b791823b2",
//!     4,
//!     "Room too small",
//!     "Great location, but the room is too small",
//!     true,
//!     "2015-03-04T10:10:16",
//!     "Xiaofeng",
//! );
//! let review = Review::try_from_draft(draft).unwrap();
//! assert_eq!(review.rating, 4);
//! ```

pub mod hotel_index;
pub mod review_index;

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{CatalogError, Result};

pub use hotel_index::HotelIndex;
pub use review_index::{Insertion, ReviewIndex};

/// Submission time format of the review files (`2016-06-29T17:50:37`)
pub const SUBMISSION_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Date format used in rendered reports (`Wed Jun 29 17:50:37 2016`)
pub const DISPLAY_TIME_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

// ═══════════════════════════════════════════════════════════════════════════
// Domain Models
// ═══════════════════════════════════════════════════════════════════════════

/// Hotel address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    /// State or region
    pub state: String,
    /// Building number and street
    pub street_address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Address {
    pub fn new(
        city: impl Into<String>,
        state: impl Into<String>,
        street_address: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            city: city.into(),
            state: state.into(),
            street_address: street_address.into(),
            latitude,
            longitude,
        }
    }
}

/// Hotel record
///
/// Never mutated after creation. Adding a hotel with an existing id replaces
/// the whole record.
///
/// # Examples
///
/// ```rust
/// use hotel_catalog::domain::{Address, Hotel};
///
/// let address = Address::new("San Francisco", "CA", "55 Cyril Magnin St", 37.78, -122.4);
/// let hotel = Hotel::new("25622", "Hilton San Francisco Union Square", address);
/// assert_eq!(
///     hotel.to_string(),
///     "Hilton San Francisco Union Square: 25622\n55 Cyril Magnin St\nSan Francisco, CA\n"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    /// Hotel ID (primary key)
    pub id: String,
    /// Display name
    pub name: String,
    pub address: Address,
}

impl Hotel {
    pub fn new(id: impl Into<String>, name: impl Into<String>, address: Address) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address,
        }
    }
}

/// Report header: name and id, street, then city and state
impl fmt::Display for Hotel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.name, self.id)?;
        writeln!(f, "{}", self.address.street_address)?;
        writeln!(f, "{}, {}", self.address.city, self.address.state)
    }
}

/// Review as read from a review file, before validation
///
/// Rating and submission time are kept raw so that range and format checks
/// happen in one place (`Review::try_from_draft`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub hotel_id: String,
    pub review_id: String,
    pub rating: i64,
    pub title: String,
    pub text: String,
    pub is_recommended: bool,
    /// `yyyy-MM-ddTHH:mm:ss`
    pub submitted_at: String,
    pub username: String,
}

impl ReviewDraft {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        hotel_id: impl Into<String>,
        review_id: impl Into<String>,
        rating: i64,
        title: impl Into<String>,
        text: impl Into<String>,
        is_recommended: bool,
        submitted_at: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            hotel_id: hotel_id.into(),
            review_id: review_id.into(),
            rating,
            title: title.into(),
            text: text.into(),
            is_recommended,
            submitted_at: submitted_at.into(),
            username: username.into(),
        }
    }
}

/// Validated hotel review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub hotel_id: String,
    /// Unique within a hotel (not enforced globally)
    pub review_id: String,
    /// 1..=5
    pub rating: u8,
    pub title: String,
    pub text: String,
    pub is_recommended: bool,
    pub submitted_at: NaiveDateTime,
    /// Reviewer nickname
    pub username: String,
}

impl Review {
    /// Validate a draft: rating range first, then submission time.
    ///
    /// # Errors
    ///
    /// - `InvalidRating` if the rating is outside 1..=5
    /// - `InvalidDate` if the submission time is not `yyyy-MM-ddTHH:mm:ss`
    pub fn try_from_draft(draft: ReviewDraft) -> Result<Self> {
        let rating = u8::try_from(draft.rating)
            .ok()
            .filter(|rating| (MIN_RATING..=MAX_RATING).contains(rating))
            .ok_or_else(|| CatalogError::invalid_rating(draft.rating))?;

        let submitted_at = parse_submission_time(&draft.submitted_at)?;

        Ok(Self {
            hotel_id: draft.hotel_id,
            review_id: draft.review_id,
            rating,
            title: draft.title,
            text: draft.text,
            is_recommended: draft.is_recommended,
            submitted_at,
            username: draft.username,
        })
    }

    /// Composite ordering key of this review
    pub fn key(&self) -> ReviewKey {
        ReviewKey::new(self.submitted_at, &self.username, &self.review_id)
    }
}

/// Report block: author and date, rating, title, text
impl fmt::Display for Review {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Review by {} on {}",
            self.username,
            self.submitted_at.format(DISPLAY_TIME_FORMAT)
        )?;
        writeln!(f, "Rating: {}", self.rating)?;
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.text)
    }
}

/// Parse a `yyyy-MM-ddTHH:mm:ss` submission time
pub fn parse_submission_time(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), SUBMISSION_TIME_FORMAT)
        .map_err(|err| CatalogError::invalid_date(value).with_source(err))
}

/// Composite review ordering key
///
/// Orders by submission time descending (most recent first), then username
/// ascending, then review id ascending. Two reviews with equal keys are the
/// same entry of a review collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewKey {
    pub submitted_at: NaiveDateTime,
    pub username: String,
    pub review_id: String,
}

impl ReviewKey {
    pub fn new(
        submitted_at: NaiveDateTime,
        username: impl Into<String>,
        review_id: impl Into<String>,
    ) -> Self {
        Self {
            submitted_at,
            username: username.into(),
            review_id: review_id.into(),
        }
    }
}

impl Ord for ReviewKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .submitted_at
            .cmp(&self.submitted_at)
            .then_with(|| self.username.cmp(&other.username))
            .then_with(|| self.review_id.cmp(&other.review_id))
    }
}

impl PartialOrd for ReviewKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
