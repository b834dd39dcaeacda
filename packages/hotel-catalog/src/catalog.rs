//! Catalog: hotel index + review index, and report rendering
//!
//! The catalog is the single owner of both indexes. All mutation goes through
//! `&mut Catalog`, so loaders that parse in parallel still insert from one
//! thread.

use tracing::warn;

use crate::domain::{Address, Hotel, HotelIndex, Insertion, Review, ReviewDraft, ReviewIndex};
use crate::ErrorKind;

/// Line printed before every review block
pub const REVIEW_SEPARATOR: &str = "--------------------";

/// Line printed before every hotel block in the full report
pub const HOTEL_SEPARATOR: &str = "********************";

/// Result of `Catalog::add_review`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// Same composite key as a stored review; the stored one was kept
    Duplicate,
    Rejected(ErrorKind),
}

impl AddOutcome {
    /// `true` unless the review was rejected
    pub fn is_success(&self) -> bool {
        !matches!(self, AddOutcome::Rejected(_))
    }
}

/// Hotels and their reviews
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    hotels: HotelIndex,
    reviews: ReviewIndex,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a hotel
    #[allow(clippy::too_many_arguments)]
    pub fn add_hotel(
        &mut self,
        hotel_id: impl Into<String>,
        name: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        street_address: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) {
        let address = Address::new(city, state, street_address, latitude, longitude);
        self.hotels.put(hotel_id, name, address);
    }

    /// Add a review for a known hotel
    ///
    /// Failures are returned as `AddOutcome::Rejected` and logged; nothing is
    /// stored in that case.
    pub fn add_review(&mut self, draft: ReviewDraft) -> AddOutcome {
        let hotel_exists = self.hotels.contains(&draft.hotel_id);
        let review_id = draft.review_id.clone();

        match self.reviews.add(draft, hotel_exists) {
            Ok(Insertion::Inserted) => AddOutcome::Added,
            Ok(Insertion::Duplicate) => AddOutcome::Duplicate,
            Err(err) => {
                warn!("Rejected review {}: {}", review_id, err);
                AddOutcome::Rejected(err.kind)
            }
        }
    }

    pub fn hotel(&self, hotel_id: &str) -> Option<&Hotel> {
        self.hotels.get(hotel_id)
    }

    /// Hotel ids in ascending order
    pub fn hotel_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.hotels.list()
    }

    /// Reviews of a hotel in report order
    pub fn reviews(&self, hotel_id: &str) -> impl Iterator<Item = &Review> + '_ {
        self.reviews.list(hotel_id)
    }

    /// Mean rating, `0.0` for hotels without reviews or unknown hotels
    pub fn average_rating(&self, hotel_id: &str) -> f64 {
        self.reviews.average_rating(hotel_id)
    }

    pub fn hotel_count(&self) -> usize {
        self.hotels.len()
    }

    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    /// Report block of one hotel
    ///
    /// ```text
    /// {name}: {id}
    /// {street}
    /// {city}, {state}
    /// --------------------
    /// Review by {username} on {date}
    /// Rating: {rating}
    /// {title}
    /// {text}
    /// ```
    ///
    /// Empty if the hotel is unknown.
    pub fn render(&self, hotel_id: &str) -> String {
        let Some(hotel) = self.hotels.get(hotel_id) else {
            return String::new();
        };

        let mut out = hotel.to_string();
        for review in self.reviews.list(hotel_id) {
            out.push_str(REVIEW_SEPARATOR);
            out.push('\n');
            out.push_str(&review.to_string());
        }
        out
    }

    /// All hotels in id order, each preceded by a blank line and a line of
    /// asterisks
    pub fn render_all(&self) -> String {
        let mut out = String::new();
        for hotel_id in self.hotels.list() {
            out.push('\n');
            out.push_str(HOTEL_SEPARATOR);
            out.push('\n');
            out.push_str(&self.render(hotel_id));
        }
        out
    }
}
