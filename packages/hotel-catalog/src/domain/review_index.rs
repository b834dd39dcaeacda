//! Secondary index: hotel id → reviews in composite order
//!
//! Each hotel owns an independent `BTreeMap<ReviewKey, Review>` created on its
//! first accepted review. Reviews whose composite key (submission time,
//! username, review id) matches an existing entry are absorbed: the first
//! review stored under a key wins and later ones are dropped.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use tracing::debug;

use super::{Review, ReviewDraft, ReviewKey};
use crate::{CatalogError, Result};

/// What `ReviewIndex::add` did with an accepted review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// Stored as a new entry
    Inserted,
    /// An entry with the same composite key already existed; nothing changed
    Duplicate,
}

/// Ordered per-hotel review index
#[derive(Debug, Clone, Default)]
pub struct ReviewIndex {
    reviews: BTreeMap<String, BTreeMap<ReviewKey, Review>>,
    total: usize,
}

impl ReviewIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and insert a review
    ///
    /// `hotel_exists` is supplied by the caller, which owns the hotel index.
    ///
    /// # Errors
    ///
    /// - `UnknownHotel` if `hotel_exists` is false
    /// - `InvalidRating` / `InvalidDate` from validation
    ///
    /// The review is discarded on error and the index is left unchanged.
    pub fn add(&mut self, draft: ReviewDraft, hotel_exists: bool) -> Result<Insertion> {
        if !hotel_exists {
            return Err(CatalogError::unknown_hotel(draft.hotel_id));
        }

        let review = Review::try_from_draft(draft)?;
        let collection = self.reviews.entry(review.hotel_id.clone()).or_default();

        match collection.entry(review.key()) {
            Entry::Occupied(existing) => {
                debug!(
                    "Duplicate review key for hotel {}: {} by {} (kept {})",
                    review.hotel_id,
                    review.review_id,
                    review.username,
                    existing.get().review_id
                );
                Ok(Insertion::Duplicate)
            }
            Entry::Vacant(slot) => {
                slot.insert(review);
                self.total += 1;
                Ok(Insertion::Inserted)
            }
        }
    }

    /// Reviews of a hotel: newest first, then username, then review id
    ///
    /// Empty for hotels without reviews.
    pub fn list(&self, hotel_id: &str) -> impl Iterator<Item = &Review> + '_ {
        self.reviews
            .get(hotel_id)
            .into_iter()
            .flat_map(|collection| collection.values())
    }

    /// Mean rating of a hotel, `0.0` if it has no reviews
    pub fn average_rating(&self, hotel_id: &str) -> f64 {
        match self.reviews.get(hotel_id) {
            Some(collection) if !collection.is_empty() => {
                let sum: u32 = collection.values().map(|r| u32::from(r.rating)).sum();
                f64::from(sum) / collection.len() as f64
            }
            _ => 0.0,
        }
    }

    /// Number of reviews stored for a hotel
    pub fn count(&self, hotel_id: &str) -> usize {
        self.reviews.get(hotel_id).map_or(0, BTreeMap::len)
    }

    /// Total number of reviews across all hotels
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
