//! Primary index: hotel id → hotel, ascending by id

use std::collections::BTreeMap;

use tracing::debug;

use super::{Address, Hotel};

/// Ordered hotel index
///
/// Ids are compared as plain strings, so `"10"` sorts before `"9"`.
#[derive(Debug, Clone, Default)]
pub struct HotelIndex {
    hotels: BTreeMap<String, Hotel>,
}

impl HotelIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the hotel stored under `id`
    ///
    /// Returns the replaced record, if any.
    pub fn put(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        address: Address,
    ) -> Option<Hotel> {
        let hotel = Hotel::new(id, name, address);
        let replaced = self.hotels.insert(hotel.id.clone(), hotel);
        if let Some(previous) = &replaced {
            debug!("Replaced hotel {} ({})", previous.id, previous.name);
        }
        replaced
    }

    pub fn get(&self, id: &str) -> Option<&Hotel> {
        self.hotels.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.hotels.contains_key(id)
    }

    /// Hotel ids in ascending order
    ///
    /// Borrows the index; call again to restart the traversal.
    pub fn list(&self) -> impl Iterator<Item = &str> + '_ {
        self.hotels.keys().map(String::as_str)
    }

    /// Hotels in ascending id order
    pub fn hotels(&self) -> impl Iterator<Item = &Hotel> + '_ {
        self.hotels.values()
    }

    pub fn len(&self) -> usize {
        self.hotels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty()
    }
}
