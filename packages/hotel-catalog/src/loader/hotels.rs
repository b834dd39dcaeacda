//! Hotel list loader
//!
//! ```json
//! {"sr": [{"id": "25622", "f": "Hilton San Francisco Union Square",
//!          "ci": "San Francisco", "pr": "CA", "ad": "55 Cyril Magnin St",
//!          "ll": {"lat": "37.78", "lng": "-122.4"}}]}
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use super::JsonScalar;
use crate::{Catalog, CatalogError, Result};

#[derive(Debug, Deserialize)]
struct HotelListDocument {
    sr: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct HotelEntry {
    id: JsonScalar,
    f: String,
    ci: String,
    pr: String,
    ad: String,
    ll: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: JsonScalar,
    lng: JsonScalar,
}

/// One hotel of the hotel list
#[derive(Debug, Clone, PartialEq)]
pub struct HotelRecord {
    pub hotel_id: String,
    pub name: String,
    pub city: String,
    pub state: String,
    pub street_address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl HotelEntry {
    fn into_record(self) -> Result<HotelRecord> {
        let hotel_id = self.id.into_string();
        let latitude = self.ll.lat.as_f64().ok_or_else(|| {
            CatalogError::serialization(format!("Hotel {}: latitude is not a number", hotel_id))
        })?;
        let longitude = self.ll.lng.as_f64().ok_or_else(|| {
            CatalogError::serialization(format!("Hotel {}: longitude is not a number", hotel_id))
        })?;

        Ok(HotelRecord {
            hotel_id,
            name: self.f,
            city: self.ci,
            state: self.pr,
            street_address: self.ad,
            latitude,
            longitude,
        })
    }
}

/// Parse a hotel list document
///
/// Entries that do not match the schema are logged and skipped.
///
/// # Errors
///
/// `Serialization` if the document itself is not `{"sr": [...]}`.
pub fn parse_hotels(content: &str) -> Result<Vec<HotelRecord>> {
    let document: HotelListDocument = serde_json::from_str(content)?;

    let mut records = Vec::with_capacity(document.sr.len());
    for (position, value) in document.sr.into_iter().enumerate() {
        let record = serde_json::from_value::<HotelEntry>(value)
            .map_err(CatalogError::from)
            .and_then(HotelEntry::into_record);
        match record {
            Ok(record) => records.push(record),
            Err(err) => warn!("Skipping hotel entry #{}: {}", position, err),
        }
    }
    Ok(records)
}

/// Read the hotel list at `path` into the catalog
///
/// Returns the number of hotel entries added (replacements included).
pub fn load_hotels(catalog: &mut Catalog, path: &Path) -> Result<usize> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        CatalogError::io(format!("Could not read hotel file {}", path.display())).with_source(err)
    })?;

    let records = parse_hotels(&content).map_err(|err| {
        CatalogError::serialization(format!("Could not parse hotel file {}", path.display()))
            .with_source(err)
    })?;

    let count = records.len();
    for record in records {
        catalog.add_hotel(
            record.hotel_id,
            record.name,
            record.city,
            record.state,
            record.street_address,
            record.latitude,
            record.longitude,
        );
    }
    Ok(count)
}
