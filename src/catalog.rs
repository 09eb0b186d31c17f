// Catalog assembly: locally authored descriptive entries merged with the
// authoritative records served by the backend.

use serde::{Deserialize, Serialize};

/// Locally authored descriptive entry: copy, imagery, and the extra-guest
/// rate card. Transactional fields (price, capacity, identity) live on the
/// backend record instead.
#[derive(Debug, Clone)]
pub struct LocalCaravan {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub base_guests: u32,
    pub extra_person_price: f64,
}

/// Record served by `GET /api/caravans`. Owned by the backend; this client
/// only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteCaravan {
    pub id: String,
    pub host_id: String,
    pub name: String,
    pub location: String,
    pub capacity: u32,
    pub daily_rate: f64,
    pub amenities: Vec<String>,
    pub photos: Vec<String>,
    pub status: String,
}

/// Merged unit as listed and booked. Descriptive fields come from the local
/// entry, transactional fields from the backend record. Built once per
/// catalog load and immutable for the rest of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct CaravanView {
    pub local_id: u32,
    /// Backend identity used for reservations. A unit without one cannot
    /// be booked.
    pub remote_id: Option<String>,
    pub name: String,
    pub location: String,
    pub description: String,
    pub image_url: String,
    pub base_price: f64,
    pub base_guests: u32,
    pub extra_person_price: f64,
    pub max_guests: u32,
}

/// Pairs the two datasets by position, up to the shorter length; excess
/// entries on either side are dropped without complaint. There is no
/// identity check: both lists must stay in the same order, or unrelated
/// units get merged.
pub fn merge_catalog(local: &[LocalCaravan], remote: &[RemoteCaravan]) -> Vec<CaravanView> {
    local
        .iter()
        .zip(remote.iter())
        .map(|(entry, record)| CaravanView {
            local_id: entry.id,
            remote_id: Some(record.id.clone()),
            name: entry.name.clone(),
            location: record.location.clone(),
            description: entry.description.clone(),
            image_url: entry.image_url.clone(),
            base_price: record.daily_rate,
            // capacity is authoritative; the included-guest count must fit in it
            base_guests: entry.base_guests.min(record.capacity),
            extra_person_price: entry.extra_person_price,
            max_guests: record.capacity,
        })
        .collect()
}

/// The built-in descriptive dataset, in the same order as the backend's
/// seed catalog.
pub fn local_catalog() -> Vec<LocalCaravan> {
    vec![
        LocalCaravan {
            id: 1,
            name: "Modern Explorer".to_string(),
            description: "A sleek two-berth caravan with a full kitchenette, \
                          ideal for city-adjacent weekend escapes."
                .to_string(),
            image_url: "/images/modern-explorer.jpg".to_string(),
            base_guests: 2,
            extra_person_price: 10_000.0,
        },
        LocalCaravan {
            id: 2,
            name: "Family Voyager".to_string(),
            description: "Spacious six-berth layout with bunk beds, an awning, \
                          and storage for a whole family's gear."
                .to_string(),
            image_url: "/images/family-voyager.jpg".to_string(),
            base_guests: 4,
            extra_person_price: 15_000.0,
        },
        LocalCaravan {
            id: 3,
            name: "Retro Adventurer".to_string(),
            description: "A lovingly restored classic with wood panelling and \
                          a compact galley. Slow travel, in style."
                .to_string(),
            image_url: "/images/retro-adventurer.jpg".to_string(),
            base_guests: 2,
            extra_person_price: 8_000.0,
        },
        LocalCaravan {
            id: 4,
            name: "Offroad Beast".to_string(),
            description: "Reinforced chassis and all-terrain tyres for camps \
                          far beyond the paved road."
                .to_string(),
            image_url: "/images/offroad-beast.jpg".to_string(),
            base_guests: 2,
            extra_person_price: 20_000.0,
        },
    ]
}
