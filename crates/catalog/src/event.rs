//! Concert event shapes shared by all catalog implementations.
//!
//! Field naming matches the JSON the mobile client consumes (camelCase,
//! `dateTime` as an ISO-8601 string).

use serde::{Deserialize, Serialize};

/// Minimal artist identity used to query the catalog.
#[derive(Debug, Clone)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub genre: Option<String>,
}

/// Parameters for a paginated concert search. `page` is zero-indexed.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub city: String,
    pub genre: Option<String>,
    pub date: Option<String>,
    pub page: i64,
    pub size: i64,
}

/// One page of concert search results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPage {
    pub concerts: Vec<ConcertEvent>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
    pub page_size: i64,
    pub city: String,
}

/// A concert/event listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcertEvent {
    pub id: String,
    pub title: String,
    pub artists: Vec<EventArtist>,
    pub venue: Venue,
    /// ISO-8601 start time. Kept as a string: upstream sometimes supplies
    /// only a local date, which gets a synthesized evening start time.
    pub date_time: String,
    pub ticket_info: TicketInfo,
    pub attendees: i64,
    pub genre: String,
}

/// An artist attached to an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventArtist {
    pub name: String,
    pub id: String,
    pub image: String,
}

/// Venue of an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    pub location: VenueLocation,
}

/// Venue address details. Address and coordinates are best-effort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub city: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Ticketing details for an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    pub on_sale: bool,
}

/// Price range for an event's tickets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    pub currency: String,
}
