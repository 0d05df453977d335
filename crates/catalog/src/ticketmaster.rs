//! Ticketmaster Discovery API client.
//!
//! Maps Discovery v2 `events.json` responses into [`ConcertEvent`]s. The
//! response mapping lives in free functions over deserialized structs so it
//! can be tested against canned JSON without a network.

use std::time::Duration;

use rand::Rng;
use serde::Deserialize;

use crate::event::{
    ArtistRef, ConcertEvent, Coordinates, EventArtist, EventPage, PriceRange, SearchQuery,
    TicketInfo, Venue, VenueLocation,
};
use crate::{CatalogError, ConcertCatalog};

const BASE_URL: &str = "https://app.ticketmaster.com/discovery/v2";

/// Fallback artist image when the attraction has none.
const PLACEHOLDER_ARTIST_IMAGE: &str = "https://via.placeholder.com/150/666666/FFFFFF?text=Artist";

/// Catalog backed by the Ticketmaster Discovery API.
pub struct TicketmasterCatalog {
    client: reqwest::Client,
    api_key: String,
}

impl TicketmasterCatalog {
    /// Build a client with the given API key and per-request timeout.
    ///
    /// The timeout bounds every catalog call so a slow upstream turns into
    /// a per-artist check failure instead of a stalled poller run.
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_key })
    }

    async fn fetch_events(&self, params: &[(&str, String)]) -> Result<EventsResponse, CatalogError> {
        let url = format!("{BASE_URL}/events.json");
        tracing::debug!(url = %url, "Fetching events from upstream");
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<EventsResponse>().await?)
    }
}

#[async_trait::async_trait]
impl ConcertCatalog for TicketmasterCatalog {
    async fn events_for_artist(
        &self,
        artist: &ArtistRef,
    ) -> Result<Vec<ConcertEvent>, CatalogError> {
        let params = [
            ("apikey", self.api_key.clone()),
            ("attractionId", artist.id.clone()),
            ("classificationName", "music".to_string()),
            ("sort", "date,asc".to_string()),
            ("size", "20".to_string()),
        ];

        let response = self.fetch_events(&params).await?;
        map_events(response)
    }

    async fn search_events(&self, query: &SearchQuery) -> Result<EventPage, CatalogError> {
        let mut params = vec![
            ("apikey", self.api_key.clone()),
            ("classificationName", "music".to_string()),
            ("city", query.city.clone()),
            ("size", query.size.to_string()),
            ("page", query.page.to_string()),
            ("sort", "date,asc".to_string()),
        ];
        if let Some(genre) = &query.genre {
            params.push(("keyword", genre.clone()));
        }
        if let Some(date) = &query.date {
            params.push((
                "localStartDateTime",
                format!("{date}T00:00:00,{date}T23:59:59"),
            ));
        }

        let response = self.fetch_events(&params).await?;
        map_page(response, query)
    }

    fn source(&self) -> &'static str {
        "Ticketmaster API"
    }
}

// ---------------------------------------------------------------------------
// Response mapping
// ---------------------------------------------------------------------------

/// Map a full Discovery response into our event list.
fn map_events(response: EventsResponse) -> Result<Vec<ConcertEvent>, CatalogError> {
    let events = match response.embedded {
        Some(embedded) => embedded.events,
        None => return Ok(vec![]),
    };
    events.into_iter().map(map_event).collect()
}

/// Map a Discovery response into a search result page.
fn map_page(response: EventsResponse, query: &SearchQuery) -> Result<EventPage, CatalogError> {
    let page_meta = response.page.clone();
    let concerts = map_events(response)?;

    let total = page_meta
        .as_ref()
        .map(|p| p.total_elements)
        .unwrap_or(concerts.len() as i64);
    let total_pages = page_meta.as_ref().map(|p| p.total_pages).unwrap_or_else(|| {
        if query.size > 0 {
            (total + query.size - 1) / query.size
        } else {
            0
        }
    });

    Ok(EventPage {
        concerts,
        total,
        page: query.page,
        total_pages,
        has_next_page: query.page < total_pages - 1,
        page_size: query.size,
        city: query.city.clone(),
    })
}

fn map_event(event: TmEvent) -> Result<ConcertEvent, CatalogError> {
    let embedded = event.embedded.unwrap_or_default();

    let artists = match embedded.attractions {
        Some(attractions) if !attractions.is_empty() => attractions
            .into_iter()
            .map(|a| EventArtist {
                name: a.name,
                id: a.id.unwrap_or_else(|| "unknown".to_string()),
                image: a
                    .images
                    .and_then(|imgs| imgs.into_iter().next())
                    .map(|img| img.url)
                    .unwrap_or_else(|| PLACEHOLDER_ARTIST_IMAGE.to_string()),
            })
            .collect(),
        _ => vec![EventArtist {
            name: "Various Artists".to_string(),
            id: "unknown".to_string(),
            image: PLACEHOLDER_ARTIST_IMAGE.to_string(),
        }],
    };

    let venue = embedded
        .venues
        .and_then(|venues| venues.into_iter().next())
        .ok_or_else(|| CatalogError::Malformed(format!("event {} has no venue", event.id)))?;

    let date_time = match (event.dates.start.date_time, event.dates.start.local_date) {
        (Some(dt), _) => dt,
        (None, Some(local)) => format!("{local}T20:00:00"),
        (None, None) => {
            return Err(CatalogError::Malformed(format!(
                "event {} has no start date",
                event.id
            )))
        }
    };

    let on_sale = event
        .dates
        .status
        .and_then(|s| s.code)
        .is_some_and(|code| code == "onsale");

    let genre = event
        .classifications
        .and_then(|cs| cs.into_iter().next())
        .and_then(|c| c.genre)
        .map(|g| g.name)
        .unwrap_or_else(|| "Music".to_string());

    Ok(ConcertEvent {
        id: event.id,
        title: event.name,
        artists,
        venue: Venue {
            name: venue.name,
            location: VenueLocation {
                address: venue.address.and_then(|a| a.line1),
                city: venue.city.map(|c| c.name).unwrap_or_else(|| "Unknown".to_string()),
                country: venue
                    .country
                    .map(|c| c.name)
                    .unwrap_or_else(|| "Unknown".to_string()),
                coordinates: venue.location.and_then(|l| {
                    let latitude = l.latitude?.parse().ok()?;
                    let longitude = l.longitude?.parse().ok()?;
                    Some(Coordinates {
                        latitude,
                        longitude,
                    })
                }),
            },
        },
        date_time,
        ticket_info: TicketInfo {
            url: event.url,
            price_range: event
                .price_ranges
                .and_then(|prs| prs.into_iter().next())
                .map(|pr| PriceRange {
                    min: pr.min.unwrap_or(0.0),
                    max: pr.max.unwrap_or(0.0),
                    currency: pr.currency.unwrap_or_else(|| "USD".to_string()),
                }),
            on_sale,
        },
        // The upstream has no attendance figure; the client renders an
        // estimate, same as the mock data.
        attendees: rand::rng().random_range(100..5100),
        genre,
    })
}

// ---------------------------------------------------------------------------
// Discovery API response shapes (only the fields we read)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct EventsResponse {
    #[serde(rename = "_embedded")]
    embedded: Option<TmEmbedded>,
    page: Option<TmPage>,
}

#[derive(Debug, Deserialize)]
struct TmEmbedded {
    events: Vec<TmEvent>,
}

#[derive(Debug, Clone, Deserialize)]
struct TmPage {
    #[serde(rename = "totalElements")]
    total_elements: i64,
    #[serde(rename = "totalPages")]
    total_pages: i64,
}

#[derive(Debug, Deserialize)]
struct TmEvent {
    id: String,
    name: String,
    url: Option<String>,
    dates: TmDates,
    #[serde(rename = "_embedded")]
    embedded: Option<TmEventEmbedded>,
    #[serde(rename = "priceRanges")]
    price_ranges: Option<Vec<TmPriceRange>>,
    classifications: Option<Vec<TmClassification>>,
}

#[derive(Debug, Deserialize)]
struct TmDates {
    start: TmStart,
    status: Option<TmStatus>,
}

#[derive(Debug, Deserialize)]
struct TmStart {
    #[serde(rename = "dateTime")]
    date_time: Option<String>,
    #[serde(rename = "localDate")]
    local_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmStatus {
    code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TmEventEmbedded {
    attractions: Option<Vec<TmAttraction>>,
    venues: Option<Vec<TmVenue>>,
}

#[derive(Debug, Deserialize)]
struct TmAttraction {
    id: Option<String>,
    name: String,
    images: Option<Vec<TmImage>>,
}

#[derive(Debug, Deserialize)]
struct TmImage {
    url: String,
}

#[derive(Debug, Deserialize)]
struct TmVenue {
    name: String,
    address: Option<TmAddress>,
    city: Option<TmNamed>,
    country: Option<TmNamed>,
    location: Option<TmGeo>,
}

#[derive(Debug, Deserialize)]
struct TmAddress {
    line1: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmNamed {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TmGeo {
    latitude: Option<String>,
    longitude: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmPriceRange {
    min: Option<f64>,
    max: Option<f64>,
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmClassification {
    genre: Option<TmNamed>,
}
