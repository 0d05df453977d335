//! Synthetic concert catalog.
//!
//! Substitutes for the real upstream when no API key is configured. Artist
//! checks produce a fake "new concert" with a configurable probability per
//! call so the whole notification pipeline can be exercised end to end;
//! search returns a deterministic listing derived from a fixed artist
//! roster.

use rand::Rng;
use serde::Serialize;

use crate::event::{
    ArtistRef, ConcertEvent, EventArtist, EventPage, PriceRange, SearchQuery, TicketInfo, Venue,
    VenueLocation,
};
use crate::{CatalogError, ConcertCatalog};

/// A roster entry used for artist search and the deterministic listing.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MockArtist {
    pub id: &'static str,
    pub name: &'static str,
    pub image: &'static str,
    pub followers: &'static str,
    pub genre: &'static str,
}

/// Fixed artist roster backing search results in mock mode.
pub const MOCK_ARTISTS: &[MockArtist] = &[
    MockArtist { id: "artist1", name: "The Killers", image: "https://via.placeholder.com/150/FF6B6B/FFFFFF?text=Killers", followers: "2.5M", genre: "Rock" },
    MockArtist { id: "artist2", name: "Arctic Monkeys", image: "https://via.placeholder.com/150/4ECDC4/FFFFFF?text=AM", followers: "3.1M", genre: "Rock" },
    MockArtist { id: "artist3", name: "Norah Jones", image: "https://via.placeholder.com/150/45B7D1/FFFFFF?text=Norah", followers: "1.8M", genre: "Jazz" },
    MockArtist { id: "artist4", name: "Martin Garrix", image: "https://via.placeholder.com/150/F7DC6F/000000?text=MG", followers: "4.2M", genre: "EDM" },
    MockArtist { id: "artist5", name: "David Guetta", image: "https://via.placeholder.com/150/BB8FCE/FFFFFF?text=DG", followers: "3.9M", genre: "EDM" },
    MockArtist { id: "artist6", name: "Kendrick Lamar", image: "https://via.placeholder.com/150/E74C3C/FFFFFF?text=KL", followers: "8.7M", genre: "Hip Hop" },
    MockArtist { id: "artist7", name: "J. Cole", image: "https://via.placeholder.com/150/3498DB/FFFFFF?text=JC", followers: "7.2M", genre: "Hip Hop" },
    MockArtist { id: "artist8", name: "Beyoncé", image: "https://via.placeholder.com/150/9B59B6/FFFFFF?text=Bey", followers: "6.8M", genre: "R&B" },
];

/// Venues cycled through when generating the deterministic listing.
const MOCK_VENUES: &[(&str, &str, &str)] = &[
    ("Madison Square Garden", "New York", "USA"),
    ("Barclays Center", "New York", "USA"),
    ("Radio City Music Hall", "New York", "USA"),
    ("Brooklyn Steel", "New York", "USA"),
    ("Terminal 5", "New York", "USA"),
];

/// Concerts generated per roster artist in the listing.
const CONCERTS_PER_ARTIST: i64 = 3;

/// Catalog that fabricates events locally.
pub struct SyntheticCatalog {
    /// Probability, per `events_for_artist` call, that a new synthetic
    /// event is produced. `0.0` disables the new-concert path entirely;
    /// `1.0` forces it.
    probability: f64,
}

impl SyntheticCatalog {
    pub fn new(probability: f64) -> Self {
        Self { probability }
    }

    /// Fabricate a "just announced" event for the artist.
    ///
    /// The id embeds the current millisecond timestamp, so repeated rolls
    /// produce distinct events.
    fn new_concert_for(&self, artist: &ArtistRef) -> ConcertEvent {
        let announced = chrono::Utc::now();
        ConcertEvent {
            id: format!("new-{}-{}", announced.timestamp_millis(), artist.id),
            title: format!("New {} Concert!", artist.name),
            artists: vec![EventArtist {
                name: artist.name.clone(),
                id: artist.id.clone(),
                image: artist.image.clone().unwrap_or_default(),
            }],
            venue: Venue {
                name: "New Venue".to_string(),
                location: VenueLocation {
                    address: None,
                    city: "New York".to_string(),
                    country: "USA".to_string(),
                    coordinates: None,
                },
            },
            date_time: (announced + chrono::Duration::days(30)).to_rfc3339(),
            ticket_info: TicketInfo {
                url: None,
                price_range: None,
                on_sale: true,
            },
            attendees: rand::rng().random_range(100..5100),
            genre: artist.genre.clone().unwrap_or_else(|| "Music".to_string()),
        }
    }

    /// The full deterministic listing before filtering and pagination.
    fn all_mock_concerts(&self, city: &str) -> Vec<ConcertEvent> {
        let mut concerts = Vec::new();
        for (artist_index, artist) in MOCK_ARTISTS.iter().enumerate() {
            for n in 0..CONCERTS_PER_ARTIST {
                let venue_index = (artist_index as i64 + n) as usize % MOCK_VENUES.len();
                let (venue_name, venue_city, country) = MOCK_VENUES[venue_index];
                let days_out = 7 + (artist_index as i64 * CONCERTS_PER_ARTIST + n) * 4;
                concerts.push(ConcertEvent {
                    id: format!("mock-{}-{n}", artist.id),
                    title: format!("{} at {}", artist.name, venue_name),
                    artists: vec![EventArtist {
                        name: artist.name.to_string(),
                        id: artist.id.to_string(),
                        image: artist.image.to_string(),
                    }],
                    venue: Venue {
                        name: venue_name.to_string(),
                        location: VenueLocation {
                            address: None,
                            city: if city.is_empty() {
                                venue_city.to_string()
                            } else {
                                city.to_string()
                            },
                            country: country.to_string(),
                            coordinates: None,
                        },
                    },
                    date_time: (chrono::Utc::now() + chrono::Duration::days(days_out))
                        .to_rfc3339(),
                    ticket_info: TicketInfo {
                        url: None,
                        price_range: Some(PriceRange {
                            min: 45.0 + (n * 20) as f64,
                            max: 150.0 + (n * 50) as f64,
                            currency: "USD".to_string(),
                        }),
                        on_sale: true,
                    },
                    attendees: 100 + (artist_index as i64 * 613 + n * 97) % 5000,
                    genre: artist.genre.to_string(),
                });
            }
        }
        concerts
    }
}

impl Default for SyntheticCatalog {
    /// Matches the reference behavior: 10% chance per check.
    fn default() -> Self {
        Self::new(0.1)
    }
}

#[async_trait::async_trait]
impl ConcertCatalog for SyntheticCatalog {
    async fn events_for_artist(
        &self,
        artist: &ArtistRef,
    ) -> Result<Vec<ConcertEvent>, CatalogError> {
        if rand::rng().random::<f64>() < self.probability {
            Ok(vec![self.new_concert_for(artist)])
        } else {
            Ok(vec![])
        }
    }

    async fn search_events(&self, query: &SearchQuery) -> Result<EventPage, CatalogError> {
        let mut concerts = self.all_mock_concerts(&query.city);

        if let Some(genre) = &query.genre {
            let needle = genre.to_lowercase();
            concerts.retain(|c| c.genre.to_lowercase().contains(&needle));
        }

        let total = concerts.len() as i64;
        let size = query.size.max(1);
        let total_pages = (total + size - 1) / size;
        let start = (query.page * size).clamp(0, total) as usize;
        let end = ((query.page + 1) * size).clamp(0, total) as usize;
        let page_items = concerts[start..end].to_vec();

        Ok(EventPage {
            concerts: page_items,
            total,
            page: query.page,
            total_pages,
            has_next_page: query.page < total_pages - 1,
            page_size: size,
            city: query.city.clone(),
        })
    }

    fn source(&self) -> &'static str {
        "Mock Data"
    }
}
