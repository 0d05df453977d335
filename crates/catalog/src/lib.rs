//! Upstream concert catalog collaborator.
//!
//! The server consumes concert listings through the [`ConcertCatalog`]
//! trait so the upstream can be swapped by configuration: the real
//! Ticketmaster Discovery API when an API key is configured, or a
//! deterministic synthetic generator otherwise. Tests supply their own
//! implementations to force either path.

use async_trait::async_trait;

pub mod event;
pub mod synthetic;
pub mod ticketmaster;

pub use event::{ArtistRef, ConcertEvent, EventPage, SearchQuery};
pub use synthetic::SyntheticCatalog;
pub use ticketmaster::TicketmasterCatalog;

/// Errors from the upstream catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Transport-level failure (connect error, HTTP error status, timeout).
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream responded but the payload could not be interpreted.
    #[error("catalog returned malformed data: {0}")]
    Malformed(String),

    /// The upstream is not reachable in this configuration.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// A source of concert listings.
#[async_trait]
pub trait ConcertCatalog: Send + Sync {
    /// Upcoming events announced by the given artist.
    ///
    /// The caller decides which of these are new; the catalog only lists.
    async fn events_for_artist(&self, artist: &ArtistRef)
        -> Result<Vec<ConcertEvent>, CatalogError>;

    /// Paginated concert search for the public listing endpoint.
    async fn search_events(&self, query: &SearchQuery) -> Result<EventPage, CatalogError>;

    /// Label reported in list responses (`"Ticketmaster API"`, `"Mock Data"`).
    fn source(&self) -> &'static str;
}
