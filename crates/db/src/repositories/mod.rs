mod favorite_concert_repo;
mod notification_repo;
mod notified_event_repo;
mod tracked_artist_repo;
mod user_repo;

pub use favorite_concert_repo::FavoriteConcertRepo;
pub use notification_repo::NotificationRepo;
pub use notified_event_repo::NotifiedEventRepo;
pub use tracked_artist_repo::{NewTrackedArtist, TrackedArtistRepo};
pub use user_repo::UserRepo;
