pub mod favorite_concert;
pub mod notification;
pub mod tracked_artist;
pub mod user;

pub use favorite_concert::FavoriteConcert;
pub use notification::Notification;
pub use tracked_artist::TrackedArtist;
pub use user::User;
