pub mod artist;
pub mod auth;
pub mod concert;
pub mod notification;
