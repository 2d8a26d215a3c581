pub mod auth;
pub mod engagement;
pub mod feed;
pub mod messages;
pub mod posts;
pub mod reels;
pub mod stories;
pub mod users;
