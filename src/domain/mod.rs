pub mod message;
pub mod post;
pub mod reel;
pub mod story;
pub mod user;
