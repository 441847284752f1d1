// ORM Schema
pub mod schema;

// ORM Models
pub mod bookmark;
pub mod message;
pub mod tag;
pub mod user;

// Queries
pub mod search;

// Driver
pub mod connection;

pub use search::{get_bookmark_detail, load_user_bookmarks, BookmarkDetail};
