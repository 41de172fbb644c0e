pub mod endpoint;
pub mod loader;
pub mod payload;

pub use endpoint::{FeedEndpoint, ARTICLE_FEED_PATH, SPOTLIGHT_FEED_PATH};
pub use loader::{Feed, FeedLoader, FeedTransport, HttpTransport, LoaderConfig};
pub use payload::FeedPayload;

pub mod prelude {
    pub use crate::endpoint::FeedEndpoint;
    pub use crate::loader::{Feed, FeedLoader, LoaderConfig};
}
