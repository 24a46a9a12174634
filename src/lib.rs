pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod parse;
pub mod protocol;
pub mod sports;
pub mod transport;
pub mod types;
pub mod utils;

pub use auth::{Credentials, authenticate};
pub use config::ClientConfig;
pub use error::{Error, ParseError};
pub use fetch::{FetchOptions, PaginationEngine};
pub use protocol::{ChunkFetcher, PageSource};
pub use transport::{HttpTransport, Transport};
pub use types::{Cursor, FetchOutcome, Point, SkipScope, Skipped, Workout};
