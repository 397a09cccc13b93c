//! Prospector server: REST wrapper and terminal dashboard over the search engine.

pub mod config;
pub mod display;
pub mod error;
pub mod transport;

pub use config::{resolve_addr, resolve_credentials, resolve_csv_path, resolve_timeout};
pub use error::{ServerError, ServerResult};
pub use transport::{router, HttpTransport};
