//! Transport layer for the REST wrapper.

pub mod http;

pub use http::{router, HttpTransport};
