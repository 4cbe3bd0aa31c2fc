//! Port implementations.

pub mod http;

pub use http::HttpStorageGateway;
