//! A tiny blocking HTTP GET helper for test suites.
//!
//! [`SimpleRequest`] resolves relative paths against a fixed base location and
//! returns the response body either as text or as a decoded property set.
pub mod client;
pub mod errors;
pub mod net;
pub mod properties;

pub use client::SimpleRequest;
pub use errors::{PropertiesError, RequestError};
pub use properties::Properties;
