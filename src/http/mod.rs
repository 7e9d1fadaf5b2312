//! HTTP client module and its error taxonomy.

mod client;
mod error;

pub use client::HttpClient;
pub use error::{FetchError, classify_error};
