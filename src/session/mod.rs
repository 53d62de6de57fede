//! Stored credentials read by the HTTP client
//!
//! The API client only needs to read the bearer token and to forget the
//! session when the server rejects it; where the session lives is up to the
//! `TokenStore` implementation.

mod store;

pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};

#[cfg(test)]
pub use store::{MockTokenStore, Session};
