//! Typed client for the marketplace REST API.
//!
//! `types` holds the data records shared with screen state; `api` holds
//! the trait seam and the reqwest implementation.

pub mod api;
pub mod types;
