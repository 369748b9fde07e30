//! Small host-facing utilities.

pub mod token_store;
