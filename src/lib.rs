//! # marketdesk
//!
//! Headless application core for the marketplace desktop client.
//! Owns client-side session state, access control, navigation, and
//! screen state; all real work is proxied to the remote marketplace
//! HTTP API. A host shell mounts this crate and drives rendering; the
//! crate itself has no entry point and no rendering dependencies.

pub mod config;
pub mod net;
pub mod state;
pub mod util;
