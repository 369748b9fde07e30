//! Client-side application state.
//!
//! DESIGN
//! ======
//! State is split by concern so the host can depend on small focused
//! models: `session` owns the auth state machine, `gate` and `nav`
//! decide what may render, `products` and `users` hold per-screen
//! fetch state.

pub mod gate;
pub mod nav;
pub mod products;
pub mod session;
pub mod users;
