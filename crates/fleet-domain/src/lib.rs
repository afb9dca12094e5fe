//! Domain services for the fleet register
//!
//! Everything here is a pure function over `AppState`; persisting the
//! result is the caller's job.

pub mod service;

pub use service::*;
