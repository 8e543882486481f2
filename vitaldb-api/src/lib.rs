//! A barebones client for the VitalDB REST API.
#![deny(missing_docs)]

mod client;
pub use client::*;

mod case;
pub use case::*;

mod signal;
pub use signal::*;

mod request;
