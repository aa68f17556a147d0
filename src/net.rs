//! src/net.rs
//!
//! Network-facing collaborators: the price fetcher and the remote control port.

pub mod fetch;
pub mod remote;

pub use fetch::{Currency, DemoSource, ElprisetClient, PriceArea, PriceSource};
