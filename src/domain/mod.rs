//! Domain model of the bundle quote engine.
//!
//! Everything in here is pure: the only I/O boundary is the `CatalogGateway`
//! port, which the application layer drives.

pub mod bundle;
pub mod cart;
pub mod ports;
pub mod pricing;
pub mod product;
pub mod quote;
