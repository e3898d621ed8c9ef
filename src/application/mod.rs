//! Application layer orchestrating quote computations.
//!
//! `QuoteEngine` is the single pricing pipeline. The reservation and order
//! handlers are thin call sites that translate their own request and response
//! shapes around it.

pub mod engine;
pub mod order;
pub mod reservation;
