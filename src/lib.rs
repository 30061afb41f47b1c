//! Merit-order production planning for a power plant roster.

#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod io;
/// Cost model, merit-order ranking and stepped dispatch.
pub mod plan;
pub mod request;
