//! File export of production plans.

pub mod export;
