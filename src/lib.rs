//! A deterministic generator for the synthetic COVID-19 teaching dataset
//!
//! The crate produces five mutually consistent CSV tables — daily case
//! accounting per country, hospital demand and capacity per state,
//! vaccination rollout, testing volume and static demographics — from a
//! single integer seed and a date range. The same seed and configuration
//! reproduce the output byte for byte.
//!
//! The central object is the [`Context`](context::Context), which owns the
//! seeded random streams, the loaded parameters and the report writers.
//! Generation runs as a fixed pipeline of modules:
//! * The country registry defines the 20 countries, their demographics and
//!   the iteration order that fixes how the random streams are consumed.
//! * The vaccination model builds each country's rollout and the coverage
//!   trajectory it implies.
//! * The epidemic curve model superposes randomized waves into daily case,
//!   death and recovery series, damping later waves by vaccination
//!   coverage.
//! * The hospital and testing models derive demand series from the case
//!   curves.
//! * The consistency pass recomputes all cumulative and active fields so
//!   the published invariants hold exactly, and the report module writes
//!   the tables as CSV.

pub mod consistency;
pub mod context;
pub mod countries;
pub mod epi_curve;
pub mod error;
pub mod global_properties;
pub mod hashing;
pub mod hospital;
pub mod log;
pub mod parameters;
pub mod prelude;
pub mod random;
pub mod report;
pub mod runner;
pub mod tables;
pub mod testing;
pub mod vaccination;

pub mod generator;

pub use context::Context;
pub use error::DatagenError;
