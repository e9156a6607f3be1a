//! # Catalog Server Library
//!
//! Dependency injection wiring, demo data seeding, metrics export, and
//! startup helpers for the catalog server binary.

pub mod app;
pub mod di;
pub mod seed;
pub mod startup;
