//! Easel: Concurrent Zone Artwork Generation
//!
//! Generates scene panels, backgrounds, and wildlife sprites for the zone-based
//! trail site by fanning independent generation requests out to the Google
//! image models under a bounded worker pool.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod invoker;
pub mod logging;
pub mod provider;
pub mod runner;
pub mod summary;
