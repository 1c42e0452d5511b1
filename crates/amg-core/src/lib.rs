//! Core types for amg.
//!
//! This crate holds the domain model shared by the locator, the fetch runner
//! and the status reporter. Nothing in here touches the filesystem beyond
//! path manipulation, and nothing spawns processes.

pub mod repo;
pub mod status;
