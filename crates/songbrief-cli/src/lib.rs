//! SongBrief CLI library.
//!
//! This crate provides the core functionality for the `songbrief` binary:
//! data directory configuration, analysis file loading, and the commands
//! that turn analyses into Suno prompt packs and article drafts.

pub mod commands;
pub mod config;
pub mod input;
