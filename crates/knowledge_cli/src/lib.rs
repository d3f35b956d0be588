//! Knowledge CLI library exports.
//!
//! The binary is a thin dispatcher over these modules, which keeps every
//! command testable without spawning a process.

pub mod commands;
pub mod config;
pub mod errors;
