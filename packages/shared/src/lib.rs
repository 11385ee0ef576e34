//! Shared utilities for the Tujifund chat packages.

pub mod logger;
pub mod time;
