//! Shared helpers for staging files into bundles.

pub mod fs;
