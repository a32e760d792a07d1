//! Utility functions
//!
//! Provides logging setup.

pub mod logging;
