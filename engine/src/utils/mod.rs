//! Utility functions

pub mod string;
pub mod time;
