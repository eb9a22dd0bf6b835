//! Domain logic

pub mod filter;
