//! Command line interface for the mapping engine

pub mod commands;
pub mod error;
pub mod input;
