//! Shared utilities

pub mod sample_data;
