//! Utility functions shared by the pipeline stages.
//!
//! - [`keyword_normalizer`] - Free-text keyword to AND-query normalization
//! - [`csv`] - CSV encoding of result records

pub mod csv;
pub mod keyword_normalizer;
