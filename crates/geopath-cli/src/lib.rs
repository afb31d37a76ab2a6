//! geopath CLI library.
//!
//! This crate provides the output formatting used by the `geopath` binary so
//! it can be unit tested without spawning the executable.

pub mod output;
