//! Report queries and count sources

pub mod operations;
