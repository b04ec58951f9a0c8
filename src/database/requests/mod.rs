//! Request and user loading

pub mod operations;
