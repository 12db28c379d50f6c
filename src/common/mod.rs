//! Common utilities shared by both acquirers

pub mod fs;
