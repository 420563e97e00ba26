//! Utility functions shared by the session builder

pub mod file;
pub mod sql;
pub mod string;
