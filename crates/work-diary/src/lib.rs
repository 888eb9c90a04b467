//! work-diary library
//!
//! This module exports the core functionality of work-diary for use in
//! integration tests and as a library.

pub mod config;
pub mod diary;
pub mod entry;
pub mod prompt;
pub mod render;
