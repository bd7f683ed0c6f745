//! Shared test utilities

#![allow(dead_code)]

pub mod index;
pub mod travis;

pub use index::{NODE_INDEX, serve_index};
pub use travis::{TravisFile, read_versions};
