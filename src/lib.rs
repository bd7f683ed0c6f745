//! Keeps the Node.js version list of a CI configuration file in sync with
//! the published Node.js releases.

pub mod config;
pub mod document;
pub mod error;
pub mod updater;
pub mod version;
