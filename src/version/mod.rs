//! Version selection layer
//!
//! This module fetches the published version index, selects the versions a
//! match specification asks for and merges them into an existing list.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│   Matcher   │────▶│   Merger    │
//! │  (fetch)    │     │  (select)   │     │ (combine)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │
//!        ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐
//! │ Registries  │     │    Range    │
//! │ (node dist) │     │(semver expr)│
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`catalog`]: Catalog entries and match specifications
//! - [`matcher`]: Range/date filtering with a cap per major version
//! - [`merger`]: Replace-or-prepend merge of version lists
//! - [`range`]: npm-style semver range expressions
//! - [`registry`]: Catalog source trait for fetching the version index
//! - [`registries`]: Concrete catalog sources
//! - [`error`]: Error types for matching and fetching
//! - [`semver`]: Shared semver utilities

pub mod catalog;
pub mod error;
pub mod matcher;
pub mod merger;
pub mod range;
pub mod registries;
pub mod registry;
pub mod semver;
