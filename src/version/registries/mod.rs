//! Catalog source implementations

pub mod node_dist;

pub use node_dist::NodeDistRegistry;
