//! Utility functions shared across the codebase

pub mod ordered;

// Re-export commonly used utilities
pub use ordered::OrderedSet;
