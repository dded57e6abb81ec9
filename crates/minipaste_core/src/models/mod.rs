//! Data models for the stored paste.

/// The artifact held by the store and the pipeline output that precedes it.
pub mod artifact;
#[cfg(test)]
mod tests;
