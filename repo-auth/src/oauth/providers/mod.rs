//! Provider implementations.

pub mod github;
pub mod gitlab;
