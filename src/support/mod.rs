//! Cross-cutting helpers: error types and shutdown signalling

pub mod errors;
pub mod shutdown;
