//! Product entity wiring for the resource actor, plus product-level errors.

pub mod entity;
pub mod error;

pub use error::*;
