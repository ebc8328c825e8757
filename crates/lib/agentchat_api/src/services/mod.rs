//! Business logic services.

pub mod relay;
