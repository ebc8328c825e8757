//! Request handlers.

pub mod hello;
pub mod proxy;
