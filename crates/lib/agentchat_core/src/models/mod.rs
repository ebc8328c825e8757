//! Shared data models.
//!
//! - [`chat`] — transcript messages and their history projection
//! - [`relay`] — relay request/response bodies and upstream reply extraction

pub mod chat;
pub mod relay;
