//! Command handlers. Each delegates to the composed core facade.

pub mod chat;
pub mod files;
pub mod formats;
pub mod pull;
