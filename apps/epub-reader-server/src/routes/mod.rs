//! Route modules for the EPUB Reader server

pub mod epub;
pub mod health;
pub mod manifest;
pub mod publications;
