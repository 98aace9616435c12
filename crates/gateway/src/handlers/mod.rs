//! Request handlers

pub mod ask;
pub mod docs;
pub mod health;
