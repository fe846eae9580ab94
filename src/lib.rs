//! Lectio library exports for testing

pub mod api;
pub mod core;
pub mod pronouns;
pub mod server;
pub mod tui;

#[cfg(test)]
pub mod test_support;
