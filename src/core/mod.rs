//! # Core Application Logic
//!
//! This module contains Lectio's reading logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Corpus (data model)  │
//!                    │  • State (cursor)       │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   Server   │      │  Pronoun   │
//!     │  Adapter   │      │  (axum)    │      │  passes    │
//!     │ (ratatui)  │      │            │      │ (offline)  │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`corpus`]: `Corpus` / `Book` / `Chapter` and id lookups
//! - [`verse`]: verse-marker segmentation and the display filter
//! - [`navigation`]: previous/next chapter across book boundaries
//! - [`state`]: the `App` struct and its navigation cursor
//! - [`action`]: the `Action` enum and `update()` reducer
//! - [`config`]: layered configuration (config.rs does read files)

pub mod action;
pub mod config;
pub mod corpus;
pub mod navigation;
pub mod state;
pub mod verse;
