//! # Bean Recipe
//!
//! > **A recipe for wiring in-process object graphs in Rust.**
//!
//! This crate is a sample application built on [`bean_framework`]. It declares a
//! small service graph, registers it at startup and resolves it, circular
//! references included.
//!
//! ## Design Philosophy
//!
//! Components never construct their collaborators. Each record states which of
//! its fields take a literal and which take another bean, and the container
//! does the rest: it creates every bean once, on first access, and hands out
//! shared references so that every holder sees the same instance.
//!
//! ## Module Tour
//!
//! ### 1. The Graph ([`model`])
//! The services themselves: [`Settings`](model::Settings),
//! [`Database`](model::Database), [`UserService`](model::UserService) and
//! [`AuditLog`](model::AuditLog). The last two reference each other.
//!
//! ### 2. The Startup Routine ([`lifecycle`])
//! - [`AppContext`](lifecycle::AppContext) owns the container, registers the graph
//!   and resolves it into [`Services`](lifecycle::Services).
//! - [`SharedContainer`](lifecycle::SharedContainer) puts a container behind an
//!   async mutex for concurrent resolution from Tokio tasks.
//!
//! ### 3. Configuration ([`config`])
//! Literal overrides read from the environment.
//!
//! ## Quick Start
//!
//! ```bash
//! # Lifecycle transitions
//! RUST_LOG=info cargo run
//!
//! # Every field of every bean, with a different port
//! RUST_LOG=debug BEAN_RECIPE_OVERRIDES='{"settings": {"port": "9090"}}' cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test --workspace
//! ```

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
