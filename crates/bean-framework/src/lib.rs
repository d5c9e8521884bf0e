//! # Bean Framework
//!
//! This crate assembles in-process object graphs. Given named factories and a
//! per-record table of field directives, the [`Container`] constructs
//! component instances ("beans"), wires their structural dependencies to other
//! named beans (circular references included) and fills scalar fields from
//! literal values.
//!
//! ## Architecture Overview
//!
//! The crate separates concerns into four parts:
//!
//! 1. **Description** ([`Bean`], [`Fields`]) - each record states once which fields
//!    take a literal and which take another bean.
//! 2. **Bookkeeping** ([`Registry`]) - the tiers that track every name's lifecycle.
//! 3. **Resolution** ([`Container::get_by_name`]) - the tiered lookup that creates
//!    beans on first access and breaks dependency cycles.
//! 4. **Population** ([`Container::populate`]) - the field walker that injects
//!    literals and recursively resolves dependencies.
//!
//! ## Lifecycle
//!
//! ```text
//! Unregistered --register--> Registered --first resolve--> EarlyCreated --all fields populated--> Created
//! ```
//!
//! A bean is published to the early tier *before* its fields are filled. When
//! `a` depends on `b` and `b` depends back on `a`, resolving `b` during the
//! population of `a` finds `a` in the early tier and receives the live
//! instance instead of recursing. Both beans converge to fully populated
//! state, and every holder sees the result because all references alias
//! one [`BeanRef`].
//!
//! ## Example
//!
//! ```rust
//! use bean_framework::{Bean, Container, Fields, Inject};
//!
//! #[derive(Default)]
//! struct A {
//!     b: Inject<B>,
//!     name: String,
//! }
//!
//! impl Bean for A {
//!     fn fields(fields: Fields<Self>) -> Fields<Self> {
//!         fields
//!             .resource("b", "b", |a| &mut a.b)
//!             .literal("name", "y", |a| &mut a.name)
//!     }
//! }
//!
//! #[derive(Default)]
//! struct B {
//!     a: Inject<A>,
//!     name: String,
//! }
//!
//! impl Bean for B {
//!     fn fields(fields: Fields<Self>) -> Fields<Self> {
//!         fields
//!             .resource("a", "a", |b| &mut b.a)
//!             .literal("name", "x", |b| &mut b.name)
//!     }
//! }
//!
//! let mut container = Container::new();
//! container.register("a", A::default).unwrap();
//! container.register("b", B::default).unwrap();
//!
//! let a = container.get::<A>("a").unwrap();
//! assert!(a.is_complete());
//!
//! let a = a.into_inner();
//! let b = a.read().b.get().cloned().unwrap();
//! assert_eq!(a.read().name, "y");
//! assert_eq!(b.read().name, "x");
//! assert!(b.read().a.get().unwrap().ptr_eq(&a));
//! ```
//!
//! ## Error Handling
//!
//! Registration and resolution return [`ContainerError`]. Problems found while
//! populating a bean (an unparsable literal, a missing dependency) never abort
//! the surrounding resolution: they are logged and the field keeps its zero
//! value. A bean that is live but not fully populated is reported as
//! [`Loaded::Partial`], never as an error.
//!
//! ## Concurrency Model
//!
//! The container is synchronous. State changes take `&mut self`, so callers
//! serialize them by construction; to share one container between tasks, put
//! it behind a mutex. Bean locks are only held while a single field is written.
//!
//! ## Testing
//!
//! The [`testing`] module provides [`FactoryProbe`](testing::FactoryProbe) for
//! counting factory invocations.

pub mod bean;
pub mod container;
pub mod descriptor;
pub mod error;
pub mod naming;
pub mod overrides;
pub mod populator;
pub mod registry;
pub mod resolver;
pub mod testing;
pub mod tracing;

// Re-export core types for convenience
pub use bean::{Bean, BeanHandle, BeanRef, Inject, Injectable};
pub use container::Container;
pub use descriptor::{Dependency, Directive, FieldView, Fields, Scalar};
pub use error::{ContainerError, LiteralError};
pub use overrides::LiteralOverrides;
pub use registry::{LifecycleState, Lookup, Registry};
pub use resolver::Loaded;
