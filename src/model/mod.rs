//! The service graph of the sample application.
//!
//! Every record here is a [`Bean`](bean_framework::Bean): its literal fields carry
//! their defaults in the descriptor table, and its structural fields name the
//! beans they point to. [`UserService`] and [`AuditLog`] reference each other.

pub mod audit_log;
pub mod database;
pub mod settings;
pub mod user_service;

pub use audit_log::*;
pub use database::*;
pub use settings::*;
pub use user_service::*;
