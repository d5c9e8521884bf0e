//! # Container Errors
//!
//! This module defines the error types used throughout the bean container.
//! By centralizing error definitions, registration, resolution and population
//! all report failures in the same vocabulary.
//!
//! Container operations fail with [`ContainerError`]. [`LiteralError`] is produced
//! while converting literal directives and is absorbed (logged) by the populator.

/// Errors that can occur within the bean container.
///
/// # Design Note: Partial Loads
///
/// A bean that exists but is not fully populated is *not* a failure. Resolution
/// returns it as [`Loaded::Partial`](crate::Loaded::Partial) so the caller can
/// decide whether a half-wired object is acceptable. [`ContainerError::PartialLoad`]
/// only appears when a caller explicitly asks for a complete bean via
/// [`Loaded::require_complete`](crate::Loaded::require_complete).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContainerError {
    /// Neither a bean name nor a bean type was supplied.
    #[error("wrong parameters: a bean name or bean type is needed")]
    WrongParameter,

    /// The registered record is not an acceptable bean.
    #[error("bean '{name}' has an unacceptable shape: {reason}")]
    WrongShape { name: String, reason: String },

    /// A factory or instance already exists under this name.
    #[error("bean already registered: {0}")]
    DuplicateBean(String),

    /// No factory and no instance exist under this name.
    #[error("no such bean registered: {0}")]
    NotRegistered(String),

    /// The bean is registered but its factory has not been invoked yet.
    #[error("bean not instantiated yet: {0}")]
    NotInstantiated(String),

    /// The bean exists but some of its fields are still being populated.
    #[error("bean not loaded completely: {0}")]
    PartialLoad(String),

    /// The bean exists but is a different record type than requested.
    #[error("bean '{name}' is a {found}, not a {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// A literal directive could not be converted to its field's type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot convert literal '{raw}' to {target}: {reason}")]
pub struct LiteralError {
    pub raw: String,
    pub target: &'static str,
    pub reason: String,
}

impl LiteralError {
    pub fn new(raw: &str, target: &'static str, reason: impl std::fmt::Display) -> Self {
        Self {
            raw: raw.to_owned(),
            target,
            reason: reason.to_string(),
        }
    }
}
