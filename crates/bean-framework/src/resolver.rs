//! # Resolver
//!
//! Resolution walks the registry tiers for a name:
//!
//! 1. **Created**: the fully populated instance is returned as [`Loaded::Complete`].
//! 2. **EarlyCreated**: the live, possibly incomplete instance is returned as
//!    [`Loaded::Partial`]. This is the short-circuit that breaks cycles: a bean
//!    being populated can be handed to its own dependencies without recursing.
//! 3. **Registered**: the factory runs exactly once, is discarded, and the new
//!    instance is published to the early tier before any of its fields are filled.
//! 4. **Unregistered**: [`ContainerError::NotRegistered`].
//!
//! [`Container::instantiate`] stops after these steps. [`Container::get_by_name`]
//! additionally drives population, but only when it is the call that moved the
//! name out of `Registered`. A nested request for a name that is already early
//! never populates it a second time.

use crate::bean::{Bean, BeanHandle, BeanRef};
use crate::container::Container;
use crate::error::ContainerError;
use crate::naming;
use crate::registry::LifecycleState;
use std::any::type_name;
use tracing::{debug, info, instrument};

/// A resolved bean, tagged with whether its population has completed.
#[derive(Debug, Clone)]
#[must_use]
pub enum Loaded<T> {
    /// Every field of the bean has been processed.
    Complete(T),
    /// The bean is live but some fields may still be unpopulated.
    Partial(T),
}

impl<T> Loaded<T> {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, Self::Partial(_))
    }

    pub fn get(&self) -> &T {
        match self {
            Self::Complete(bean) | Self::Partial(bean) => bean,
        }
    }

    /// Returns the bean regardless of its completion.
    pub fn into_inner(self) -> T {
        match self {
            Self::Complete(bean) | Self::Partial(bean) => bean,
        }
    }

    /// Returns the bean, or [`ContainerError::PartialLoad`] naming `name`.
    pub fn require_complete(self, name: &str) -> Result<T, ContainerError> {
        match self {
            Self::Complete(bean) => Ok(bean),
            Self::Partial(_) => Err(ContainerError::PartialLoad(name.to_owned())),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loaded<U> {
        match self {
            Self::Complete(bean) => Loaded::Complete(f(bean)),
            Self::Partial(bean) => Loaded::Partial(f(bean)),
        }
    }

    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Loaded<U>, E> {
        Ok(match self {
            Self::Complete(bean) => Loaded::Complete(f(bean)?),
            Self::Partial(bean) => Loaded::Partial(f(bean)?),
        })
    }
}

impl Container {
    /// Returns the instance for `name`, creating it from its factory on first access.
    ///
    /// A newly created instance is published to the early tier and returned as
    /// [`Loaded::Partial`]; its fields are not populated by this call.
    pub fn instantiate(&mut self, name: &str) -> Result<Loaded<BeanHandle>, ContainerError> {
        if let Some(bean) = self.registry.created(name) {
            debug!(bean = name, "Found in created tier");
            return Ok(Loaded::Complete(bean.clone()));
        }
        if let Some(wiring) = self.registry.early(name) {
            debug!(bean = name, "Found in early tier");
            return Ok(Loaded::Partial(wiring.handle().clone()));
        }
        let Some(factory) = self.registry.take_factory(name) else {
            debug!(bean = name, "Not registered");
            return Err(ContainerError::NotRegistered(name.to_owned()));
        };

        let wiring = factory(name);
        let bean = wiring.handle().clone();
        self.registry.publish_early(name, wiring);
        info!(bean = name, "Instantiated");
        Ok(Loaded::Partial(bean))
    }

    /// Returns the bean registered under `name`, creating and populating it on
    /// first access.
    ///
    /// # Errors
    ///
    /// - [`ContainerError::WrongParameter`] for an empty name.
    /// - [`ContainerError::NotRegistered`] if nothing is registered under `name`.
    #[instrument(skip(self))]
    pub fn get_by_name(&mut self, name: &str) -> Result<Loaded<BeanHandle>, ContainerError> {
        if name.is_empty() {
            return Err(ContainerError::WrongParameter);
        }
        if self.registry.state(name) != LifecycleState::Registered {
            return self.instantiate(name);
        }

        let bean = self.instantiate(name)?.into_inner();
        match self.populate(name)? {
            LifecycleState::Created => Ok(Loaded::Complete(bean)),
            state => {
                debug!(bean = name, ?state, "Population left fields pending");
                Ok(Loaded::Partial(bean))
            }
        }
    }

    /// Resolves a bean by name or, when no name is given, by a type name.
    ///
    /// The type name is turned into a bean name with [`naming::derive`].
    pub fn resolve(
        &mut self,
        name: Option<&str>,
        type_name: Option<&str>,
    ) -> Result<Loaded<BeanHandle>, ContainerError> {
        let name = match (name.filter(|name| !name.is_empty()), type_name) {
            (Some(name), _) => name.to_owned(),
            (None, Some(type_name)) => {
                let derived = naming::derive(type_name);
                debug!(type_name, derived = %derived, "Derived bean name from type");
                derived
            }
            (None, None) => return Err(ContainerError::WrongParameter),
        };
        self.get_by_name(&name)
    }

    /// Returns the bean registered under `name` as a typed reference.
    ///
    /// # Errors
    ///
    /// As [`Container::get_by_name`], plus [`ContainerError::TypeMismatch`] if the
    /// bean is not a `T`.
    pub fn get<T: Bean>(&mut self, name: &str) -> Result<Loaded<BeanRef<T>>, ContainerError> {
        self.get_by_name(name)?.try_map(typed::<T>)
    }

    /// Returns the bean registered under the default name of `T`.
    pub fn get_by_type<T: Bean>(&mut self) -> Result<Loaded<BeanRef<T>>, ContainerError> {
        self.resolve(None, Some(type_name::<T>()))?
            .try_map(typed::<T>)
    }
}

fn typed<T: Bean>(handle: BeanHandle) -> Result<BeanRef<T>, ContainerError> {
    handle
        .downcast::<T>()
        .ok_or_else(|| ContainerError::TypeMismatch {
            name: handle.name().to_owned(),
            expected: type_name::<T>(),
            found: handle.type_name(),
        })
}
