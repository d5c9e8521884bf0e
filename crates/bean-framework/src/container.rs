//! # Container
//!
//! The [`Container`] is the value an application's startup routine owns and
//! passes around. There is no process-wide default instance.
//!
//! Registration lives here. Resolution and population are implemented in the
//! [`resolver`](crate::resolver) and [`populator`](crate::populator) modules as
//! further `impl Container` blocks.
//!
//! # Concurrency
//!
//! Every state-changing method takes `&mut self`: lifecycle transitions are
//! check-then-act sequences over the registry, and the borrow checker makes the
//! caller serialize them. The container is `Send`, so concurrent callers put it
//! behind a mutex of their choice.

use crate::bean::Bean;
use crate::descriptor::{FieldView, Fields};
use crate::error::ContainerError;
use crate::naming;
use crate::overrides::LiteralOverrides;
use crate::registry::{self, LifecycleState, Lookup, Registry};
use tracing::{debug, info, instrument};

/// Owns the registry of one object graph.
#[derive(Default)]
pub struct Container {
    pub(crate) registry: Registry,
    pub(crate) overrides: LiteralOverrides,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a container whose literal fields honour `overrides`.
    pub fn with_overrides(overrides: LiteralOverrides) -> Self {
        Self {
            registry: Registry::new(),
            overrides,
        }
    }

    pub fn overrides(&self) -> &LiteralOverrides {
        &self.overrides
    }

    /// Replaces the overrides used by beans populated from now on.
    pub fn set_overrides(&mut self, overrides: LiteralOverrides) {
        self.overrides = overrides;
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn state(&self, name: &str) -> LifecycleState {
        self.registry.state(name)
    }

    pub fn lookup(&self, name: &str) -> Lookup {
        self.registry.lookup(name)
    }

    pub fn describe(&self, name: &str) -> Option<&[FieldView]> {
        self.registry.describe(name)
    }

    /// Registers `factory` under `name` and returns the effective name.
    ///
    /// An empty `name` is derived from `T` (`Widget` registers as `widget`).
    /// The factory is stored, not invoked: it runs exactly once, on the first
    /// resolution of the name.
    ///
    /// # Errors
    ///
    /// - [`ContainerError::DuplicateBean`] if the name already has a factory or instance.
    /// - [`ContainerError::WrongShape`] if `T`'s descriptor table is malformed.
    /// - [`ContainerError::WrongParameter`] if no name can be derived.
    ///
    /// A taken name is reported as `DuplicateBean` before the descriptor is
    /// checked. A failed registration leaves every earlier registration untouched.
    #[instrument(skip(self, factory), fields(bean_type = naming::simple_name(std::any::type_name::<T>())))]
    pub fn register<T, F>(&mut self, name: &str, factory: F) -> Result<String, ContainerError>
    where
        T: Bean,
        F: FnOnce() -> T + Send + 'static,
    {
        let name = if name.is_empty() {
            let derived = naming::derive_name::<T>();
            debug!(derived = %derived, "No bean name given, derived from type");
            derived
        } else {
            name.to_owned()
        };
        if name.is_empty() {
            return Err(ContainerError::WrongParameter);
        }

        if self.registry.contains(&name) {
            return Err(ContainerError::DuplicateBean(name));
        }

        let fields = T::fields(Fields::new());
        fields
            .validate()
            .map_err(|reason| ContainerError::WrongShape {
                name: name.clone(),
                reason,
            })?;

        let views = fields.views();
        self.registry
            .insert_factory(&name, registry::pending(factory, fields), views)?;
        info!(bean = %name, size = self.registry.len(), "Registered");
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Directive;

    #[derive(Default)]
    struct Widget {
        size: u32,
    }

    impl Bean for Widget {
        fn fields(fields: Fields<Self>) -> Fields<Self> {
            fields.literal("size", "4", |w| &mut w.size)
        }
    }

    #[derive(Default)]
    struct Malformed {
        left: u32,
    }

    impl Bean for Malformed {
        fn fields(fields: Fields<Self>) -> Fields<Self> {
            fields
                .literal("left", "1", |m| &mut m.left)
                .literal("left", "2", |m| &mut m.left)
        }
    }

    #[test]
    fn empty_name_is_derived_from_the_type() {
        let mut container = Container::new();
        let name = container.register("", Widget::default).unwrap();
        assert_eq!(name, "widget");
        assert_eq!(container.state("widget"), LifecycleState::Registered);
    }

    #[test]
    fn registration_does_not_invoke_the_factory() {
        let mut container = Container::new();
        container
            .register("widget", || -> Widget { panic!("factory invoked during registration") })
            .unwrap();
        assert_eq!(container.state("widget"), LifecycleState::Registered);
    }

    #[test]
    fn malformed_descriptor_is_rejected_without_side_effects() {
        let mut container = Container::new();
        container.register("widget", Widget::default).unwrap();

        let error = container.register("broken", Malformed::default).unwrap_err();
        assert!(matches!(error, ContainerError::WrongShape { ref name, .. } if name == "broken"));
        assert_eq!(container.state("broken"), LifecycleState::Unregistered);
        assert_eq!(container.state("widget"), LifecycleState::Registered);
    }

    #[test]
    fn taken_name_is_reported_before_a_malformed_descriptor() {
        let mut container = Container::new();
        container.register("widget", Widget::default).unwrap();

        let error = container.register("widget", Malformed::default).unwrap_err();
        assert_eq!(error, ContainerError::DuplicateBean("widget".to_owned()));
        assert!(container.describe("widget").is_some_and(|fields| fields.len() == 1));
    }

    #[test]
    fn describe_reports_the_registered_directives() {
        let mut container = Container::new();
        container.register("widget", Widget::default).unwrap();
        let fields = container.describe("widget").unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].directive, Some(Directive::Literal("4".to_owned())));
        assert!(container.describe("ghost").is_none());
    }
}
