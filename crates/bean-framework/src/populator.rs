//! # Populator
//!
//! Population completes a bean that sits in the early tier by walking its
//! descriptor table once:
//!
//! - fields without a directive keep their zero value;
//! - literal fields are parsed from their raw value (or its override);
//! - reference fields are resolved through [`Container::get_by_name`] and the
//!   returned instance is injected whether or not it is complete itself.
//!
//! Nothing found during the walk aborts it. Unparsable literals, missing
//! dependencies and mismatched record types are logged and the field is left
//! at its zero value. Every visited field is marked processed, so a repeated
//! call never touches it again; once all fields are processed the bean is
//! promoted to the created tier.

use crate::container::Container;
use crate::descriptor::{Dependency, Directive, FieldView};
use crate::error::ContainerError;
use crate::registry::{LifecycleState, Wiring};
use tracing::{debug, info, instrument, trace, warn};

impl Container {
    /// Populates the fields of the early bean `name` and promotes it when done.
    ///
    /// Returns the state the name is left in. Calling it on a created bean is a
    /// no-op returning [`LifecycleState::Created`].
    ///
    /// # Errors
    ///
    /// - [`ContainerError::NotRegistered`] if `name` is unknown.
    /// - [`ContainerError::NotInstantiated`] if its factory has not run yet.
    #[instrument(skip(self))]
    pub fn populate(&mut self, name: &str) -> Result<LifecycleState, ContainerError> {
        let wiring = match self.registry.state(name) {
            LifecycleState::Created => return Ok(LifecycleState::Created),
            LifecycleState::Unregistered => {
                return Err(ContainerError::NotRegistered(name.to_owned()))
            }
            LifecycleState::Registered => {
                return Err(ContainerError::NotInstantiated(name.to_owned()))
            }
            LifecycleState::EarlyCreated => self
                .registry
                .early(name)
                .ok_or_else(|| ContainerError::NotInstantiated(name.to_owned()))?,
        };

        let fields = wiring.fields();
        debug!(bean = name, fields = fields.len(), "Populating");
        for (index, field) in fields.iter().enumerate() {
            if self.registry.is_processed(name, index) {
                continue;
            }
            match &field.directive {
                None => trace!(bean = name, field = field.name, "No directive, keeping zero value"),
                Some(Directive::Literal(raw)) => self.inject_literal(name, index, field, raw, &*wiring),
                Some(Directive::Reference(dependency)) => {
                    self.inject_reference(name, index, field, dependency, &*wiring)
                }
            }
            self.registry.mark_processed(name, index);
        }

        if self.registry.state(name) == LifecycleState::Created {
            return Ok(LifecycleState::Created);
        }
        let processed = self.registry.processed_count(name);
        if processed < fields.len() {
            debug!(bean = name, processed, total = fields.len(), "Fields still pending");
            return Ok(LifecycleState::EarlyCreated);
        }
        self.registry.promote(name);
        info!(bean = name, size = self.registry.len(), "Created");
        Ok(LifecycleState::Created)
    }

    fn inject_literal(&self, name: &str, index: usize, field: &FieldView, raw: &str, wiring: &dyn Wiring) {
        let raw = match self.overrides.get(name, field.name) {
            Some(value) => {
                debug!(bean = name, field = field.name, value, "Using literal override");
                value
            }
            None => raw,
        };
        match wiring.write_literal(index, raw) {
            Ok(()) => debug!(bean = name, field = field.name, raw, "Injected literal"),
            Err(e) => warn!(bean = name, field = field.name, error = %e, "Literal not converted, keeping zero value"),
        }
    }

    fn inject_reference(
        &mut self,
        name: &str,
        index: usize,
        field: &FieldView,
        dependency: &Dependency,
        wiring: &dyn Wiring,
    ) {
        let target = dependency.target_name(field.declared_type, field.target_type.unwrap_or_default());
        debug!(bean = name, field = field.name, target = %target, "Resolving dependency");

        match self.get_by_name(&target) {
            Ok(loaded) => {
                let partial = loaded.is_partial();
                match wiring.write_reference(index, loaded.get()) {
                    Ok(()) => debug!(bean = name, field = field.name, target = %target, partial, "Injected reference"),
                    Err(e) => warn!(bean = name, field = field.name, error = %e, "Reference not injected, leaving field unset"),
                }
            }
            Err(ContainerError::NotRegistered(_)) => {
                debug!(bean = name, field = field.name, target = %target, "Dependency not registered, leaving field unset")
            }
            Err(e) => warn!(bean = name, field = field.name, error = %e, "Dependency not resolved, leaving field unset"),
        }
    }
}
