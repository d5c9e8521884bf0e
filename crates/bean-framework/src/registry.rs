//! # Bean Registry
//!
//! The registry owns every name known to a container and tracks where each name
//! stands in its lifecycle. It is organised as three tiers:
//!
//! | Tier | Holds | State |
//! |------|-------|-------|
//! | factories | a pending factory, not yet invoked | [`LifecycleState::Registered`] |
//! | early | a live instance whose fields are still being populated | [`LifecycleState::EarlyCreated`] |
//! | created | a fully populated instance | [`LifecycleState::Created`] |
//!
//! A name lives in at most one tier and only ever moves downwards in the table.
//! The registry itself performs no resolution: it is the bookkeeping that the
//! resolver and populator drive.

use crate::bean::{Bean, BeanHandle, BeanRef};
use crate::descriptor::{FieldView, Fields};
use crate::error::{ContainerError, LiteralError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Where a bean name stands in its lifecycle.
///
/// Transitions are monotonic:
/// `Unregistered → Registered → EarlyCreated → Created`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Unregistered,
    Registered,
    EarlyCreated,
    Created,
}

/// The result of a pure registry query.
#[derive(Debug, Clone)]
pub struct Lookup {
    pub state: LifecycleState,
    /// The instance, once the factory has been invoked.
    pub bean: Option<BeanHandle>,
}

/// A type-erased bean instance together with its descriptor table.
pub(crate) trait Wiring: Send + Sync {
    fn handle(&self) -> &BeanHandle;
    fn fields(&self) -> Vec<FieldView>;
    fn write_literal(&self, index: usize, raw: &str) -> Result<(), LiteralError>;
    fn write_reference(&self, index: usize, target: &BeanHandle) -> Result<(), ContainerError>;
}

struct TypedWiring<T: Bean> {
    bean: BeanRef<T>,
    handle: BeanHandle,
    fields: Fields<T>,
}

impl<T: Bean> Wiring for TypedWiring<T> {
    fn handle(&self) -> &BeanHandle {
        &self.handle
    }

    fn fields(&self) -> Vec<FieldView> {
        self.fields.views()
    }

    // The write lock is held for one field only, never across a nested resolution.
    fn write_literal(&self, index: usize, raw: &str) -> Result<(), LiteralError> {
        self.fields.write_literal(&mut self.bean.write(), index, raw)
    }

    fn write_reference(&self, index: usize, target: &BeanHandle) -> Result<(), ContainerError> {
        self.fields
            .write_reference(&mut self.bean.write(), index, target)
    }
}

/// A factory waiting for its first resolution. Invoked at most once.
pub(crate) type PendingFactory = Box<dyn FnOnce(&str) -> Arc<dyn Wiring> + Send>;

/// Wraps a typed factory and its descriptor table into a [`PendingFactory`].
pub(crate) fn pending<T, F>(factory: F, fields: Fields<T>) -> PendingFactory
where
    T: Bean,
    F: FnOnce() -> T + Send + 'static,
{
    Box::new(move |name: &str| {
        let bean = BeanRef::new(factory());
        let handle = BeanHandle::new(name, bean.clone());
        Arc::new(TypedWiring {
            bean,
            handle,
            fields,
        }) as Arc<dyn Wiring>
    })
}

struct EarlyBean {
    wiring: Arc<dyn Wiring>,
    processed: HashSet<usize>,
}

/// The name → factory/instance mapping of one container.
#[derive(Default)]
pub struct Registry {
    factories: HashMap<String, PendingFactory>,
    early: HashMap<String, EarlyBean>,
    created: HashMap<String, BeanHandle>,
    descriptors: HashMap<String, Vec<FieldView>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, name: &str) -> LifecycleState {
        if self.created.contains_key(name) {
            LifecycleState::Created
        } else if self.early.contains_key(name) {
            LifecycleState::EarlyCreated
        } else if self.factories.contains_key(name) {
            LifecycleState::Registered
        } else {
            LifecycleState::Unregistered
        }
    }

    pub fn lookup(&self, name: &str) -> Lookup {
        let bean = self
            .created
            .get(name)
            .cloned()
            .or_else(|| self.early.get(name).map(|early| early.wiring.handle().clone()));
        Lookup {
            state: self.state(name),
            bean,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.state(name) != LifecycleState::Unregistered
    }

    /// The descriptor table recorded when `name` was registered.
    pub fn describe(&self, name: &str) -> Option<&[FieldView]> {
        self.descriptors.get(name).map(Vec::as_slice)
    }

    /// Every known name, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .factories
            .keys()
            .chain(self.early.keys())
            .chain(self.created.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len() + self.early.len() + self.created.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn insert_factory(
        &mut self,
        name: &str,
        factory: PendingFactory,
        fields: Vec<FieldView>,
    ) -> Result<(), ContainerError> {
        if self.contains(name) {
            return Err(ContainerError::DuplicateBean(name.to_owned()));
        }
        self.factories.insert(name.to_owned(), factory);
        self.descriptors.insert(name.to_owned(), fields);
        Ok(())
    }

    pub(crate) fn take_factory(&mut self, name: &str) -> Option<PendingFactory> {
        self.factories.remove(name)
    }

    pub(crate) fn created(&self, name: &str) -> Option<&BeanHandle> {
        self.created.get(name)
    }

    pub(crate) fn early(&self, name: &str) -> Option<Arc<dyn Wiring>> {
        self.early.get(name).map(|early| Arc::clone(&early.wiring))
    }

    pub(crate) fn publish_early(&mut self, name: &str, wiring: Arc<dyn Wiring>) {
        self.early.insert(
            name.to_owned(),
            EarlyBean {
                wiring,
                processed: HashSet::new(),
            },
        );
    }

    pub(crate) fn is_processed(&self, name: &str, field: usize) -> bool {
        self.early
            .get(name)
            .is_some_and(|early| early.processed.contains(&field))
    }

    pub(crate) fn mark_processed(&mut self, name: &str, field: usize) {
        if let Some(early) = self.early.get_mut(name) {
            early.processed.insert(field);
        }
    }

    pub(crate) fn processed_count(&self, name: &str) -> usize {
        self.early
            .get(name)
            .map_or(0, |early| early.processed.len())
    }

    /// Moves `name` from the early tier to the created tier.
    ///
    /// Per-field tracking is discarded. Returns `false` if `name` was not early.
    pub(crate) fn promote(&mut self, name: &str) -> bool {
        match self.early.remove(name) {
            Some(early) => {
                debug!(bean = name, fields = early.processed.len(), "Promoted");
                self.created
                    .insert(name.to_owned(), early.wiring.handle().clone());
                true
            }
            None => false,
        }
    }
}
