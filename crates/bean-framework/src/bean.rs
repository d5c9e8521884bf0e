//! # Beans and Shared References
//!
//! A bean is a plain Rust record managed by the [`Container`](crate::Container).
//! Implementing [`Bean`] means describing the record's fields once, through a
//! [`Fields`] table, so the populator never has to inspect the record at runtime.
//!
//! Every bean instance lives behind a [`BeanRef`]. All holders of a `BeanRef`
//! alias the same allocation, which is what lets a dependency cycle close:
//! a bean handed out while still incomplete becomes complete for everyone once
//! its population finishes.
//!
//! Structural fields are [`Injectable`] slots. [`Inject<T>`] is the stock slot;
//! a newtype around it gives a field its own declared type name, which matters
//! for [`Dependency::ByFieldType`](crate::Dependency::ByFieldType) naming.

use crate::descriptor::Fields;
use crate::naming;
use std::any::{type_name, Any};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A record that can be registered, created and populated by the container.
///
/// # Example
///
/// ```rust
/// use bean_framework::{Bean, Fields, Inject};
///
/// #[derive(Default)]
/// struct Engine {
///     cylinders: u32,
/// }
///
/// impl Bean for Engine {
///     fn fields(fields: Fields<Self>) -> Fields<Self> {
///         fields.literal("cylinders", "6", |engine| &mut engine.cylinders)
///     }
/// }
///
/// #[derive(Default)]
/// struct Car {
///     engine: Inject<Engine>,
///     mileage: u64,
/// }
///
/// impl Bean for Car {
///     fn fields(fields: Fields<Self>) -> Fields<Self> {
///         fields
///             .autowired("engine", |car| &mut car.engine)
///             .plain("mileage")
///     }
/// }
/// ```
pub trait Bean: Sized + Send + Sync + 'static {
    /// Describes the record's fields and their directives.
    ///
    /// Fields left out of the table are never touched by the populator. The
    /// default implementation describes a record with no managed fields.
    fn fields(fields: Fields<Self>) -> Fields<Self> {
        fields
    }
}

/// A shared, interior-mutable reference to a bean instance.
pub struct BeanRef<T>(Arc<RwLock<T>>);

impl<T> BeanRef<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(RwLock::new(value)))
    }

    /// Locks the bean for reading.
    ///
    /// A poisoned lock is recovered: field writes are single assignments, so the
    /// bean is never left half-written.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Locks the bean for writing.
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `true` if both references point to the same instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for BeanRef<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

// Beans may reference each other in cycles, so Debug never descends into the value.
impl<T> fmt::Debug for BeanRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BeanRef")
            .field(&naming::simple_name(type_name::<T>()))
            .finish()
    }
}

/// A structural field that the populator can fill with another bean.
pub trait Injectable: Send + Sync + 'static {
    /// The record type this slot points to.
    type Target: Bean;

    /// Stores the reference in the slot.
    fn inject(&mut self, bean: BeanRef<Self::Target>);

    /// The injected reference, if any.
    fn injected(&self) -> Option<&BeanRef<Self::Target>>;
}

/// The stock structural field: empty until the populator injects a bean.
pub struct Inject<T>(Option<BeanRef<T>>);

impl<T> Inject<T> {
    pub fn get(&self) -> Option<&BeanRef<T>> {
        self.0.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// Locks the injected bean for reading.
    pub fn read(&self) -> Option<RwLockReadGuard<'_, T>> {
        self.0.as_ref().map(BeanRef::read)
    }
}

impl<T> Default for Inject<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T> Clone for Inject<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> fmt::Debug for Inject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(bean) => f.debug_tuple("Inject").field(bean).finish(),
            None => f.write_str("Inject(unset)"),
        }
    }
}

impl<T: Bean> Injectable for Inject<T> {
    type Target = T;

    fn inject(&mut self, bean: BeanRef<T>) {
        self.0 = Some(bean);
    }

    fn injected(&self) -> Option<&BeanRef<T>> {
        self.0.as_ref()
    }
}

/// A type-erased reference to a named bean, as stored in the registry.
#[derive(Clone)]
pub struct BeanHandle {
    name: String,
    type_name: &'static str,
    bean: Arc<dyn Any + Send + Sync>,
}

impl BeanHandle {
    pub(crate) fn new<T: Bean>(name: &str, bean: BeanRef<T>) -> Self {
        Self {
            name: name.to_owned(),
            type_name: type_name::<T>(),
            bean: Arc::new(bean),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fully qualified record type of the bean.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Bean>(&self) -> bool {
        self.bean.is::<BeanRef<T>>()
    }

    /// Recovers the typed reference, or `None` if the bean is another record type.
    pub fn downcast<T: Bean>(&self) -> Option<BeanRef<T>> {
        self.bean.downcast_ref::<BeanRef<T>>().cloned()
    }

    /// Returns `true` if both handles point to the same instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.bean, &other.bean)
    }
}

impl fmt::Debug for BeanHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanHandle")
            .field("name", &self.name)
            .field("type", &naming::simple_name(self.type_name))
            .finish()
    }
}
