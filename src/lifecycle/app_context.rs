use crate::error::AppError;
use crate::model::{AuditLog, Database, Settings, UserService};
use bean_framework::naming::simple_name;
use bean_framework::{Bean, BeanRef, Container, ContainerError, LiteralOverrides};
use std::any::type_name;
use tracing::{info, instrument};

/// The startup routine of the application.
///
/// `AppContext` owns the [`Container`] and registers every service of the graph
/// in [`AppContext::new`]. Nothing is created until [`AppContext::start`]
/// resolves the graph.
///
/// # Example
///
/// ```rust
/// use bean_recipe::lifecycle::AppContext;
/// use bean_framework::LiteralOverrides;
///
/// let mut context = AppContext::new(LiteralOverrides::new()).unwrap();
/// let services = context.start().unwrap();
/// assert_eq!(services.settings.read().port, 8080);
/// ```
pub struct AppContext {
    container: Container,
}

/// Fully populated handles to the services of the graph.
#[derive(Debug, Clone)]
pub struct Services {
    pub settings: BeanRef<Settings>,
    pub database: BeanRef<Database>,
    pub users: BeanRef<UserService>,
    pub audit: BeanRef<AuditLog>,
}

impl AppContext {
    /// Registers the service graph with the given literal overrides.
    pub fn new(overrides: LiteralOverrides) -> Result<Self, AppError> {
        let mut container = Container::with_overrides(overrides);
        Self::register_services(&mut container)?;
        Ok(Self { container })
    }

    /// Registers every service of the graph in `container`.
    ///
    /// `database` is registered under an explicit name; the other services take
    /// the name derived from their type.
    pub fn register_services(container: &mut Container) -> Result<(), ContainerError> {
        container.register("", Settings::default)?;
        container.register("database", Database::default)?;
        container.register("", UserService::default)?;
        container.register("", AuditLog::default)?;
        info!(services = container.registry().len(), "Service graph registered");
        Ok(())
    }

    /// Resolves the whole graph.
    ///
    /// # Errors
    ///
    /// [`ContainerError::PartialLoad`] if any service is left with fields pending.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Result<Services, AppError> {
        let users = self.complete::<UserService>("userService")?;
        let services = Services {
            settings: self.complete("settings")?,
            database: self.complete("database")?,
            audit: self.complete("auditLog")?,
            users,
        };
        info!(address = %services.settings.read().bind_address(), "Services started");
        Ok(services)
    }

    fn complete<T: Bean>(&mut self, name: &str) -> Result<BeanRef<T>, AppError> {
        let bean = self.container.get::<T>(name)?.require_complete(name)?;
        info!(bean = name, bean_type = simple_name(type_name::<T>()), "Resolved");
        Ok(bean)
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Hands the container over, e.g. to a [`SharedContainer`](super::SharedContainer).
    pub fn into_container(self) -> Container {
        self.container
    }
}
