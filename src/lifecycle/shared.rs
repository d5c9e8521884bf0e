use bean_framework::{Bean, BeanHandle, BeanRef, Container, ContainerError, LifecycleState, Loaded};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// A [`Container`] shared between tasks.
///
/// Each operation takes the lock for its whole duration, so the check-then-act
/// sequences of resolution never interleave: two tasks resolving the same name
/// concurrently still run its factory once and receive the same instance.
#[derive(Clone)]
pub struct SharedContainer {
    inner: Arc<Mutex<Container>>,
}

impl SharedContainer {
    pub fn new(container: Container) -> Self {
        Self {
            inner: Arc::new(Mutex::new(container)),
        }
    }

    pub async fn register<T, F>(&self, name: &str, factory: F) -> Result<String, ContainerError>
    where
        T: Bean,
        F: FnOnce() -> T + Send + 'static,
    {
        self.inner.lock().await.register(name, factory)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Loaded<BeanHandle>, ContainerError> {
        let mut container = self.inner.lock().await;
        debug!(bean = name, "Shared lookup");
        container.get_by_name(name)
    }

    pub async fn get<T: Bean>(&self, name: &str) -> Result<Loaded<BeanRef<T>>, ContainerError> {
        self.inner.lock().await.get::<T>(name)
    }

    pub async fn state(&self, name: &str) -> LifecycleState {
        self.inner.lock().await.state(name)
    }
}

impl Default for SharedContainer {
    fn default() -> Self {
        Self::new(Container::new())
    }
}
