//! Startup and shared access for the service graph.

pub mod app_context;
pub mod shared;

pub use app_context::{AppContext, Services};
pub use shared::SharedContainer;
