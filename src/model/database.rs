use super::Settings;
use bean_framework::{Bean, Fields, Inject};

/// Connection settings for the backing store.
#[derive(Debug, Default)]
pub struct Database {
    pub url: String,
    pub pool_size: u32,
    /// Wired by field type: `Inject<Settings>` resolves to `settings`.
    pub settings: Inject<Settings>,
}

impl Bean for Database {
    fn fields(fields: Fields<Self>) -> Fields<Self> {
        fields
            .literal("url", "postgres://localhost/recipes", |db| &mut db.url)
            .literal("pool_size", "8", |db| &mut db.pool_size)
            .autowired("settings", |db| &mut db.settings)
    }
}

impl Database {
    /// A display form of the connection, tagged with the owning service.
    pub fn describe(&self) -> String {
        let service = self
            .settings
            .read()
            .map(|settings| settings.service_name.clone())
            .unwrap_or_default();
        format!("{service}@{} (pool={})", self.url, self.pool_size)
    }
}
