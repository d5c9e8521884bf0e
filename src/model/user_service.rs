use super::{AuditLog, Database};
use bean_framework::{Bean, Fields, Inject};

/// User registration backed by the [`Database`] and reported to the [`AuditLog`].
#[derive(Debug, Default)]
pub struct UserService {
    pub db: Inject<Database>,
    /// Wired by target type: resolves to `auditLog`.
    pub audit: Inject<AuditLog>,
    pub greeting: String,
}

impl Bean for UserService {
    fn fields(fields: Fields<Self>) -> Fields<Self> {
        fields
            .resource("db", "database", |svc| &mut svc.db)
            .by_type("audit", |svc| &mut svc.audit)
            .literal("greeting", "Welcome", |svc| &mut svc.greeting)
    }
}

impl UserService {
    /// Registers `user` and returns the greeting for them.
    pub fn register_user(&self, user: &str) -> String {
        if let Some(audit) = self.audit.get() {
            let store = self
                .db
                .read()
                .map(|db| db.url.clone())
                .unwrap_or_default();
            audit.write().record(format!("registered {user} in {store}"));
        }
        format!("{}, {user}!", self.greeting)
    }
}
