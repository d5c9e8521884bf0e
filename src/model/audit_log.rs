use super::UserService;
use bean_framework::{Bean, Fields, Inject};

/// Bounded in-memory audit trail.
///
/// Points back to [`UserService`], which points to it: the pair only wires up
/// because the container publishes each bean before populating it.
#[derive(Debug, Default)]
pub struct AuditLog {
    pub users: Inject<UserService>,
    pub capacity: usize,
    entries: Vec<String>,
}

impl Bean for AuditLog {
    fn fields(fields: Fields<Self>) -> Fields<Self> {
        fields
            .resource("users", "userService", |log| &mut log.users)
            .literal("capacity", "128", |log| &mut log.capacity)
            .plain("entries")
    }
}

impl AuditLog {
    /// Appends an entry, dropping the oldest one once `capacity` is reached.
    pub fn record(&mut self, entry: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.remove(0);
        }
        self.entries.push(entry.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_the_newest_entries() {
        let mut log = AuditLog {
            capacity: 2,
            ..AuditLog::default()
        };
        log.record("a");
        log.record("b");
        log.record("c");
        assert_eq!(log.entries(), ["b", "c"]);
    }

    #[test]
    fn zero_capacity_records_nothing() {
        let mut log = AuditLog::default();
        log.record("a");
        assert!(log.entries().is_empty());
    }
}
