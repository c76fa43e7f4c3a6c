use super::enums::ItemStatus;
use chrono::{DateTime, Local};
use serde::{de::DeserializeOwned, Serialize};

/// Capability every persisted entity exposes to the generic record store
///
/// The store never inspects field names; it reads and writes an entity only
/// through these accessors.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Entity name used in error messages ("project", "task")
    const KIND: &'static str;

    fn id(&self) -> u64;

    fn name(&self) -> &str;

    fn set_name(&mut self, name: String);

    fn status(&self) -> ItemStatus;

    fn set_status(&mut self, status: ItemStatus);

    /// Accumulated focused time in seconds
    fn total_spent_time(&self) -> u64;

    fn set_total_spent_time(&mut self, seconds: u64);

    /// Refresh the last-modified timestamp
    fn touch(&mut self, now: DateTime<Local>);

    /// Add focused time, promoting TODO to IN_PROGRESS once any time exists.
    /// Never demotes and never completes.
    fn accumulate(&mut self, seconds: u64, now: DateTime<Local>) {
        let total = self.total_spent_time().saturating_add(seconds);
        self.set_total_spent_time(total);

        if self.status() == ItemStatus::Todo && total > 0 {
            self.set_status(ItemStatus::InProgress);
            self.touch(now);
        }
    }
}
