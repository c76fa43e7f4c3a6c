use super::files::{atomic_write, read_file, remove_file};
use crate::domain::{ItemStatus, Record};
use crate::error::{parse_id, StoreError, StoreResult};
use chrono::Local;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File-backed collection of one record type
///
/// Every mutating call reads the whole file, changes it in memory and writes
/// it back in full. There is no locking; callers serialize access.
#[derive(Debug, Clone)]
pub struct RecordStore<T> {
    path: PathBuf,
    _records: PhantomData<T>,
}

impl<T: Record> RecordStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _records: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the collection. A missing or empty file is an empty collection.
    pub fn load(&self) -> StoreResult<Vec<T>> {
        let content = match read_file(&self.path)? {
            Some(content) => content,
            None => return Ok(Vec::new()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the collection file with `items`
    pub fn save(&self, items: &[T]) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(items).map_err(StoreError::Encode)?;
        atomic_write(&self.path, &json)?;
        debug!(path = %self.path().display(), count = items.len(), "saved {} records", T::KIND);
        Ok(())
    }

    /// Next identifier: 1 for an empty collection, else the last id + 1
    pub fn next_id(items: &[T]) -> StoreResult<u64> {
        match items.last() {
            None => Ok(1),
            Some(last) => last.id().checked_add(1).ok_or_else(|| {
                StoreError::Validation(format!("no {} ID left after {}", T::KIND, last.id()))
            }),
        }
    }

    pub fn find_by_id(items: &[T], id: u64) -> StoreResult<(usize, &T)> {
        items
            .iter()
            .enumerate()
            .find(|(_, item)| item.id() == id)
            .ok_or(StoreError::NotFound { kind: T::KIND, id })
    }

    /// Load and return one record by its textual id
    pub fn find(&self, id: &str) -> StoreResult<T> {
        let id = parse_id(id)?;
        let items = self.load()?;
        let (_, item) = Self::find_by_id(&items, id)?;
        Ok(item.clone())
    }

    /// Append a record built from the next free id
    pub fn insert(&self, build: impl FnOnce(u64) -> T) -> StoreResult<T> {
        let mut items = self.load()?;
        let item = build(Self::next_id(&items)?);
        items.push(item.clone());
        self.save(&items)?;
        Ok(item)
    }

    /// Load, mutate one record in place, save. Returns the updated record.
    pub fn update_with(&self, id: u64, mutate: impl FnOnce(&mut T)) -> StoreResult<T> {
        let mut items = self.load()?;
        let (index, _) = Self::find_by_id(&items, id)?;
        mutate(&mut items[index]);
        let updated = items[index].clone();
        self.save(&items)?;
        Ok(updated)
    }

    /// Rename a record. A blank name leaves the record unchanged but still succeeds.
    pub fn update_name(&self, id: &str, name: &str) -> StoreResult<T> {
        let id = parse_id(id)?;
        let name = name.trim();
        self.update_with(id, |item| {
            if !name.is_empty() {
                item.set_name(name.to_string());
                item.touch(Local::now());
            }
        })
    }

    pub fn update_status(&self, id: &str, status: ItemStatus) -> StoreResult<T> {
        let id = parse_id(id)?;
        self.update_with(id, |item| {
            item.set_status(status);
            item.touch(Local::now());
        })
    }

    /// Add focused seconds to a record, promoting TODO to IN_PROGRESS
    pub fn add_spent_time(&self, id: u64, seconds: u64) -> StoreResult<T> {
        self.update_with(id, |item| item.accumulate(seconds, Local::now()))
    }

    pub fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        self.delete(parse_id(id)?)
    }

    pub fn delete(&self, id: u64) -> StoreResult<()> {
        let mut items = self.load()?;
        let (index, _) = Self::find_by_id(&items, id)?;
        items.remove(index);
        self.save(&items)
    }

    /// Replace the collection with an empty one
    pub fn delete_all(&self) -> StoreResult<()> {
        self.save(&[])
    }

    /// Remove the backing file entirely
    pub fn remove(&self) -> StoreResult<()> {
        remove_file(&self.path)?;
        debug!(path = %self.path().display(), "removed {} collection", T::KIND);
        Ok(())
    }
}
