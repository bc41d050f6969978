//! Operations on tracked items and their records. [Tracker] owns the document for the lifetime of
//! the process and writes it back after every change.

use tracing::debug;

use crate::{
    errors::{Result, TrackerError},
    storage::{
        document_storage::DocumentStorage,
        entities::{Document, ItemEntity},
    },
    utils::{
        clock::Clock,
        time::{format_timestamp, parse_timestamp},
    },
};

/// A row of the item listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSummary {
    pub name: String,
    pub last_recorded: String,
}

pub struct Tracker<S: DocumentStorage> {
    storage: S,
    document: Document,
    clock: Box<dyn Clock>,
}

impl<S: DocumentStorage> Tracker<S> {
    /// Loads the document from `storage`. Never fails, a missing or broken data file simply gives
    /// an empty tracker.
    pub async fn open(storage: S, clock: Box<dyn Clock>) -> Self {
        let document = storage.load().await;
        Self {
            storage,
            document,
            clock,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn list_items(&self) -> Vec<ItemSummary> {
        self.document
            .iter()
            .map(|(name, item)| ItemSummary {
                name: name.to_owned(),
                last_recorded: item.last_recorded.clone(),
            })
            .collect()
    }

    /// Records of an item in ascending order. Unknown items just have no records.
    pub fn list_records(&self, item_name: &str) -> &[String] {
        self.document
            .get(item_name)
            .map(ItemEntity::records)
            .unwrap_or_default()
    }

    pub async fn add_item(&mut self, name: &str) -> Result<()> {
        validate_name(name)?;
        if self.document.contains(name) {
            return Err(TrackerError::DuplicateItem(name.to_owned()));
        }
        let mut next = self.document.clone();
        next.insert(name.to_owned(), ItemEntity::default());
        self.commit(next).await?;
        debug!("Added item {name}");
        Ok(())
    }

    /// Renames an item. Renaming an item to its own name is allowed and changes nothing.
    pub async fn edit_item(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        validate_name(new_name)?;
        if !self.document.contains(old_name) {
            return Err(TrackerError::ItemNotFound(old_name.to_owned()));
        }
        if old_name != new_name && self.document.contains(new_name) {
            return Err(TrackerError::DuplicateItem(new_name.to_owned()));
        }

        let mut next = self.document.clone();
        if old_name != new_name {
            let item = next
                .remove(old_name)
                .ok_or_else(|| TrackerError::ItemNotFound(old_name.to_owned()))?;
            next.insert(new_name.to_owned(), item);
        }
        self.commit(next).await?;
        debug!("Renamed item {old_name} to {new_name}");
        Ok(())
    }

    pub async fn delete_item(&mut self, name: &str) -> Result<()> {
        let mut next = self.document.clone();
        if next.remove(name).is_none() {
            return Err(TrackerError::ItemNotFound(name.to_owned()));
        }
        self.commit(next).await?;
        debug!("Deleted item {name}");
        Ok(())
    }

    pub async fn add_record(&mut self, item_name: &str, timestamp: &str) -> Result<()> {
        validate_timestamp(timestamp)?;
        let mut next = self.document.clone();
        next.get_mut(item_name)
            .ok_or_else(|| TrackerError::ItemNotFound(item_name.to_owned()))?
            .insert_record(timestamp.to_owned());
        self.commit(next).await?;
        debug!("Added record {timestamp} to {item_name}");
        Ok(())
    }

    /// Records the current time for an item and returns the stored timestamp.
    pub async fn record_now(&mut self, item_name: &str) -> Result<String> {
        let timestamp = format_timestamp(self.clock.now());
        self.add_record(item_name, &timestamp).await?;
        Ok(timestamp)
    }

    /// Replaces a record. With duplicate timestamps only the first occurrence is replaced.
    pub async fn edit_record(
        &mut self,
        item_name: &str,
        old_timestamp: &str,
        new_timestamp: &str,
    ) -> Result<()> {
        validate_timestamp(new_timestamp)?;
        validate_timestamp(old_timestamp)?;

        let mut next = self.document.clone();
        let item = next
            .get_mut(item_name)
            .ok_or_else(|| TrackerError::ItemNotFound(item_name.to_owned()))?;
        if !item.remove_record(old_timestamp) {
            return Err(record_not_found(item_name, old_timestamp));
        }
        item.insert_record(new_timestamp.to_owned());

        self.commit(next).await?;
        debug!("Changed record {old_timestamp} of {item_name} to {new_timestamp}");
        Ok(())
    }

    /// Removes a record. With duplicate timestamps only the first occurrence is removed.
    pub async fn delete_record(&mut self, item_name: &str, timestamp: &str) -> Result<()> {
        let mut next = self.document.clone();
        let item = next
            .get_mut(item_name)
            .ok_or_else(|| TrackerError::ItemNotFound(item_name.to_owned()))?;
        if !item.remove_record(timestamp) {
            return Err(record_not_found(item_name, timestamp));
        }

        self.commit(next).await?;
        debug!("Deleted record {timestamp} of {item_name}");
        Ok(())
    }

    /// Persists `next` and only then makes it the current document, so a failed write leaves the
    /// tracker as it was.
    async fn commit(&mut self, next: Document) -> Result<()> {
        self.storage.save(&next).await?;
        self.document = next;
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(TrackerError::InvalidName(name.to_owned()));
    }
    Ok(())
}

fn validate_timestamp(timestamp: &str) -> Result<()> {
    match parse_timestamp(timestamp) {
        Some(_) => Ok(()),
        None => Err(TrackerError::InvalidTimestamp(timestamp.to_owned())),
    }
}

fn record_not_found(item_name: &str, timestamp: &str) -> TrackerError {
    TrackerError::RecordNotFound {
        item: item_name.to_owned(),
        timestamp: timestamp.to_owned(),
    }
}
