use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

/// Value of [ItemEntity::last_recorded] for an item without any records.
pub const NOT_RECORDED: &str = "未记录";

/// An activity being tracked. `records` is kept sorted and `last_recorded` mirrors its last element
/// as long as records are only changed through the methods below.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct ItemEntity {
    pub last_recorded: String,
    #[serde(default)]
    pub records: Vec<String>,
}

impl Default for ItemEntity {
    fn default() -> Self {
        Self {
            last_recorded: NOT_RECORDED.to_owned(),
            records: vec![],
        }
    }
}

impl ItemEntity {
    pub fn records(&self) -> &[String] {
        &self.records
    }

    pub fn is_recorded(&self) -> bool {
        !self.records.is_empty()
    }

    /// Adds a record, keeping the list sorted. Equal timestamps are allowed.
    pub fn insert_record(&mut self, timestamp: String) {
        self.records.push(timestamp);
        self.normalize();
    }

    /// Removes the first record equal to `timestamp`. Returns false if there was none.
    pub fn remove_record(&mut self, timestamp: &str) -> bool {
        let Some(index) = self.records.iter().position(|v| v == timestamp) else {
            return false;
        };
        self.records.remove(index);
        self.normalize();
        true
    }

    /// Re-sorts the records and recomputes `last_recorded` from them.
    pub fn normalize(&mut self) {
        self.records.sort();
        self.last_recorded = self
            .records
            .last()
            .cloned()
            .unwrap_or_else(|| NOT_RECORDED.to_owned());
    }
}

/// The whole data file: item name to item. Keys stay in insertion order, both in listings and in
/// the written file. Lookups are linear.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct Document {
    entries: Vec<(String, ItemEntity)>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&ItemEntity> {
        self.position(name).map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ItemEntity> {
        self.position(name).map(|i| &mut self.entries[i].1)
    }

    /// Inserts an item. An existing key keeps its position and gets its value replaced, a new key
    /// goes to the end.
    pub fn insert(&mut self, name: String, item: ItemEntity) -> Option<ItemEntity> {
        match self.position(&name) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, item)),
            None => {
                self.entries.push((name, item));
                None
            }
        }
    }

    /// Removes an item, keeping the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<ItemEntity> {
        self.position(name).map(|i| self.entries.remove(i).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ItemEntity)> {
        self.entries.iter().map(|(name, item)| (name.as_str(), item))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(key, _)| key == name)
    }
}

impl FromIterator<(String, ItemEntity)> for Document {
    fn from_iter<T: IntoIterator<Item = (String, ItemEntity)>>(iter: T) -> Self {
        let mut document = Document::new();
        for (name, item) in iter {
            document.insert(name, item);
        }
        document
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, item) in &self.entries {
            map.serialize_entry(name, item)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = Document;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of item names to items")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut document = Document::new();
                // A repeated key overwrites the earlier value, same as any JSON object reader.
                while let Some((name, mut item)) = access.next_entry::<String, ItemEntity>()? {
                    // Hand edited files may have unsorted records or a stale last_recorded.
                    item.normalize();
                    document.insert(name, item);
                }
                Ok(document)
            }
        }

        deserializer.deserialize_map(DocumentVisitor)
    }
}
