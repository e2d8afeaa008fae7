//! Dataform lookup used for field name uniqueness.
//!
//! A dataform owns fields, views and filters. Names are unique per scope
//! within one dataform. The in-memory implementations keep a name index per
//! scope for fast lookup.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::field::{DataformId, FieldId};

/// Kind of named item within a dataform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemScope {
    Fields,
    Views,
    Filters,
}

/// A dataform as seen by field settings forms.
pub trait Dataform: Send + Sync {
    fn id(&self) -> DataformId;

    /// Whether another item in `scope` already uses `name`. The item with id
    /// `exclude` is ignored, so an item may keep its own name.
    fn name_exists(&self, scope: ItemScope, name: &str, exclude: Option<FieldId>) -> bool;
}

/// Resolves dataform instances by id.
pub trait DataformRegistry: Send + Sync {
    fn instance(&self, id: DataformId) -> Option<Arc<dyn Dataform>>;
}

/// Dataform whose item names are held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryDataform {
    id: DataformId,
    names: HashMap<ItemScope, HashMap<FieldId, String>>,
}

impl InMemoryDataform {
    pub fn new(id: DataformId) -> Self {
        Self {
            id,
            names: HashMap::new(),
        }
    }

    /// Builder-style [`InMemoryDataform::insert`].
    pub fn with_item(mut self, scope: ItemScope, id: FieldId, name: impl Into<String>) -> Self {
        self.insert(scope, id, name);
        self
    }

    /// Add or rename an item.
    pub fn insert(&mut self, scope: ItemScope, id: FieldId, name: impl Into<String>) {
        let name = name.into();
        debug!(dataform = self.id, ?scope, id, %name, "indexed item name");
        self.names.entry(scope).or_default().insert(id, name);
    }

    pub fn remove(&mut self, scope: ItemScope, id: FieldId) -> Option<String> {
        self.names.get_mut(&scope).and_then(|items| items.remove(&id))
    }

    /// Name of an item.
    pub fn name_of(&self, scope: ItemScope, id: FieldId) -> Option<&str> {
        self.names
            .get(&scope)
            .and_then(|items| items.get(&id))
            .map(String::as_str)
    }

    /// Number of items in a scope.
    pub fn len(&self, scope: ItemScope) -> usize {
        self.names.get(&scope).map_or(0, HashMap::len)
    }

    pub fn is_empty(&self, scope: ItemScope) -> bool {
        self.len(scope) == 0
    }
}

impl Dataform for InMemoryDataform {
    fn id(&self) -> DataformId {
        self.id
    }

    fn name_exists(&self, scope: ItemScope, name: &str, exclude: Option<FieldId>) -> bool {
        let Some(items) = self.names.get(&scope) else {
            return false;
        };
        items
            .iter()
            .any(|(id, existing)| Some(*id) != exclude && existing == name)
    }
}

/// Registry of dataforms held in memory.
#[derive(Default, Clone)]
pub struct InMemoryRegistry {
    dataforms: HashMap<DataformId, Arc<dyn Dataform>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dataform, replacing any previous one with the same id.
    pub fn register(&mut self, dataform: impl Dataform + 'static) {
        self.dataforms.insert(dataform.id(), Arc::new(dataform));
    }

    /// Builder-style [`InMemoryRegistry::register`].
    pub fn with(mut self, dataform: impl Dataform + 'static) -> Self {
        self.register(dataform);
        self
    }

    pub fn len(&self) -> usize {
        self.dataforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataforms.is_empty()
    }
}

impl DataformRegistry for InMemoryRegistry {
    fn instance(&self, id: DataformId) -> Option<Arc<dyn Dataform>> {
        self.dataforms.get(&id).cloned()
    }
}
