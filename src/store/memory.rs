use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use super::DocumentStore;
use super::StoreError;

/// An in-process `DocumentStore` holding everything in a
/// collection-name -> Vec<document> map.
///
/// This is the test double the API tests inject in place of Postgres, and it
/// doubles as a throwaway backend for local poking without a database. The
/// matching/merge semantics deliberately mirror
/// [`postgres::PgDocumentStore`](super::postgres::PgDocumentStore): top-level
/// field equality for filters, shallow merge for patches, first match wins.
///
/// A `std::sync::Mutex` (not tokio's) is fine here: the lock is never held
/// across an await point.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: Mutex<HashMap<String, Vec<Value>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self { Self::default() }
}

/// Top-level field equality, the only filter shape this API ever issues.
fn matches(
    doc: &Value,
    filter: &Value,
) -> bool {
    match filter.as_object() {
        Some(fields) => fields.iter().all(|(k, v)| doc.get(k) == Some(v)),
        // a non-object filter matches nothing
        None => false,
    }
}

fn lock_poisoned() -> StoreError {
    StoreError::Backend(anyhow::anyhow!("store mutex poisoned"))
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn find_one(
        &self,
        collection: &str,
        filter: &Value,
    ) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.lock().map_err(|_| lock_poisoned())?;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| matches(d, filter)))
            .cloned())
    }

    async fn insert_one(
        &self,
        collection: &str,
        document: Value,
    ) -> Result<Uuid, StoreError> {
        let mut document = match document {
            Value::Object(map) => map,
            _ => return Err(StoreError::NotAnObject),
        };
        let id = Uuid::new_v4();
        document.insert("_id".to_string(), Value::String(id.to_string()));

        let mut collections = self.collections.lock().map_err(|_| lock_poisoned())?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(Value::Object(document));
        Ok(id)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Value,
        patch: Value,
    ) -> Result<(), StoreError> {
        let patch = match patch {
            Value::Object(map) => map,
            _ => return Err(StoreError::NotAnObject),
        };

        let mut collections = self.collections.lock().map_err(|_| lock_poisoned())?;
        if let Some(doc) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| matches(d, filter)))
        {
            if let Some(fields) = doc.as_object_mut() {
                for (k, v) in patch {
                    fields.insert(k, v);
                }
            }
        }
        // absent match is not an error; see the trait docs
        Ok(())
    }

    async fn delete_one(
        &self,
        collection: &str,
        filter: &Value,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.lock().map_err(|_| lock_poisoned())?;
        if let Some(docs) = collections.get_mut(collection) {
            if let Some(pos) = docs.iter().position(|d| matches(d, filter)) {
                docs.remove(pos);
            }
        }
        Ok(())
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: &Value,
    ) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.lock().map_err(|_| lock_poisoned())?;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| matches(d, filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
