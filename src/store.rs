//! The document store collaborator.
//!
//! Every handler in this API performs exactly one store call per request, so
//! the whole persistence surface fits in five operations over schemaless JSON
//! documents. The trait keeps the handle explicitly owned and injectable
//! (`web::Data<dyn DocumentStore>`), which is also what lets the API tests
//! run against [`memory::InMemoryDocumentStore`] instead of Postgres.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

// collection names, as they appear on the wire and in storage
pub const USERS: &str = "users";
pub const ORDERS: &str = "orders";
pub const BANKING_DETAILS: &str = "userBankingDetails";

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("document store operation failed")]
    Backend(#[source] anyhow::Error),
    #[error("document must be a JSON object")]
    NotAnObject,
}

/// Narrow CRUD interface over a collection-of-JSON-documents store.
///
/// Filters are JSON objects matched by top-level field equality (an empty
/// filter matches everything). `insert_one` assigns the document its `_id`
/// (a uuid, serialized as a string field) and returns it. `update_one` is a
/// shallow merge of `patch` into the FIRST matching document; `delete_one`
/// removes the first match. Neither reports whether a match existed --
/// callers in this API don't consult the outcome, only failure.
///
/// No operation spans two store calls, so implementations need no locking
/// beyond their own internal consistency.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_one(
        &self,
        collection: &str,
        filter: &Value,
    ) -> Result<Option<Value>, StoreError>;

    async fn insert_one(
        &self,
        collection: &str,
        document: Value,
    ) -> Result<Uuid, StoreError>;

    async fn update_one(
        &self,
        collection: &str,
        filter: &Value,
        patch: Value,
    ) -> Result<(), StoreError>;

    async fn delete_one(
        &self,
        collection: &str,
        filter: &Value,
    ) -> Result<(), StoreError>;

    async fn find_many(
        &self,
        collection: &str,
        filter: &Value,
    ) -> Result<Vec<Value>, StoreError>;
}

/// Filter for a document by its storage-assigned id.
pub fn by_id(id: &str) -> Value { serde_json::json!({ "_id": id }) }
