use chrono::Utc;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::DocumentStore;
use super::StoreError;

/// The production `DocumentStore`: one `documents` table (see `migrations/`)
/// holding every collection as JSONB rows.
///
/// Filters are applied with the `@>` containment operator, which for the
/// scalar-field filters this API issues ({"email": ...}, {"_id": ...}) is
/// plain field equality, and is answered by the GIN index. Patches use the
/// `||` JSONB concatenation operator, i.e. a shallow field merge.
///
/// Schema changes go through sqlx-cli:
///
/// ```sh
///     sqlx migrate run --database-url $DATABASE_URL
/// ```
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// The pool may be a lazy one; nothing connects until the first call.
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

fn backend(e: sqlx::Error) -> StoreError { StoreError::Backend(e.into()) }

#[async_trait::async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_one(
        &self,
        collection: &str,
        filter: &Value,
    ) -> Result<Option<Value>, StoreError> {
        let doc: Option<Json<Value>> = sqlx::query_scalar(
            "
            SELECT doc FROM documents
            WHERE collection = $1 AND doc @> $2
            LIMIT 1
        ",
        )
        .bind(collection)
        .bind(Json(filter))
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;
        Ok(doc.map(|d| d.0))
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
        // the row id and the document's `_id` field are the same value; the
        // field is what goes over the wire
        let id = Uuid::new_v4();
        document.insert("_id".to_string(), Value::String(id.to_string()));

        sqlx::query(
            "
            INSERT INTO documents (id, collection, doc, created_at)
            VALUES ($1, $2, $3, $4)
        ",
        )
        .bind(id)
        .bind(collection)
        .bind(Json(Value::Object(document)))
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(id)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Value,
        patch: Value,
    ) -> Result<(), StoreError> {
        if !patch.is_object() {
            return Err(StoreError::NotAnObject);
        }
        sqlx::query(
            "
            UPDATE documents SET doc = doc || $3
            WHERE id = (
                SELECT id FROM documents
                WHERE collection = $1 AND doc @> $2
                ORDER BY created_at
                LIMIT 1
            )
        ",
        )
        .bind(collection)
        .bind(Json(filter))
        .bind(Json(patch))
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(())
    }

    async fn delete_one(
        &self,
        collection: &str,
        filter: &Value,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "
            DELETE FROM documents
            WHERE id = (
                SELECT id FROM documents
                WHERE collection = $1 AND doc @> $2
                ORDER BY created_at
                LIMIT 1
            )
        ",
        )
        .bind(collection)
        .bind(Json(filter))
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(())
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: &Value,
    ) -> Result<Vec<Value>, StoreError> {
        let docs: Vec<Json<Value>> = sqlx::query_scalar(
            "
            SELECT doc FROM documents
            WHERE collection = $1 AND doc @> $2
            ORDER BY created_at
        ",
        )
        .bind(collection)
        .bind(Json(filter))
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;
        Ok(docs.into_iter().map(|d| d.0).collect())
    }
}
